//! Icons für das Status-Display
//!
//! Die Bitmaps werden zur Compile-Zeit aus ASCII-Art erzeugt
//! (`#` = Pixel an, alles andere = aus).

use crate::traits::Glyph;

/// Wandelt ASCII-Art in ein 1bpp Bitmap um (MSB zuerst, Zeilen auf Bytes aufgefüllt)
const fn bitmap<const N: usize>(rows: &[&str]) -> [u8; N] {
    let mut out = [0u8; N];
    let height = rows.len();
    let width = rows[0].len();
    let stride = width.div_ceil(8);
    assert!(stride * height == N, "bitmap size mismatch");

    let mut y = 0;
    while y < height {
        let row = rows[y].as_bytes();
        assert!(row.len() == width, "ragged bitmap row");
        let mut x = 0;
        while x < width {
            if row[x] == b'#' {
                out[y * stride + x / 8] |= 0x80 >> (x % 8);
            }
            x += 1;
        }
        y += 1;
    }
    out
}

const MUTE_DATA: [u8; 72] = bitmap(&[
    "........................",
    "...........##...........",
    "..........###...........",
    ".........####...........",
    "........#####...........",
    ".......######...........",
    "######.######...........",
    "#############...........",
    "#############..#.....#..",
    "#############...#...#...",
    "#############....#.#....",
    "#############.....#.....",
    "#############....#.#....",
    "#############...#...#...",
    "#############..#.....#..",
    "#############...........",
    "######.######...........",
    ".......######...........",
    "........#####...........",
    ".........####...........",
    "..........###...........",
    "...........##...........",
    "........................",
    "........................",
]);

const WIFI_ON_DATA: [u8; 30] = bitmap(&[
    "...............",
    "....#######....",
    "..##.......##..",
    ".#...........#.",
    "#....#####....#",
    "...##.....##...",
    "..#.........#..",
    "......###......",
    ".....#...#.....",
    "...............",
    ".......#.......",
    "......###......",
    ".......#.......",
    "...............",
    "...............",
]);

const WIFI_OFF_DATA: [u8; 30] = bitmap(&[
    "#..............",
    ".#..#######....",
    "..##.......##..",
    ".#.#.........#.",
    "#...######....#",
    "...##.#...##...",
    "..#....#....#..",
    "......###......",
    ".....#...#.....",
    "..........#....",
    ".......#...#...",
    "......###...#..",
    ".......#.....#.",
    "..............#",
    "...............",
]);

const BROKER_OK_DATA: [u8; 30] = bitmap(&[
    "...............",
    "..###########..",
    ".#...........#.",
    ".#.#.......#.#.",
    ".#..#.....#..#.",
    ".#...#...#...#.",
    ".#....#.#....#.",
    ".#.....#.....#.",
    ".#...........#.",
    ".#...........#.",
    ".#...........#.",
    ".#..........##.",
    "..##########.#.",
    "............#..",
    "...............",
]);

const BROKER_FAILED_DATA: [u8; 30] = bitmap(&[
    "...............",
    "..###########..",
    ".#...........#.",
    ".#..#.....#..#.",
    ".#...#...#...#.",
    ".#....#.#....#.",
    ".#.....#.....#.",
    ".#....#.#....#.",
    ".#...#...#...#.",
    ".#..#.....#..#.",
    ".#...........#.",
    ".#..........##.",
    "..##########.#.",
    "............#..",
    "...............",
]);

/// Lautsprecher mit Kreuz (24x24)
pub const MUTE: Glyph = Glyph {
    width: 24,
    height: 24,
    data: &MUTE_DATA,
};

pub const WIFI_ON: Glyph = Glyph {
    width: 15,
    height: 15,
    data: &WIFI_ON_DATA,
};

pub const WIFI_OFF: Glyph = Glyph {
    width: 15,
    height: 15,
    data: &WIFI_OFF_DATA,
};

/// Sprechblase (Broker verbunden)
pub const BROKER_OK: Glyph = Glyph {
    width: 15,
    height: 15,
    data: &BROKER_OK_DATA,
};

pub const BROKER_FAILED: Glyph = Glyph {
    width: 15,
    height: 15,
    data: &BROKER_FAILED_DATA,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitmap_msb_first() {
        const DATA: [u8; 4] = bitmap(&["#.........", ".........#"]);
        assert_eq!(DATA, [0x80, 0x00, 0x00, 0x40]);
    }

    #[test]
    fn test_glyph_sizes_match_data() {
        for glyph in [MUTE, WIFI_ON, WIFI_OFF, BROKER_OK, BROKER_FAILED] {
            let stride = (glyph.width as usize).div_ceil(8);
            assert_eq!(glyph.data.len(), stride * glyph.height as usize);
        }
    }
}
