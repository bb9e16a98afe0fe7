// IR-Empfang: Samsung32-Pulsdekoder und IrSource über Channel
//
// Der TSOP-Empfänger liefert ein active-low Signal. Der IR Task misst die
// Dauer zwischen zwei Flanken und füttert damit den Dekoder; fertige Codes
// landen im IR-Code Channel und werden von der Steuerlogik gepollt.

use esp_core::IrSource;

use crate::IrCodeReceiver;

// Samsung32 Timing in Mikrosekunden
const HEADER_MARK_US: u32 = 4500;
const HEADER_SPACE_US: u32 = 4500;
const BIT_MARK_US: u32 = 560;
const ONE_SPACE_US: u32 = 1690;
const ZERO_SPACE_US: u32 = 560;
const FRAME_BITS: u8 = 32;

/// Erlaubte Abweichung in Prozent
const TOLERANCE_PERCENT: u32 = 30;

fn within(duration_us: u32, nominal_us: u32) -> bool {
    let slack = nominal_us * TOLERANCE_PERCENT / 100;
    duration_us >= nominal_us - slack && duration_us <= nominal_us + slack
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameState {
    Idle,
    HeaderMark,
    ExpectMark { bits: u8, value: u32 },
    ExpectSpace { bits: u8, value: u32 },
}

/// Zustandsautomat für Samsung32-Frames (32 Bit, MSB zuerst)
#[derive(Debug)]
pub struct Samsung32Decoder {
    state: FrameState,
}

impl Default for Samsung32Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Samsung32Decoder {
    pub const fn new() -> Self {
        Self {
            state: FrameState::Idle,
        }
    }

    /// Verarbeitet einen abgeschlossenen Puls
    ///
    /// `mark`: Puls war Träger an (Pin low), sonst Pause.
    /// Gibt den Code zurück sobald das 32. Bit gelesen ist.
    pub fn feed(&mut self, mark: bool, duration_us: u32) -> Option<u64> {
        match (self.state, mark) {
            (FrameState::HeaderMark, false) if within(duration_us, HEADER_SPACE_US) => {
                self.state = FrameState::ExpectMark { bits: 0, value: 0 };
            }
            (FrameState::ExpectMark { bits, value }, true) if within(duration_us, BIT_MARK_US) => {
                self.state = FrameState::ExpectSpace { bits, value };
            }
            (FrameState::ExpectSpace { bits, value }, false) => {
                let bit = if within(duration_us, ONE_SPACE_US) {
                    1
                } else if within(duration_us, ZERO_SPACE_US) {
                    0
                } else {
                    self.reset(mark, duration_us);
                    return None;
                };

                let value = (value << 1) | bit;
                let bits = bits + 1;
                if bits == FRAME_BITS {
                    self.state = FrameState::Idle;
                    return Some(u64::from(value));
                }
                self.state = FrameState::ExpectMark { bits, value };
            }
            _ => self.reset(mark, duration_us),
        }
        None
    }

    /// Neuer Frame-Anfang oder zurück in den Leerlauf
    fn reset(&mut self, mark: bool, duration_us: u32) {
        self.state = if mark && within(duration_us, HEADER_MARK_US) {
            FrameState::HeaderMark
        } else {
            FrameState::Idle
        };
    }
}

/// IrSource für die Steuerlogik: liest dekodierte Codes aus dem Channel
pub struct ChannelIrSource {
    codes: IrCodeReceiver,
}

impl ChannelIrSource {
    pub fn new(codes: IrCodeReceiver) -> Self {
        Self { codes }
    }
}

impl IrSource for ChannelIrSource {
    fn try_decode(&mut self) -> Option<u64> {
        self.codes.try_receive().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_frame(decoder: &mut Samsung32Decoder, code: u32) -> Option<u64> {
        decoder.feed(true, HEADER_MARK_US);
        decoder.feed(false, HEADER_SPACE_US);
        let mut result = None;
        for bit in (0..32).rev() {
            decoder.feed(true, BIT_MARK_US);
            let space = if code & (1 << bit) != 0 {
                ONE_SPACE_US
            } else {
                ZERO_SPACE_US
            };
            result = decoder.feed(false, space);
        }
        result
    }

    #[test]
    fn test_decodes_volume_up() {
        let mut decoder = Samsung32Decoder::new();
        assert_eq!(feed_frame(&mut decoder, 0xE0E0_E01F), Some(3772833823));
    }

    #[test]
    fn test_jitter_within_tolerance() {
        let mut decoder = Samsung32Decoder::new();
        decoder.feed(true, 4200);
        decoder.feed(false, 4700);
        let mut result = None;
        for _ in 0..32 {
            decoder.feed(true, 620);
            result = decoder.feed(false, 1600);
        }
        assert_eq!(result, Some(0xFFFF_FFFF));
        assert_eq!(decoder.state, FrameState::Idle);
    }

    #[test]
    fn test_noise_resets_frame() {
        let mut decoder = Samsung32Decoder::new();
        decoder.feed(true, HEADER_MARK_US);
        decoder.feed(false, HEADER_SPACE_US);
        decoder.feed(true, BIT_MARK_US);
        assert_eq!(decoder.feed(false, 3000), None);
        assert_eq!(decoder.state, FrameState::Idle);

        // nächster Frame wird wieder vollständig erkannt
        assert_eq!(feed_frame(&mut decoder, 0xE0E0_D02F), Some(3772829743));
    }
}
