// SSD1306 OLED (128x64, I2C) als DisplaySurface
use defmt::{Debug2Format, error, info};
use embedded_graphics::image::{Image, ImageRaw};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use embedded_hal::i2c::I2c;
use esp_core::{DisplayError, DisplaySurface, Font, Glyph};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::size::DisplaySize128x64;
use ssd1306::{I2CDisplayInterface, Ssd1306};

type Oled<I> =
    Ssd1306<I2CInterface<I>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Gepuffertes OLED: gezeichnet wird in den RAM-Puffer, `present` schiebt ihn per I2C raus
pub struct OledSurface<I: I2c> {
    display: Oled<I>,
}

impl<I: I2c> OledSurface<I> {
    pub fn new(i2c: I) -> Self {
        let interface = I2CDisplayInterface::new(i2c);
        let display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        Self { display }
    }

    /// Initialisiert den Controller und löscht den Bildschirm
    ///
    /// Ein Fehler wird nur geloggt: ohne Display läuft die Steuerung weiter.
    pub fn init(&mut self) {
        if let Err(e) = self.display.init() {
            error!("Display: Init failed: {}", Debug2Format(&e));
            return;
        }
        self.display.clear_buffer();
        if self.display.flush().is_ok() {
            info!("Display: Initialized");
        }
    }
}

impl<I: I2c> DisplaySurface for OledSurface<I> {
    fn clear(&mut self) {
        self.display.clear_buffer();
    }

    fn draw_text(&mut self, x: i32, y: i32, font: Font, text: &str) {
        let character_style = match font {
            Font::Small => MonoTextStyle::new(&FONT_6X10, BinaryColor::On),
            Font::Large => MonoTextStyle::new(&FONT_10X20, BinaryColor::On),
        };
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Top)
            .build();

        // Zeichnen in den Puffer kann nicht fehlschlagen
        let _ = Text::with_text_style(text, Point::new(x, y), character_style, text_style)
            .draw(&mut self.display);
    }

    fn draw_glyph(&mut self, x: i32, y: i32, glyph: &Glyph) {
        let raw = ImageRaw::<BinaryColor>::new(glyph.data, u32::from(glyph.width));
        let _ = Image::new(&raw, Point::new(x, y)).draw(&mut self.display);
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        self.display.flush().map_err(|_| DisplayError::FlushFailed)
    }
}
