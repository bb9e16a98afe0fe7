//! Hardware Abstraction Traits
//!
//! Diese Traits definieren die Schnittstellen zu den Kollaborateuren der
//! Steuer-Schleife ohne konkrete Implementierung.
//!
//! # Implementierungen
//! - **Production:** esp-firmware (`hal::*`, `transport::ChannelTransport`)
//! - **Testing:** Mocks in esp-tests

/// Fehler-Typ für Register-Schreibzugriffe (I2C)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// Gerät hat die Adresse nicht bestätigt
    NoAcknowledge,
    WriteFailed,
}

/// Fehler-Typ für das Display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    FlushFailed,
}

/// Register-Senke des Audio-Codecs
pub trait RegisterSink {
    /// Schreibt einen einzelnen Byte-Wert in ein Register
    ///
    /// # Fehlerbehandlung
    /// Gibt `BusError` zurück wenn der Bus-Zugriff fehlschlägt.
    /// Der Aufrufer wiederholt den Schreibzugriff nicht.
    fn write_register(&mut self, address: u8, register: u8, value: u8) -> Result<(), BusError>;
}

/// Quelle für dekodierte IR-Codes
pub trait IrSource {
    /// Liefert einen dekodierten Code, falls einer anliegt (non-blocking)
    fn try_decode(&mut self) -> Option<u64>;
}

/// Netzwerk-Transport (MQTT)
///
/// Alle Methoden müssen nach begrenzter Zeit zurückkehren.
pub trait NetworkTransport {
    /// Wartungs-Aufruf: liefert eingegangene Nachrichten synchron an `handler`
    fn pump(&mut self, handler: &mut dyn FnMut(&str, &[u8]));

    /// Broker-Verbindung aktiv?
    fn is_connected(&self) -> bool;

    /// WLAN-Link aktiv?
    fn is_link_up(&self) -> bool;

    /// Published `payload` auf `topic`, `true` bei Erfolg
    fn publish(&mut self, topic: &str, payload: &[u8]) -> bool;

    /// Abonniert `topic`, eingehende Nachrichten kommen über `pump`
    fn subscribe(&mut self, topic: &str) -> bool;
}

/// Schriftgröße für Text auf dem Display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Small,
    Large,
}

/// Monochromes Bitmap (1 Bit pro Pixel, MSB zuerst, Zeilen auf Bytes aufgefüllt)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub width: u16,
    pub height: u16,
    pub data: &'static [u8],
}

/// Zeichenfläche (Framebuffer) des Displays
///
/// Zeichenbefehle wirken erst nach `present()` auf dem Panel.
pub trait DisplaySurface {
    fn clear(&mut self);

    /// Zeichnet Text horizontal zentriert um `x`, Oberkante bei `y`
    fn draw_text(&mut self, x: i32, y: i32, font: Font, text: &str);

    fn draw_glyph(&mut self, x: i32, y: i32, glyph: &Glyph);

    /// Überträgt den Framebuffer auf das Panel
    fn present(&mut self) -> Result<(), DisplayError>;
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for BusError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            BusError::NoAcknowledge => defmt::write!(fmt, "No acknowledge"),
            BusError::WriteFailed => defmt::write!(fmt, "Write failed"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DisplayError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            DisplayError::FlushFailed => defmt::write!(fmt, "Flush failed"),
        }
    }
}
