//! Laufzeit-Konfiguration der Steuerlogik
//!
//! Alle Werte sind `const`-Defaults aus der ursprünglichen Verstärker-Firmware.
//! Die Firmware kann einzelne Werte über die `with_*` Builder überschreiben.

/// Millisekunden seit Boot (monotone Uhr)
pub type Millis = u64;

/// Stufe der Schrittweiten-Tabelle: ab `above` (exklusiv) gilt `step`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepBand {
    pub above: u8,
    pub step: u8,
}

/// Konfiguration für Lautstärke, Decoder, Display und Timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmpConfig {
    /// Lauteste Stufe (Register-Wert, invertierte Skala)
    pub min_level: u8,
    /// Leiseste Stufe
    pub max_level: u8,
    /// Lautstärke nach dem Boot (60 ≙ -26 dB)
    pub default_level: u8,
    /// Register-Wert für Stummschaltung
    pub mute_sentinel: u8,
    /// Absteigend sortiert; letzte Stufe muss `above: 0` haben
    pub step_bands: [StepBand; 4],
    /// Teiler für die Benutzer-Lautstärke `(max_level - level) / divisor`
    pub user_volume_divisor: u8,
    pub debounce_ms: Millis,
    pub command_timeout_ms: Millis,
    pub display_timeout_ms: Millis,
    /// Display auch im Mute-Modus abschalten (alte Variante)
    pub blank_while_muted: bool,
    pub publish_interval_ms: Millis,
    pub connection_check_interval_ms: Millis,
    /// I2C-Adresse des Audio-Codecs
    pub amp_address: u8,
    /// Master-Volume Register des Codecs
    pub volume_register: u8,
}

impl AmpConfig {
    pub const fn new() -> Self {
        Self {
            min_level: 0,
            max_level: 150,
            default_level: 60,
            mute_sentinel: 0xFF,
            step_bands: [
                StepBand { above: 50, step: 5 },
                StepBand { above: 30, step: 3 },
                StepBand { above: 15, step: 2 },
                StepBand { above: 0, step: 1 },
            ],
            user_volume_divisor: 2,
            debounce_ms: 200,
            command_timeout_ms: 1000,
            display_timeout_ms: 10_000,
            blank_while_muted: false,
            publish_interval_ms: 60_000,
            connection_check_interval_ms: 30_000,
            amp_address: 0x1B,
            volume_register: 0x07,
        }
    }

    /// Setzt den Pegel-Bereich
    ///
    /// # Panics
    /// Wenn `min_level > max_level`. In einem `const` Kontext ist das ein Compile-Fehler.
    pub const fn with_level_range(mut self, min_level: u8, max_level: u8) -> Self {
        assert!(min_level <= max_level, "min_level must not exceed max_level");
        self.min_level = min_level;
        self.max_level = max_level;
        self
    }

    pub const fn with_default_level(mut self, default_level: u8) -> Self {
        self.default_level = default_level;
        self
    }

    pub const fn with_mute_sentinel(mut self, mute_sentinel: u8) -> Self {
        self.mute_sentinel = mute_sentinel;
        self
    }

    pub const fn with_debounce_ms(mut self, debounce_ms: Millis) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    pub const fn with_command_timeout_ms(mut self, command_timeout_ms: Millis) -> Self {
        self.command_timeout_ms = command_timeout_ms;
        self
    }

    pub const fn with_display_timeout_ms(mut self, display_timeout_ms: Millis) -> Self {
        self.display_timeout_ms = display_timeout_ms;
        self
    }

    pub const fn with_blank_while_muted(mut self, blank_while_muted: bool) -> Self {
        self.blank_while_muted = blank_while_muted;
        self
    }

    pub const fn with_publish_interval_ms(mut self, publish_interval_ms: Millis) -> Self {
        self.publish_interval_ms = publish_interval_ms;
        self
    }

    pub const fn with_connection_check_interval_ms(mut self, interval_ms: Millis) -> Self {
        self.connection_check_interval_ms = interval_ms;
        self
    }
}

impl Default for AmpConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// IR-Codes der Fernbedienung (Samsung32, dekodierter Wert)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrCodeMap {
    pub volume_up: u64,
    pub volume_down: u64,
    pub mute: u64,
    /// Tasten A, B, C, D → Ziffern 0..=3
    pub digits: [u64; 4],
}

impl IrCodeMap {
    /// Samsung TV Fernbedienung
    pub const fn samsung() -> Self {
        Self {
            volume_up: 3_772_833_823,
            volume_down: 3_772_829_743,
            mute: 3_772_837_903,
            digits: [3_772_790_473, 3_772_786_903, 3_772_819_543, 3_772_803_223],
        }
    }
}

impl Default for IrCodeMap {
    fn default() -> Self {
        Self::samsung()
    }
}

/// MQTT Topics für Status, Kommandos und eingehende Konfiguration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topics {
    pub state: &'static str,
    pub command: &'static str,
    pub config: &'static str,
}

impl Default for Topics {
    fn default() -> Self {
        Self {
            state: "home/livingroom/tvspeakers/state",
            command: "home/livingroom/tvspeakers/command",
            config: "home/livingroom/tvspeakers/config",
        }
    }
}

/// Init-Sequenz für den Codec: (Register, Wert)
///
/// - `0x1B ← 0x00`: Oszillator-Trim
/// - `0x05 ← 0x00`: Shutdown verlassen
pub const AMP_INIT_SEQUENCE: [(u8, u8); 2] = [(0x1B, 0x00), (0x05, 0x00)];
