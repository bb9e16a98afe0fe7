//! IR-Code Decoder mit Ziffern-Kombination
//!
//! Lautstärke-Tasten wirken sofort. Die vier Ziffern-Tasten (A–D → 0..=3)
//! werden zu Kommandos zusammengesetzt:
//!
//! - eine Taste, dann Ruhe bis zum Timeout → Kommando `n`
//! - zwei Tasten innerhalb des Timeouts → Kommando `10 * (n1 + 1) + n2`
//!
//! Tasten innerhalb des Entprell-Fensters nach dem letzten akzeptierten
//! Tastendruck gelten als Key-Repeat und werden verworfen.

use crate::config::{AmpConfig, IrCodeMap, Millis};
use crate::volume::VolumeAction;

/// Semantische Bedeutung eines IR-Codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrKey {
    Volume(VolumeAction),
    Digit(u8),
}

impl IrCodeMap {
    /// Unbekannte Codes → `None`
    pub fn lookup(&self, code: u64) -> Option<IrKey> {
        if code == self.volume_up {
            Some(IrKey::Volume(VolumeAction::Up))
        } else if code == self.volume_down {
            Some(IrKey::Volume(VolumeAction::Down))
        } else if code == self.mute {
            Some(IrKey::Volume(VolumeAction::ToggleMute))
        } else {
            self.digits
                .iter()
                .position(|&digit| digit == code)
                .map(|index| IrKey::Digit(index as u8))
        }
    }
}

/// Ergebnis eines dekodierten Codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderEvent {
    /// Sofortige Lautstärke-Aktion
    Volume(VolumeAction),
    /// Fertiges Kommando (einzeln oder zusammengesetzt)
    Command(u8),
}

/// Zustand der Ziffern-Kombination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingCommand {
    Idle,
    PendingFirst { digit: u8, pressed_at: Millis },
}

#[derive(Debug, Clone)]
pub struct CommandDecoder {
    codes: IrCodeMap,
    pending: PendingCommand,
    /// Zeitpunkt des letzten akzeptierten Ziffern-Drucks
    last_press: Option<Millis>,
    debounce_ms: Millis,
    command_timeout_ms: Millis,
}

impl CommandDecoder {
    pub fn new(codes: IrCodeMap, config: &AmpConfig) -> Self {
        Self {
            codes,
            pending: PendingCommand::Idle,
            last_press: None,
            debounce_ms: config.debounce_ms,
            command_timeout_ms: config.command_timeout_ms,
        }
    }

    pub fn pending(&self) -> PendingCommand {
        self.pending
    }

    /// Verarbeitet einen rohen IR-Code
    pub fn on_code(&mut self, code: u64, now: Millis) -> Option<DecoderEvent> {
        match self.codes.lookup(code)? {
            IrKey::Volume(action) => Some(DecoderEvent::Volume(action)),
            IrKey::Digit(digit) => self.on_digit(digit, now).map(DecoderEvent::Command),
        }
    }

    /// Gehört der Code zu einer bekannten Taste?
    pub fn recognizes(&self, code: u64) -> bool {
        self.codes.lookup(code).is_some()
    }

    /// Ziffern-Tastendruck, liefert ein Kommando wenn die Kombination fertig ist
    pub fn on_digit(&mut self, digit: u8, now: Millis) -> Option<u8> {
        if self.is_repeat(now) {
            debug!("IR: digit {} dropped (debounce)", digit);
            return None;
        }
        self.last_press = Some(now);

        match self.pending {
            PendingCommand::Idle => {
                self.pending = PendingCommand::PendingFirst {
                    digit,
                    pressed_at: now,
                };
                None
            }
            PendingCommand::PendingFirst { digit: first, .. } => {
                self.pending = PendingCommand::Idle;
                Some(10 * (first + 1) + digit)
            }
        }
    }

    /// Muss jeden Tick aufgerufen werden: liefert die einzelne Ziffer
    /// wenn der Kommando-Timeout abgelaufen ist
    pub fn poll_timeout(&mut self, now: Millis) -> Option<u8> {
        match self.pending {
            PendingCommand::PendingFirst { digit, pressed_at }
                if now.saturating_sub(pressed_at) >= self.command_timeout_ms =>
            {
                self.pending = PendingCommand::Idle;
                Some(digit)
            }
            _ => None,
        }
    }

    fn is_repeat(&self, now: Millis) -> bool {
        self.last_press
            .is_some_and(|last| now.saturating_sub(last) < self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoder() -> CommandDecoder {
        CommandDecoder::new(IrCodeMap::samsung(), &AmpConfig::new())
    }

    #[test]
    fn test_lookup_known_codes() {
        let codes = IrCodeMap::samsung();
        assert_eq!(
            codes.lookup(3_772_833_823),
            Some(IrKey::Volume(VolumeAction::Up))
        );
        assert_eq!(codes.lookup(3_772_819_543), Some(IrKey::Digit(2)));
        assert_eq!(codes.lookup(42), None);
    }

    #[test]
    fn test_single_digit_emitted_after_timeout() {
        let mut decoder = decoder();
        assert_eq!(decoder.on_digit(3, 0), None);
        assert_eq!(decoder.poll_timeout(999), None);
        assert_eq!(decoder.poll_timeout(1000), Some(3));
        assert_eq!(decoder.pending(), PendingCommand::Idle);
        assert_eq!(decoder.poll_timeout(5000), None);
    }

    #[test]
    fn test_two_digits_compose() {
        let mut decoder = decoder();
        assert_eq!(decoder.on_digit(2, 0), None);
        assert_eq!(decoder.on_digit(1, 300), Some(31));
        assert_eq!(decoder.pending(), PendingCommand::Idle);
        assert_eq!(decoder.poll_timeout(2000), None);
    }

    #[test]
    fn test_repeat_within_debounce_dropped() {
        let mut decoder = decoder();
        decoder.on_digit(1, 1000);
        let before = decoder.pending();

        assert_eq!(decoder.on_digit(1, 1150), None);
        assert_eq!(decoder.pending(), before);

        // Fenster zählt ab dem akzeptierten Druck, nicht ab dem verworfenen
        assert_eq!(decoder.on_digit(0, 1200), Some(20));
    }

    #[test]
    fn test_debounce_applies_after_emission() {
        let mut decoder = decoder();
        decoder.on_digit(0, 0);
        assert_eq!(decoder.on_digit(0, 300), Some(10));
        assert_eq!(decoder.on_digit(3, 400), None);
        assert_eq!(decoder.pending(), PendingCommand::Idle);
    }

    #[test]
    fn test_volume_codes_bypass_debounce() {
        let mut decoder = decoder();
        decoder.on_digit(0, 0);
        assert_eq!(
            decoder.on_code(3_772_837_903, 10),
            Some(DecoderEvent::Volume(VolumeAction::ToggleMute))
        );
    }

    #[test]
    fn test_unknown_code_ignored() {
        let mut decoder = decoder();
        assert_eq!(decoder.on_code(0xDEAD_BEEF, 0), None);
        assert_eq!(decoder.pending(), PendingCommand::Idle);
    }
}
