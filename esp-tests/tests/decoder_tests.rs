//! Integration Tests für den IR-Kommando-Decoder
//!
//! Diese Tests laufen auf dem Host (x86_64) und prüfen Debounce,
//! Kombinationen und Timeout über die öffentliche API.

use esp_core::{AmpConfig, CommandDecoder, DecoderEvent, IrCodeMap, PendingCommand};

// ============================================================================
// Tests: CommandDecoder
// ============================================================================

fn decoder() -> CommandDecoder {
    CommandDecoder::new(IrCodeMap::samsung(), &AmpConfig::new())
}

#[test]
fn test_all_composites() {
    for first in 0..4u8 {
        for second in 0..4u8 {
            let mut decoder = decoder();
            assert_eq!(decoder.on_digit(first, 0), None);
            assert_eq!(
                decoder.on_digit(second, 500),
                Some(10 * (first + 1) + second)
            );
        }
    }
}

#[test]
fn test_digit_codes_map_to_commands() {
    let codes = IrCodeMap::samsung();
    let mut decoder = decoder();

    assert_eq!(decoder.on_code(codes.digits[2], 0), None);
    assert_eq!(
        decoder.on_code(codes.digits[1], 300),
        Some(DecoderEvent::Command(31))
    );
}

#[test]
fn test_debounced_press_changes_nothing() {
    let mut decoder = decoder();
    decoder.on_digit(2, 1000);
    let pending = decoder.pending();

    for offset in [1, 50, 199] {
        assert_eq!(decoder.on_digit(1, 1000 + offset), None);
        assert_eq!(decoder.pending(), pending);
    }

    // Timeout zählt weiterhin ab dem ersten Druck
    assert_eq!(decoder.poll_timeout(2000), Some(2));
}

#[test]
fn test_first_press_after_boot_accepted() {
    let mut decoder = decoder();
    assert_eq!(decoder.on_digit(0, 0), None);
    assert_eq!(
        decoder.pending(),
        PendingCommand::PendingFirst {
            digit: 0,
            pressed_at: 0
        }
    );
}

#[test]
fn test_press_after_timeout_starts_new_sequence() {
    let mut decoder = decoder();
    decoder.on_digit(1, 0);
    assert_eq!(decoder.poll_timeout(1200), Some(1));

    assert_eq!(decoder.on_digit(3, 1300), None);
    assert_eq!(decoder.poll_timeout(2300), Some(3));
}

#[test]
fn test_custom_timing() {
    let config = AmpConfig::new()
        .with_debounce_ms(50)
        .with_command_timeout_ms(400);
    let mut decoder = CommandDecoder::new(IrCodeMap::samsung(), &config);

    decoder.on_digit(0, 0);
    assert_eq!(decoder.on_digit(1, 60), Some(11));

    decoder.on_digit(2, 200);
    assert_eq!(decoder.poll_timeout(599), None);
    assert_eq!(decoder.poll_timeout(600), Some(2));
}

#[test]
fn test_recognizes_only_mapped_codes() {
    let codes = IrCodeMap::samsung();
    let decoder = decoder();

    assert!(decoder.recognizes(codes.mute));
    assert!(decoder.recognizes(codes.digits[3]));
    assert!(!decoder.recognizes(0x1234_5678));
}
