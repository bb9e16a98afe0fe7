//! Integration Tests für Lautstärke-Zustand und Status-Publisher
//!
//! Diese Tests laufen auf dem Host (x86_64) und prüfen die Invarianten
//! über viele Eingabe-Sequenzen.

mod common;

use common::*;
use esp_core::{AmpConfig, PublishOutcome, StatePublisher, VolumeAction, VolumeState, step_size};

// ============================================================================
// Tests: VolumeState
// ============================================================================

#[test]
fn test_level_stays_in_range_for_all_sequences() {
    let config = AmpConfig::new();
    // alle Up/Down-Folgen der Länge 12
    for pattern in 0u32..(1 << 12) {
        let mut volume = VolumeState::new(&config);
        for bit in 0..12 {
            if pattern & (1 << bit) == 0 {
                volume.volume_up();
            } else {
                volume.volume_down();
            }
            assert!(volume.level() >= config.min_level);
            assert!(volume.level() <= config.max_level);
        }
    }
}

#[test]
fn test_double_toggle_restores_level_everywhere() {
    let config = AmpConfig::new();
    let mut volume = VolumeState::new(&config);
    for _ in 0..40 {
        let level = volume.level();
        assert_eq!(volume.toggle_mute(), config.mute_sentinel);
        assert_eq!(volume.toggle_mute(), level);
        assert_eq!(volume.level(), level);
        volume.volume_down();
    }
}

#[test]
fn test_step_policy_monotonic() {
    let bands = AmpConfig::new().step_bands;
    let steps: Vec<u8> = (0..=150u8).map(|level| step_size(&bands, level)).collect();
    // Richtung laut (level → 0) darf die Schrittweite nur kleiner werden
    assert!(steps.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(steps[0], 1);
    assert_eq!(steps[150], 5);
}

#[test]
fn test_apply_dispatches_actions() {
    let mut volume = VolumeState::new(&AmpConfig::new());
    assert_eq!(volume.apply(VolumeAction::Up), 55);
    assert_eq!(volume.apply(VolumeAction::Down), 60);
    assert_eq!(volume.apply(VolumeAction::ToggleMute), 0xFF);
}

#[test]
fn test_default_level_clamped_into_range() {
    let config = AmpConfig::new()
        .with_level_range(0, 40)
        .with_default_level(60);
    let volume = VolumeState::new(&config);
    assert_eq!(volume.level(), 40);
    assert_eq!(volume.user_volume(), 0);
}

// ============================================================================
// Tests: StatePublisher
// ============================================================================

#[test]
fn test_publisher_never_publishes_clean_state() {
    let mut volume = VolumeState::new(&AmpConfig::new());
    let mut transport = MockTransport::new();
    let mut publisher = StatePublisher::new("state", 1000, 0);

    for now in (1000..10_000).step_by(1000) {
        assert_eq!(
            publisher.poll(&mut volume, &mut transport, now),
            PublishOutcome::Unchanged
        );
    }
    assert!(transport.published.is_empty());
}

#[test]
fn test_publisher_never_publishes_when_disconnected() {
    let mut volume = VolumeState::new(&AmpConfig::new());
    let mut transport = MockTransport::new();
    transport.connected = false;
    let mut publisher = StatePublisher::new("state", 1000, 0);
    volume.volume_up();

    assert_eq!(
        publisher.poll(&mut volume, &mut transport, 1000),
        PublishOutcome::Disconnected
    );
    assert!(volume.is_dirty());
    assert!(transport.published.is_empty());
}

#[test]
fn test_publisher_clears_dirty_until_next_mutation() {
    let mut volume = VolumeState::new(&AmpConfig::new());
    let mut transport = MockTransport::new();
    let mut publisher = StatePublisher::new("state", 1000, 0);
    volume.volume_up();

    assert_eq!(
        publisher.poll(&mut volume, &mut transport, 500),
        PublishOutcome::NotDue
    );
    assert!(matches!(
        publisher.poll(&mut volume, &mut transport, 1000),
        PublishOutcome::Published(msg) if msg.volume == 47 && !msg.muted
    ));
    assert!(!volume.is_dirty());

    volume.toggle_mute();
    assert!(volume.is_dirty());
    assert!(matches!(
        publisher.poll(&mut volume, &mut transport, 2000),
        PublishOutcome::Published(msg) if msg.muted
    ));
    assert_eq!(transport.published.len(), 2);
}
