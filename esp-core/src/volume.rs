//! Lautstärke- und Mute-Zustand
//!
//! Die Skala ist invertiert: höherer `level` = leiser (Dämpfung im Codec).

use crate::config::{AmpConfig, StepBand};

/// Aktion auf dem Lautstärke-Zustand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeAction {
    Up,
    Down,
    ToggleMute,
}

/// Schrittweite für den aktuellen `level`
///
/// Grob bei leiser Wiedergabe, fein nahe der maximalen Lautstärke.
///
/// ```
/// # use esp_core::{AmpConfig, step_size};
/// let bands = AmpConfig::new().step_bands;
/// assert_eq!(step_size(&bands, 60), 5);
/// assert_eq!(step_size(&bands, 10), 1);
/// ```
pub fn step_size(bands: &[StepBand], level: u8) -> u8 {
    bands
        .iter()
        .find(|band| level > band.above)
        .or(bands.last())
        .map_or(1, |band| band.step)
}

/// Autoritativer Lautstärke-Zustand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeState {
    level: u8,
    muted: bool,
    dirty: bool,
    min_level: u8,
    max_level: u8,
    mute_sentinel: u8,
    user_volume_divisor: u8,
    step_bands: [StepBand; 4],
}

/// Schnappschuss für Display und MQTT
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeSnapshot {
    pub level: u8,
    /// Benutzer-Lautstärke (höher = lauter)
    pub user_volume: u8,
    pub muted: bool,
}

impl VolumeState {
    pub fn new(config: &AmpConfig) -> Self {
        Self {
            level: config
                .default_level
                .clamp(config.min_level, config.max_level),
            muted: false,
            dirty: false,
            min_level: config.min_level,
            max_level: config.max_level,
            mute_sentinel: config.mute_sentinel,
            user_volume_divisor: config.user_volume_divisor.max(1),
            step_bands: config.step_bands,
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Nur vom StatePublisher nach erfolgreichem Publish aufzurufen
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub fn step(&self) -> u8 {
        step_size(&self.step_bands, self.level)
    }

    /// Lauter: verringert `level`, hebt Mute auf
    pub fn volume_up(&mut self) -> u8 {
        let step = self.step();
        self.level = self.level.saturating_sub(step).max(self.min_level);
        self.muted = false;
        self.dirty = true;
        self.register_value()
    }

    /// Leiser: erhöht `level`, hebt Mute auf
    pub fn volume_down(&mut self) -> u8 {
        let step = self.step();
        self.level = self.level.saturating_add(step).min(self.max_level);
        self.muted = false;
        self.dirty = true;
        self.register_value()
    }

    /// Schaltet Mute um, `level` bleibt unverändert
    pub fn toggle_mute(&mut self) -> u8 {
        self.muted = !self.muted;
        self.dirty = true;
        self.register_value()
    }

    /// Führt `action` aus und liefert den neuen Register-Wert
    pub fn apply(&mut self, action: VolumeAction) -> u8 {
        match action {
            VolumeAction::Up => self.volume_up(),
            VolumeAction::Down => self.volume_down(),
            VolumeAction::ToggleMute => self.toggle_mute(),
        }
    }

    /// Wert für das Master-Volume Register
    pub fn register_value(&self) -> u8 {
        if self.muted {
            self.mute_sentinel
        } else {
            self.level
        }
    }

    pub fn user_volume(&self) -> u8 {
        (self.max_level - self.level) / self.user_volume_divisor
    }

    pub fn snapshot(&self) -> VolumeSnapshot {
        VolumeSnapshot {
            level: self.level,
            user_volume: self.user_volume(),
            muted: self.muted,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for VolumeAction {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            VolumeAction::Up => defmt::write!(fmt, "Up"),
            VolumeAction::Down => defmt::write!(fmt, "Down"),
            VolumeAction::ToggleMute => defmt::write!(fmt, "ToggleMute"),
        }
    }
}
