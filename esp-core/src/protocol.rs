//! MQTT Nachrichten-Protokoll
//!
//! JSON-Payloads für Status, Kommandos und eingehende Konfiguration.
//! Serialisierung mit serde-json-core (no_std, feste Buffer).

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::volume::{VolumeAction, VolumeSnapshot};

/// Maximale Payload-Größe für ausgehende Nachrichten
pub const PAYLOAD_BUFFER_SIZE: usize = 64;

/// Ausgehende Payload
pub type Payload = Vec<u8, PAYLOAD_BUFFER_SIZE>;

/// Status-Nachricht: `{"volume":47,"muted":false}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateMessage {
    pub volume: u8,
    pub muted: bool,
}

impl From<&VolumeSnapshot> for StateMessage {
    fn from(snapshot: &VolumeSnapshot) -> Self {
        Self {
            volume: snapshot.user_volume,
            muted: snapshot.muted,
        }
    }
}

/// Kommando-Nachricht: `{"command":31}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMessage {
    pub command: u8,
}

/// Eingehende Konfiguration: `{"volUp":true,"volDown":false,"mute":false}`
///
/// Fehlende Felder gelten als `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigMessage {
    #[serde(rename = "volUp", default)]
    pub vol_up: bool,
    #[serde(rename = "volDown", default)]
    pub vol_down: bool,
    #[serde(default)]
    pub mute: bool,
}

impl ConfigMessage {
    /// Parst eine Payload, ungültiges JSON → `None`
    pub fn parse(payload: &[u8]) -> Option<Self> {
        serde_json_core::from_slice::<Self>(payload)
            .ok()
            .map(|(msg, _)| msg)
    }

    /// Aktionen in fester Reihenfolge: lauter, leiser, Mute
    pub fn actions(&self) -> Vec<VolumeAction, 3> {
        let mut actions = Vec::new();
        for (requested, action) in [
            (self.vol_up, VolumeAction::Up),
            (self.vol_down, VolumeAction::Down),
            (self.mute, VolumeAction::ToggleMute),
        ] {
            if requested {
                let _ = actions.push(action);
            }
        }
        actions
    }
}

/// Serialisiert `msg` in eine Payload
pub fn encode<T: Serialize>(msg: &T) -> Option<Payload> {
    let mut buffer = [0u8; PAYLOAD_BUFFER_SIZE];
    let len = serde_json_core::to_slice(msg, &mut buffer).ok()?;
    Vec::from_slice(&buffer[..len]).ok()
}
