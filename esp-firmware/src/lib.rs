// Library-Root: Hardware-Anbindung und Tasks der Verstärker-Steuerung
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;
pub mod transport;

use core::sync::atomic::AtomicBool;

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use heapless::{String, Vec};

use crate::config::{IR_CHANNEL_SIZE, MQTT_CHANNEL_SIZE, MQTT_PAYLOAD_MAX_LEN, MQTT_TOPIC_MAX_LEN};

// ============================================================================
// Verbindungs-Flags
// ============================================================================
//
// Werden von WiFi- bzw. MQTT-Task geschrieben und von der Steuerlogik
// (über ChannelTransport) gelesen. Alle Tasks laufen auf einem Executor.

/// WLAN-Link steht (gesetzt vom WiFi Task)
pub static WIFI_LINK_UP: AtomicBool = AtomicBool::new(false);

/// MQTT-Session zum Broker steht (gesetzt vom MQTT Task)
pub static MQTT_CONNECTED: AtomicBool = AtomicBool::new(false);

// ============================================================================
// Nachrichten zwischen Steuerlogik und MQTT Task
// ============================================================================

pub type TopicString = String<MQTT_TOPIC_MAX_LEN>;
pub type PayloadBytes = Vec<u8, MQTT_PAYLOAD_MAX_LEN>;

/// Eingehende MQTT-Nachricht (MQTT Task → Steuerlogik)
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub topic: TopicString,
    pub payload: PayloadBytes,
}

impl InboundMessage {
    /// Kopiert Topic und Payload aus dem Client-Puffer
    ///
    /// `None` wenn eines davon nicht in die festen Puffer passt.
    pub fn copy_from(topic: &str, payload: &[u8]) -> Option<Self> {
        Some(Self {
            topic: String::try_from(topic).ok()?,
            payload: Vec::from_slice(payload).ok()?,
        })
    }
}

/// Auftrag an den MQTT Task (Steuerlogik → MQTT Task)
#[derive(Debug, Clone)]
pub enum MqttRequest {
    Publish {
        topic: TopicString,
        payload: PayloadBytes,
    },
    Subscribe {
        topic: TopicString,
    },
}

// ============================================================================
// Type-Aliase für Channel-Typen
// ============================================================================

/// Channel für eingehende MQTT-Nachrichten
pub type InboundChannel = Channel<NoopRawMutex, InboundMessage, MQTT_CHANNEL_SIZE>;
pub type InboundSender = Sender<'static, NoopRawMutex, InboundMessage, MQTT_CHANNEL_SIZE>;
pub type InboundReceiver = Receiver<'static, NoopRawMutex, InboundMessage, MQTT_CHANNEL_SIZE>;

/// Channel für Publish-/Subscribe-Aufträge
pub type OutboundChannel = Channel<NoopRawMutex, MqttRequest, MQTT_CHANNEL_SIZE>;
pub type OutboundSender = Sender<'static, NoopRawMutex, MqttRequest, MQTT_CHANNEL_SIZE>;
pub type OutboundReceiver = Receiver<'static, NoopRawMutex, MqttRequest, MQTT_CHANNEL_SIZE>;

/// Channel für dekodierte IR-Codes (IR Task → Steuerlogik)
pub type IrCodeChannel = Channel<NoopRawMutex, u64, IR_CHANNEL_SIZE>;
pub type IrCodeSender = Sender<'static, NoopRawMutex, u64, IR_CHANNEL_SIZE>;
pub type IrCodeReceiver = Receiver<'static, NoopRawMutex, u64, IR_CHANNEL_SIZE>;
