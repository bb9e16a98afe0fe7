//! Änderungs-gesteuerter Status-Publisher
//!
//! Published den Lautstärke-Zustand nur, wenn er sich seit dem letzten
//! erfolgreichen Publish geändert hat und der Broker verbunden ist.
//! Fehlgeschlagene Publishes werden beim nächsten Timer-Ablauf wiederholt.

use crate::config::Millis;
use crate::protocol::{StateMessage, encode};
use crate::timer::PeriodicTimer;
use crate::traits::NetworkTransport;
use crate::volume::VolumeState;

/// Ergebnis eines Publish-Versuchs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Timer noch nicht abgelaufen
    NotDue,
    /// Keine Änderung seit dem letzten Publish
    Unchanged,
    /// Broker nicht verbunden, Dirty-Flag bleibt gesetzt
    Disconnected,
    /// Transport hat den Publish abgelehnt
    Failed,
    Published(StateMessage),
}

#[derive(Debug, Clone)]
pub struct StatePublisher {
    topic: &'static str,
    timer: PeriodicTimer,
}

impl StatePublisher {
    pub fn new(topic: &'static str, interval_ms: Millis, now: Millis) -> Self {
        Self {
            topic,
            timer: PeriodicTimer::new(interval_ms, now),
        }
    }

    /// Muss jeden Tick aufgerufen werden
    pub fn poll<N: NetworkTransport>(
        &mut self,
        volume: &mut VolumeState,
        transport: &mut N,
        now: Millis,
    ) -> PublishOutcome {
        if !self.timer.poll(now) {
            return PublishOutcome::NotDue;
        }
        self.publish(volume, transport)
    }

    /// Publish ohne Timer-Prüfung (Gate: Dirty-Flag und Verbindung)
    pub fn publish<N: NetworkTransport>(
        &mut self,
        volume: &mut VolumeState,
        transport: &mut N,
    ) -> PublishOutcome {
        if !volume.is_dirty() {
            return PublishOutcome::Unchanged;
        }
        if !transport.is_connected() {
            debug!("Publisher: broker offline, keeping state dirty");
            return PublishOutcome::Disconnected;
        }

        let msg = StateMessage::from(&volume.snapshot());
        let Some(payload) = encode(&msg) else {
            warn!("Publisher: state payload too large");
            return PublishOutcome::Failed;
        };

        if !transport.publish(self.topic, &payload) {
            warn!("Publisher: publish rejected, retrying next period");
            return PublishOutcome::Failed;
        }

        volume.clear_dirty();
        info!(
            "Publisher: published volume={} muted={}",
            msg.volume, msg.muted
        );
        PublishOutcome::Published(msg)
    }
}
