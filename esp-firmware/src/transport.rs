// Channel-basierter NetworkTransport für die Steuerlogik
//
// Die Steuerlogik läuft synchron im Control Task. Der eigentliche
// MQTT-Client lebt im MQTT Task; beide sind über zwei Channels verbunden.

use core::sync::atomic::Ordering;

use defmt::warn;
use esp_core::NetworkTransport;
use heapless::{String, Vec};

use crate::{InboundReceiver, MQTT_CONNECTED, MqttRequest, OutboundSender, WIFI_LINK_UP};

pub struct ChannelTransport {
    inbound: InboundReceiver,
    outbound: OutboundSender,
}

impl ChannelTransport {
    pub fn new(inbound: InboundReceiver, outbound: OutboundSender) -> Self {
        Self { inbound, outbound }
    }

    fn enqueue(&mut self, request: MqttRequest) -> bool {
        match self.outbound.try_send(request) {
            Ok(()) => true,
            Err(_) => {
                warn!("MQTT: Outbound queue full, dropping request");
                false
            }
        }
    }
}

impl NetworkTransport for ChannelTransport {
    fn pump(&mut self, handler: &mut dyn FnMut(&str, &[u8])) {
        // nur was jetzt schon in der Queue liegt, kein await
        while let Ok(message) = self.inbound.try_receive() {
            handler(message.topic.as_str(), &message.payload);
        }
    }

    fn is_connected(&self) -> bool {
        MQTT_CONNECTED.load(Ordering::Relaxed)
    }

    fn is_link_up(&self) -> bool {
        WIFI_LINK_UP.load(Ordering::Relaxed)
    }

    fn publish(&mut self, topic: &str, payload: &[u8]) -> bool {
        if !self.is_connected() {
            return false;
        }
        let (Ok(topic), Ok(payload)) = (String::try_from(topic), Vec::from_slice(payload)) else {
            warn!("MQTT: Message too large for outbound queue ({})", topic);
            return false;
        };
        self.enqueue(MqttRequest::Publish { topic, payload })
    }

    fn subscribe(&mut self, topic: &str) -> bool {
        let Ok(topic) = String::try_from(topic) else {
            warn!("MQTT: Topic too long: {}", topic);
            return false;
        };
        // Abo wird vom MQTT Task gemerkt und nach jedem Connect erneuert
        self.enqueue(MqttRequest::Subscribe { topic })
    }
}
