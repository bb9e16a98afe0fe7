// MQTT Task - Verbindung zum Broker, Publish/Subscribe für die Steuerlogik
use core::sync::atomic::Ordering;

use defmt::{Debug2Format, error, info, warn};
use embassy_futures::select::{Either3, select3};
use embassy_net::{IpAddress, Stack, dns::DnsQueryType, tcp::TcpSocket};
use embassy_time::{Duration, Timer, with_timeout};
use heapless::Vec;

use rust_mqtt::client::client::MqttClient;
use rust_mqtt::client::client_config::{ClientConfig, MqttVersion};
use rust_mqtt::packet::v5::publish_packet::QualityOfService;
use rust_mqtt::utils::rng_generator::CountingRng;
use rust_mqtt::utils::types::EncodedString;

use crate::config::*;
use crate::{InboundMessage, InboundSender, MQTT_CONNECTED, MqttRequest, OutboundReceiver, TopicString};

/// Gemerkte Abos, werden nach jedem Reconnect erneut angemeldet
type Subscriptions = Vec<TopicString, MQTT_MAX_SUBSCRIPTIONS>;

/// MQTT Task - läuft parallel zu anderen Tasks
///
/// - Wartet auf Netzwerk-Verbindung
/// - Verbindet sich mit MQTT Broker (mit Benutzername/Passwort)
/// - Meldet alle gemerkten Abos an
/// - Leitet eingehende Nachrichten an die Steuerlogik weiter
/// - Führt Publish-/Subscribe-Aufträge der Steuerlogik aus
/// - Automatisches Reconnect bei Fehlern
///
/// Der Verbindungsstatus steht in [`MQTT_CONNECTED`].
#[embassy_executor::task]
pub async fn mqtt_task(
    stack: &'static Stack<'static>,
    outbound: OutboundReceiver,
    inbound: InboundSender,
) {
    info!("MQTT: Task started, waiting for network...");
    let mut subscriptions = Subscriptions::new();

    loop {
        wait_for_network(stack).await;
        info!("MQTT: Network ready");

        match mqtt_session(stack, &outbound, &inbound, &mut subscriptions).await {
            Ok(_) => warn!("MQTT: Connection closed normally"),
            Err(e) => error!("MQTT: Error: {}", e),
        }
        MQTT_CONNECTED.store(false, Ordering::Relaxed);

        info!("MQTT: Reconnecting in {}s...", MQTT_RECONNECT_DELAY_SECS);
        Timer::after(Duration::from_secs(MQTT_RECONNECT_DELAY_SECS)).await;
    }
}

/// Wartet bis Netzwerk-Verbindung verfügbar ist
///
/// Prüft kontinuierlich Link-Status und DHCP-Konfiguration.
async fn wait_for_network(stack: &'static Stack<'static>) {
    loop {
        if stack.is_link_up() && stack.config_v4().is_some() {
            break;
        }
        Timer::after(Duration::from_millis(500)).await;
    }
}

/// Ereignis aus einem Durchlauf der Session-Schleife
///
/// Eingehende Nachrichten werden sofort aus dem Client-Puffer kopiert,
/// damit der Client danach wieder frei ist.
enum SessionEvent {
    Request(MqttRequest),
    Inbound(Option<InboundMessage>),
    ReceiveFailed,
    PingDue,
}

/// Eine MQTT-Session: Connect, Abos, dann Nachrichten-Schleife
///
/// Bei jedem Fehler wird die Funktion beendet und der Haupt-Loop
/// startet automatisch einen Reconnect-Versuch.
async fn mqtt_session(
    stack: &'static Stack<'static>,
    outbound: &OutboundReceiver,
    inbound: &InboundSender,
    subscriptions: &mut Subscriptions,
) -> Result<(), MqttError> {
    // DNS Lookup
    info!("MQTT: Resolving '{}'...", MQTT_BROKER);
    let broker_ip = resolve_hostname(stack, MQTT_BROKER).await?;
    info!("MQTT: Resolved to {}", Debug2Format(&broker_ip));

    // TCP Connect
    let mut rx_buffer = [0u8; 2048];
    let mut tx_buffer = [0u8; 2048];
    let mut socket = TcpSocket::new(*stack, &mut rx_buffer, &mut tx_buffer);
    socket.set_timeout(Some(Duration::from_secs(u64::from(MQTT_KEEP_ALIVE_SECS) * 2)));

    socket
        .connect((broker_ip, MQTT_PORT))
        .await
        .map_err(|_| MqttError::ConnectionFailed)?;
    info!("MQTT: TCP connected");

    // MQTT Client Configuration
    let rng = CountingRng(20000);
    let mut config = ClientConfig::<5, _>::new(MqttVersion::MQTTv5, rng);
    config.client_id = EncodedString {
        string: MQTT_CLIENT_ID,
        len: MQTT_CLIENT_ID.len() as u16,
    };
    config.add_username(MQTT_USERNAME);
    config.add_password(MQTT_PASSWORD);
    config.keep_alive = MQTT_KEEP_ALIVE_SECS;
    config.max_packet_size = MQTT_BUFFER_SIZE as u32;

    // MQTT Buffer
    let mut send_buffer = [0u8; MQTT_BUFFER_SIZE];
    let mut recv_buffer = [0u8; MQTT_BUFFER_SIZE];

    let mut client = MqttClient::<_, 5, _>::new(
        socket,
        &mut send_buffer,
        MQTT_BUFFER_SIZE,
        &mut recv_buffer,
        MQTT_BUFFER_SIZE,
        config,
    );

    // MQTT CONNECT
    client
        .connect_to_broker()
        .await
        .map_err(|_| MqttError::ProtocolError)?;
    info!("MQTT: Connected to broker as '{}'", MQTT_CLIENT_ID);

    // Abos erneuern (nach Reconnect gehen sie beim Broker verloren)
    for topic in subscriptions.iter() {
        client
            .subscribe_to_topic(topic.as_str())
            .await
            .map_err(|_| MqttError::SubscribeFailed)?;
        info!("MQTT: Subscribed to '{}'", topic.as_str());
    }
    MQTT_CONNECTED.store(true, Ordering::Relaxed);

    let ping_interval = Duration::from_secs(u64::from(MQTT_KEEP_ALIVE_SECS) / 2);

    loop {
        let event = match select3(
            outbound.receive(),
            client.receive_message(),
            Timer::after(ping_interval),
        )
        .await
        {
            Either3::First(request) => SessionEvent::Request(request),
            Either3::Second(Ok((topic, payload))) => {
                SessionEvent::Inbound(InboundMessage::copy_from(topic, payload))
            }
            Either3::Second(Err(_)) => SessionEvent::ReceiveFailed,
            Either3::Third(()) => SessionEvent::PingDue,
        };

        match event {
            SessionEvent::Request(MqttRequest::Publish { topic, payload }) => {
                client
                    .send_message(
                        topic.as_str(),
                        &payload,
                        QualityOfService::QoS0,
                        false,
                    )
                    .await
                    .map_err(|_| MqttError::PublishFailed)?;
                info!("MQTT: Published to '{}'", topic.as_str());
            }
            SessionEvent::Request(MqttRequest::Subscribe { topic }) => {
                client
                    .subscribe_to_topic(topic.as_str())
                    .await
                    .map_err(|_| MqttError::SubscribeFailed)?;
                info!("MQTT: Subscribed to '{}'", topic.as_str());
                remember(subscriptions, topic);
            }
            SessionEvent::Inbound(Some(message)) => {
                if inbound.try_send(message).is_err() {
                    warn!("MQTT: Inbound queue full, dropping message");
                }
            }
            SessionEvent::Inbound(None) => {
                warn!("MQTT: Inbound message too large, dropped");
            }
            SessionEvent::ReceiveFailed => return Err(MqttError::ReceiveFailed),
            SessionEvent::PingDue => {
                client
                    .send_ping()
                    .await
                    .map_err(|_| MqttError::PingFailed)?;
            }
        }
    }
}

/// Merkt sich ein Abo (ohne Duplikate) für den nächsten Reconnect
fn remember(subscriptions: &mut Subscriptions, topic: TopicString) {
    if subscriptions.contains(&topic) {
        return;
    }
    if subscriptions.push(topic).is_err() {
        warn!("MQTT: Subscription list full");
    }
}

/// Löst Hostname zu IPv4-Adresse auf
///
/// Nutzt embassy-net DNS-Stack mit konfigurierbarem Timeout.
async fn resolve_hostname(
    stack: &'static Stack<'static>,
    hostname: &str,
) -> Result<embassy_net::Ipv4Address, MqttError> {
    let result = with_timeout(
        Duration::from_secs(DNS_TIMEOUT_SECS),
        stack.dns_query(hostname, DnsQueryType::A),
    )
    .await;

    match result {
        Ok(Ok(addrs)) => addrs
            .iter()
            .find_map(|addr| match addr {
                IpAddress::Ipv4(ipv4) => Some(*ipv4),
                #[allow(unreachable_patterns)]
                _ => None,
            })
            .ok_or(MqttError::DnsResolutionFailed),
        Ok(Err(_)) => Err(MqttError::DnsResolutionFailed),
        Err(_) => Err(MqttError::DnsTimeout),
    }
}

/// MQTT Fehler-Typen
///
/// Alle möglichen Fehler die während einer MQTT-Session auftreten können.
#[derive(Debug)]
enum MqttError {
    DnsResolutionFailed,
    DnsTimeout,
    ConnectionFailed,
    ProtocolError,
    SubscribeFailed,
    PublishFailed,
    ReceiveFailed,
    PingFailed,
}

impl defmt::Format for MqttError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            MqttError::DnsResolutionFailed => defmt::write!(fmt, "DNS failed"),
            MqttError::DnsTimeout => defmt::write!(fmt, "DNS timeout"),
            MqttError::ConnectionFailed => defmt::write!(fmt, "Connection failed"),
            MqttError::ProtocolError => defmt::write!(fmt, "Protocol error"),
            MqttError::SubscribeFailed => defmt::write!(fmt, "Subscribe failed"),
            MqttError::PublishFailed => defmt::write!(fmt, "Publish failed"),
            MqttError::ReceiveFailed => defmt::write!(fmt, "Receive failed"),
            MqttError::PingFailed => defmt::write!(fmt, "Ping failed"),
        }
    }
}
