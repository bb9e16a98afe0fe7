// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen

use esp_core::{AmpConfig, Topics};

// ============================================================================
// Verstärker / Steuerlogik
// ============================================================================

/// Steuerlogik-Konfiguration (Lautstärke 0-150, Mute = 0xFF, Display 10 s)
pub const AMP_CONFIG: AmpConfig = AmpConfig::new();

/// Intervall der Steuer-Schleife in Millisekunden
/// Jeder Tick pollt IR, MQTT-Channel, Decoder-Timeout und Display-Watchdog
pub const TICK_INTERVAL_MS: u64 = 5;

/// Wie lange der Splash-Screen nach dem Boot stehen bleibt
pub const SPLASH_DURATION_MS: u64 = 1500;

/// Splash-Screen Texte
pub const SPLASH_TITLE: &str = "JSN";
pub const SPLASH_SUBTITLE: &str = "Smart Speakers";

// ============================================================================
// I2C / IR Konfiguration
// ============================================================================

// Pin-Belegung steht in bin/main.rs (esp-hal Peripherals sind eigene Typen):
// SDA = GPIO6, SCL = GPIO7, IR-Empfänger = GPIO4

/// I2C Taktfrequenz in kHz
pub const I2C_FREQUENCY_KHZ: u32 = 400;

/// Kapazität des IR-Code Channels
pub const IR_CHANNEL_SIZE: usize = 4;

// ============================================================================
// WiFi Konfiguration
// ============================================================================

/// WiFi SSID (Netzwerk-Name)
/// Wird zur Build-Zeit aus der Environment Variable WIFI_SSID geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_SSID: &str = env!(
    "WIFI_SSID",
    "WiFi SSID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// WiFi Passwort
/// Wird zur Build-Zeit aus der Environment Variable WIFI_PASSWORD geladen
pub const WIFI_PASSWORD: &str = env!(
    "WIFI_PASSWORD",
    "WiFi Password nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Wartezeit nach WiFi-Fehler vor erneutem Versuch
pub const WIFI_RETRY_DELAY_SECS: u64 = 5;

/// Heap-Größe für WiFi (Bytes)
/// WiFi benötigt dynamischen Speicher für Pakete
pub const WIFI_HEAP_SIZE: usize = 65536; // 64 KB

/// Zusätzliche Heap-Größe (Bytes)
pub const EXTRA_HEAP_SIZE: usize = 36864; // 36 KB

// ============================================================================
// MQTT Konfiguration
// ============================================================================

/// MQTT Broker Hostname oder IP-Adresse
/// Wird zur Build-Zeit aus der Environment Variable MQTT_BROKER geladen
pub const MQTT_BROKER: &str = env!(
    "MQTT_BROKER",
    "MQTT Broker nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// MQTT Broker Port
/// Standard: 1883 (unverschlüsselt), 8883 (TLS)
pub const MQTT_PORT: u16 = 1883;

/// MQTT Client ID
pub const MQTT_CLIENT_ID: &str = match option_env!("MQTT_CLIENT_ID") {
    Some(id) => id,
    None => "TVSpeakers",
};

/// MQTT Benutzername
pub const MQTT_USERNAME: &str = env!(
    "MQTT_USERNAME",
    "MQTT Username nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// MQTT Passwort
pub const MQTT_PASSWORD: &str = env!(
    "MQTT_PASSWORD",
    "MQTT Password nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Topic für Status-Updates `{"volume":..,"muted":..}`
pub const MQTT_TOPIC_STATE: &str = match option_env!("MQTT_TOPIC_STATE") {
    Some(topic) => topic,
    None => "home/livingroom/tvspeakers/state",
};

/// Topic für IR-Kommandos `{"command":..}`
pub const MQTT_TOPIC_COMMAND: &str = match option_env!("MQTT_TOPIC_COMMAND") {
    Some(topic) => topic,
    None => "home/livingroom/tvspeakers/command",
};

/// Topic für eingehende Konfiguration `{"volUp":..,"volDown":..,"mute":..}`
pub const MQTT_TOPIC_CONFIG: &str = match option_env!("MQTT_TOPIC_CONFIG") {
    Some(topic) => topic,
    None => "home/livingroom/tvspeakers/config",
};

/// Alle Topics für die Steuerlogik
pub const TOPICS: Topics = Topics {
    state: MQTT_TOPIC_STATE,
    command: MQTT_TOPIC_COMMAND,
    config: MQTT_TOPIC_CONFIG,
};

/// MQTT Reconnect Delay in Sekunden
/// Wartezeit nach Verbindungsfehler vor erneutem Versuch
pub const MQTT_RECONNECT_DELAY_SECS: u64 = 5;

/// MQTT Keep-Alive in Sekunden (Ping-Intervall ist die Hälfte)
pub const MQTT_KEEP_ALIVE_SECS: u16 = 30;

/// MQTT Buffer-Größe in Bytes
/// Muss groß genug für MQTT-Pakete sein
pub const MQTT_BUFFER_SIZE: usize = 1024;

/// Maximale Topic-Länge für Channel-Nachrichten
pub const MQTT_TOPIC_MAX_LEN: usize = 64;

/// Maximale Payload-Länge für Channel-Nachrichten
pub const MQTT_PAYLOAD_MAX_LEN: usize = 128;

/// Maximale Anzahl gemerkter Abos (werden nach Reconnect erneuert)
pub const MQTT_MAX_SUBSCRIPTIONS: usize = 4;

/// Kapazität der MQTT Channels (je Richtung)
pub const MQTT_CHANNEL_SIZE: usize = 4;

/// DNS Query Timeout in Sekunden
pub const DNS_TIMEOUT_SECS: u64 = 10;
