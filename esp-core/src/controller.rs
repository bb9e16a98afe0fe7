//! Steuer-Schleife (kooperativer Scheduler)
//!
//! Ein `AmpController` besitzt den gesamten Zustand und alle Kollaborateure.
//! Jeder Aufruf von [`AmpController::tick`] arbeitet eine feste,
//! nicht-blockierende Reihenfolge ab:
//!
//! 1. IR-Quelle pollen, Code an den Decoder
//! 2. Netzwerk-Transport pumpen (eingehende Konfiguration anwenden)
//! 3. Kommando-Timeout des Decoders prüfen
//! 4. Display-Watchdog prüfen
//! 5. Verbindungs-Status auffrischen (periodisch)
//! 6. Status publishen (periodisch, nur bei Änderung)
//!
//! Ein frischer Tastendruck wird dadurch immer vor dem Display-Watchdog
//! desselben Ticks verarbeitet.

use heapless::Vec;

use crate::config::{AMP_INIT_SEQUENCE, AmpConfig, IrCodeMap, Millis, Topics};
use crate::decoder::{CommandDecoder, DecoderEvent};
use crate::display::DisplayPresenter;
use crate::protocol::{CommandMessage, ConfigMessage, encode};
use crate::publisher::{PublishOutcome, StatePublisher};
use crate::timer::PeriodicTimer;
use crate::traits::{DisplaySurface, IrSource, NetworkTransport, RegisterSink};
use crate::volume::{VolumeAction, VolumeState};

/// Maximal pro Tick angewendete Aktionen aus eingehenden Nachrichten
const MAX_INBOUND_ACTIONS: usize = 12;

/// Kollaborateure des Controllers
pub struct Peripherals<S, D, N, I> {
    pub sink: S,
    pub display: D,
    pub transport: N,
    pub ir: I,
}

pub struct AmpController<S, D, N, I>
where
    S: RegisterSink,
    D: DisplaySurface,
    N: NetworkTransport,
    I: IrSource,
{
    config: AmpConfig,
    topics: Topics,
    volume: VolumeState,
    decoder: CommandDecoder,
    presenter: DisplayPresenter<D>,
    publisher: StatePublisher,
    connection_check: PeriodicTimer,
    sink: S,
    transport: N,
    ir: I,
    bus_errors: u32,
}

impl<S, D, N, I> AmpController<S, D, N, I>
where
    S: RegisterSink,
    D: DisplaySurface,
    N: NetworkTransport,
    I: IrSource,
{
    pub fn new(
        peripherals: Peripherals<S, D, N, I>,
        config: AmpConfig,
        codes: IrCodeMap,
        topics: Topics,
        now: Millis,
    ) -> Self {
        Self {
            volume: VolumeState::new(&config),
            decoder: CommandDecoder::new(codes, &config),
            presenter: DisplayPresenter::new(peripherals.display, &config),
            publisher: StatePublisher::new(topics.state, config.publish_interval_ms, now),
            connection_check: PeriodicTimer::new(config.connection_check_interval_ms, now),
            sink: peripherals.sink,
            transport: peripherals.transport,
            ir: peripherals.ir,
            config,
            topics,
            bus_errors: 0,
        }
    }

    /// Boot-Bildschirm, bleibt bis zum ersten Rendern stehen
    pub fn show_splash(&mut self, title: &str, subtitle: &str, now: Millis) {
        self.presenter.show_splash(title, subtitle, now);
    }

    /// Boot-Sequenz: Codec-Init, Abo, Start-Lautstärke setzen und anzeigen
    pub fn start(&mut self, now: Millis) {
        for (register, value) in AMP_INIT_SEQUENCE {
            self.write_register(register, value);
        }

        self.refresh_connectivity();
        if !self.transport.subscribe(self.topics.config) {
            warn!("Control: subscribe to config topic failed");
        }

        let value = self.volume.register_value();
        self.write_register(self.config.volume_register, value);
        self.presenter.render(&self.volume.snapshot(), now);
        self.volume.mark_dirty();
        info!(
            "Control: started at level {} (volume {})",
            self.volume.level(),
            self.volume.user_volume()
        );
    }

    /// Ein Durchlauf der Steuer-Schleife
    pub fn tick(&mut self, now: Millis) {
        // 1. IR
        if let Some(code) = self.ir.try_decode() {
            debug!("IR: code {}", code);
            match self.decoder.on_code(code, now) {
                Some(DecoderEvent::Volume(action)) => self.apply(action, now),
                Some(DecoderEvent::Command(command)) => self.emit_command(command, now),
                // erste Ziffer oder entprellt: Display trotzdem wach halten
                None if self.decoder.recognizes(code) => {
                    self.presenter.wake(&self.volume.snapshot(), now);
                }
                None => {}
            }
        }

        // 2. Netzwerk
        let mut actions: Vec<VolumeAction, MAX_INBOUND_ACTIONS> = Vec::new();
        let config_topic = self.topics.config;
        self.transport.pump(&mut |topic: &str, payload: &[u8]| {
            collect_config_actions(config_topic, topic, payload, &mut actions);
        });
        for action in actions {
            self.apply(action, now);
        }

        // 3. Kommando-Timeout
        if let Some(command) = self.decoder.poll_timeout(now) {
            self.emit_command(command, now);
        }

        // 4. Display-Watchdog
        self.presenter.poll_blank(self.volume.is_muted(), now);

        // 5. Verbindungs-Status
        if self.connection_check.poll(now) {
            self.refresh_connectivity();
        }

        // 6. Status-Publish
        if let PublishOutcome::Disconnected =
            self.publisher
                .poll(&mut self.volume, &mut self.transport, now)
        {
            // Verbindungs-Icon sofort korrigieren
            self.refresh_connectivity();
        }
    }

    /// Lautstärke-Aktion: Zustand ändern, Register schreiben, neu zeichnen
    pub fn apply(&mut self, action: VolumeAction, now: Millis) {
        let value = self.volume.apply(action);
        self.write_register(self.config.volume_register, value);
        self.presenter.render(&self.volume.snapshot(), now);
        self.volume.mark_dirty();
        info!(
            "Control: {} -> level {} muted {}",
            action,
            self.volume.level(),
            self.volume.is_muted()
        );
    }

    fn emit_command(&mut self, command: u8, now: Millis) {
        info!("Control: command {}", command);
        match encode(&CommandMessage { command }) {
            Some(payload) => {
                if !self.transport.publish(self.topics.command, &payload) {
                    warn!("Control: command {} not published (offline)", command);
                }
            }
            None => warn!("Control: command payload too large"),
        }
        self.presenter
            .show_command(command, &self.volume.snapshot(), now);
    }

    fn refresh_connectivity(&mut self) {
        let link_up = self.transport.is_link_up();
        let connected = self.transport.is_connected();
        if self.presenter.set_connectivity(link_up, connected) {
            info!("Control: link={} broker={}", link_up, connected);
        }
    }

    fn write_register(&mut self, register: u8, value: u8) {
        if let Err(e) = self
            .sink
            .write_register(self.config.amp_address, register, value)
        {
            self.bus_errors = self.bus_errors.wrapping_add(1);
            warn!("Control: register {} write failed: {}", register, e);
        }
    }

    pub fn volume(&self) -> &VolumeState {
        &self.volume
    }

    pub fn decoder(&self) -> &CommandDecoder {
        &self.decoder
    }

    pub fn presenter(&self) -> &DisplayPresenter<D> {
        &self.presenter
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn transport(&self) -> &N {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut N {
        &mut self.transport
    }

    pub fn ir_mut(&mut self) -> &mut I {
        &mut self.ir
    }

    /// Anzahl fehlgeschlagener Register-Schreibzugriffe seit Boot
    pub fn bus_errors(&self) -> u32 {
        self.bus_errors
    }
}

/// Handler für eingehende Nachrichten
///
/// Nur das Konfigurations-Topic wird ausgewertet, ungültige Payloads
/// werden ignoriert.
pub fn collect_config_actions<const N: usize>(
    config_topic: &str,
    topic: &str,
    payload: &[u8],
    actions: &mut Vec<VolumeAction, N>,
) {
    if topic != config_topic {
        return;
    }
    match ConfigMessage::parse(payload) {
        Some(msg) => {
            for action in msg.actions() {
                if actions.push(action).is_err() {
                    warn!("Control: too many inbound actions, dropping");
                    return;
                }
            }
        }
        None => debug!("Control: ignoring malformed config message"),
    }
}
