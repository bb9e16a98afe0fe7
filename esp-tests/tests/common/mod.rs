//! Gemeinsame Mocks für die Integration Tests
//!
//! Alle Mocks zeichnen ihre Aufrufe auf, damit Tests die Reihenfolge und
//! Inhalte der Hardware-Zugriffe prüfen können.

#![allow(dead_code)]

use std::collections::VecDeque;

use esp_core::{
    AmpConfig, AmpController, BusError, DisplayError, DisplaySurface, Font, Glyph, IrCodeMap,
    IrSource, NetworkTransport, Peripherals, RegisterSink, Topics,
};

// ============================================================================
// Mock Register Sink
// ============================================================================

#[derive(Default)]
pub struct MockRegisterSink {
    /// (Adresse, Register, Wert)
    pub writes: Vec<(u8, u8, u8)>,
    pub fail_next_write: bool,
}

impl MockRegisterSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zuletzt geschriebener Wert für `register`
    pub fn last_value(&self, register: u8) -> Option<u8> {
        self.writes
            .iter()
            .rev()
            .find(|(_, reg, _)| *reg == register)
            .map(|(_, _, value)| *value)
    }
}

impl RegisterSink for MockRegisterSink {
    fn write_register(&mut self, address: u8, register: u8, value: u8) -> Result<(), BusError> {
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(BusError::NoAcknowledge);
        }
        self.writes.push((address, register, value));
        Ok(())
    }
}

// ============================================================================
// Mock Display
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    Clear,
    Text(String),
    Glyph { x: i32, y: i32, width: u16 },
    Present,
}

#[derive(Default)]
pub struct MockDisplay {
    pub calls: Vec<DrawCall>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texte seit dem letzten `clear()`
    pub fn visible_texts(&self) -> Vec<String> {
        let start = self
            .calls
            .iter()
            .rposition(|call| *call == DrawCall::Clear)
            .map_or(0, |index| index + 1);
        self.calls[start..]
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn present_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| **call == DrawCall::Present)
            .count()
    }
}

impl DisplaySurface for MockDisplay {
    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn draw_text(&mut self, _x: i32, _y: i32, _font: Font, text: &str) {
        self.calls.push(DrawCall::Text(text.into()));
    }

    fn draw_glyph(&mut self, x: i32, y: i32, glyph: &Glyph) {
        self.calls.push(DrawCall::Glyph {
            x,
            y,
            width: glyph.width,
        });
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        self.calls.push(DrawCall::Present);
        Ok(())
    }
}

// ============================================================================
// Mock Transport
// ============================================================================

pub struct MockTransport {
    pub connected: bool,
    pub link_up: bool,
    /// Eingehende Nachrichten für den nächsten `pump()`
    pub inbound: VecDeque<(String, Vec<u8>)>,
    pub published: Vec<(String, String)>,
    pub subscriptions: Vec<String>,
    pub pump_count: usize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            connected: true,
            link_up: true,
            inbound: VecDeque::new(),
            published: Vec::new(),
            subscriptions: Vec::new(),
            pump_count: 0,
        }
    }

    pub fn push_inbound(&mut self, topic: &str, payload: &str) {
        self.inbound
            .push_back((topic.into(), payload.as_bytes().to_vec()));
    }

    pub fn published_on(&self, topic: &str) -> Vec<String> {
        self.published
            .iter()
            .filter(|(t, _)| t == topic)
            .map(|(_, payload)| payload.clone())
            .collect()
    }
}

impl NetworkTransport for MockTransport {
    fn pump(&mut self, handler: &mut dyn FnMut(&str, &[u8])) {
        self.pump_count += 1;
        while let Some((topic, payload)) = self.inbound.pop_front() {
            handler(&topic, &payload);
        }
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn is_link_up(&self) -> bool {
        self.link_up
    }

    fn publish(&mut self, topic: &str, payload: &[u8]) -> bool {
        if !self.connected {
            return false;
        }
        self.published.push((
            topic.into(),
            String::from_utf8(payload.to_vec()).unwrap(),
        ));
        true
    }

    fn subscribe(&mut self, topic: &str) -> bool {
        self.subscriptions.push(topic.into());
        self.connected
    }
}

// ============================================================================
// Mock IR Source
// ============================================================================

#[derive(Default)]
pub struct MockIr {
    pub codes: VecDeque<u64>,
}

impl MockIr {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IrSource for MockIr {
    fn try_decode(&mut self) -> Option<u64> {
        self.codes.pop_front()
    }
}

// ============================================================================
// Helpers
// ============================================================================

pub type TestController = AmpController<MockRegisterSink, MockDisplay, MockTransport, MockIr>;

pub const CODES: IrCodeMap = IrCodeMap::samsung();
pub const VOLUME_REGISTER: u8 = 0x07;

pub fn controller_with(config: AmpConfig) -> TestController {
    let peripherals = Peripherals {
        sink: MockRegisterSink::new(),
        display: MockDisplay::new(),
        transport: MockTransport::new(),
        ir: MockIr::new(),
    };
    let mut controller = AmpController::new(peripherals, config, CODES, Topics::default(), 0);
    controller.start(0);
    controller
}

pub fn controller() -> TestController {
    controller_with(AmpConfig::new())
}

/// Drückt eine Taste und führt einen Tick aus
pub fn press(controller: &mut TestController, code: u64, now: u64) {
    controller.ir_mut().codes.push_back(code);
    controller.tick(now);
}
