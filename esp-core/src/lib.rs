//! ESP Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert die Traits für die Kollaborateure (Codec, Display,
//! MQTT, IR) sowie die komplette Steuerlogik des Verstärkers.

#![no_std]

#[macro_use]
mod fmt;

pub mod config;
pub mod controller;
pub mod decoder;
pub mod display;
pub mod icons;
pub mod protocol;
pub mod publisher;
pub mod timer;
pub mod traits;
pub mod volume;

// Re-exports für einfachen Zugriff
pub use config::{AMP_INIT_SEQUENCE, AmpConfig, IrCodeMap, Millis, StepBand, Topics};
pub use controller::{AmpController, Peripherals, collect_config_actions};
pub use decoder::{CommandDecoder, DecoderEvent, IrKey, PendingCommand};
pub use display::{DisplayPresenter, Screen};
pub use protocol::{CommandMessage, ConfigMessage, StateMessage};
pub use publisher::{PublishOutcome, StatePublisher};
pub use timer::PeriodicTimer;
pub use traits::{
    BusError, DisplayError, DisplaySurface, Font, Glyph, IrSource, NetworkTransport, RegisterSink,
};
pub use volume::{VolumeAction, VolumeSnapshot, VolumeState, step_size};
