// Hardware Abstraction Layer (HAL) Module
//
// Implementiert die Traits aus esp-core für die echte Hardware:
// Codec-Register und OLED teilen sich einen I2C-Bus, IR kommt über GPIO.

pub mod ir_receiver;
pub mod oled;
pub mod register_sink;

pub use ir_receiver::{ChannelIrSource, Samsung32Decoder};
pub use oled::OledSurface;
pub use register_sink::I2cRegisterSink;
