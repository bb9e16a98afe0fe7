// Task-Modul: Enthält alle Embassy Tasks
//
// Jeder Task läuft asynchron und unabhängig.
// Tasks kommunizieren über Embassy Channels (IR → Control, Control ↔ MQTT)
// und zwei Atomics für den Verbindungsstatus.

pub mod control;
pub mod ir;
pub mod mqtt;
pub mod wifi;

// Re-export Tasks für einfachen Import
pub use control::{SharedI2c, control_task};
pub use ir::ir_receiver_task;
pub use mqtt::mqtt_task;
pub use wifi::{connection_task, dhcp_task, net_task};
