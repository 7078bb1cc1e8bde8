//! Alert model: kinds, events, and the cooldown gate.

pub mod alert_types;
pub mod cooldown;

pub use alert_types::{colors, AlertEvent, AlertKind};
pub use cooldown::CooldownGate;
