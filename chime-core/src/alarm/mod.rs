//! Alarm monitoring
//!
//! Drives the buzzer from the alarm schedule and the wall clock.

pub mod monitor;

pub use monitor::{AlarmEvent, AlarmMonitor, AlarmPhase};
