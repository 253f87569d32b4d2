//! Board-agnostic core logic for the Chime alarm clock firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (RTC, temperature, buttons, buzzer, display)
//! - Calendar arithmetic and daylight shifting
//! - Persisted settings and the flags byte layout
//! - Setup menu state machine
//! - Alarm monitor
//! - Screen layout
//! - The clock cycle tying it all together

#![no_std]
#![deny(unsafe_code)]

pub mod alarm;
pub mod config;
pub mod cycle;
pub mod display;
pub mod settings;
pub mod setup;
pub mod time;
pub mod traits;
