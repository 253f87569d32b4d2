//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in chime-core for the clock's peripherals:
//!
//! - Real-time clock (DS3231 over I2C)
//! - Temperature probe (DS18B20 over 1-Wire)
//! - Buzzer (GPIO output)
//! - Button panel (three GPIO inputs)

#![no_std]
#![deny(unsafe_code)]

pub mod input;
pub mod output;
pub mod rtc;
pub mod sensor;
