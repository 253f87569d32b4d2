//! RP2040-specific HAL for the alarm clock firmware
//!
//! This crate provides RP2040 implementations of the shared `chime-hal`
//! traits:
//!
//! - GPIO adapters over embassy-rp pins
//! - Bit-banged 1-Wire master on a flexible pin
//! - EEPROM-style byte cells emulated in flash (implements
//!   `chime_hal::ByteStorage`)

#![no_std]
#![deny(unsafe_code)]

pub mod flash;
pub mod gpio;
pub mod onewire;

pub use flash::FlashByteStorage;
pub use gpio::{RpInput, RpOutput};
pub use onewire::{FlexOneWire, OneWireError};
