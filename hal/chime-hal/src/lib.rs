//! Chime Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs. The clock logic and the device drivers only talk
//! to these traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (chime-firmware)           │
//! └─────────────────────────────────────────┘
//!          │                     │
//!          ▼                     ▼
//! ┌─────────────────┐   ┌─────────────────┐
//! │  chime-core     │   │  chime-drivers  │
//! └─────────────────┘   └─────────────────┘
//!          │                     │
//!          ▼                     ▼
//! ┌─────────────────────────────────────────┐
//! │  chime-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ chime-hal-    │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`onewire::OneWireBus`] - 1-Wire master
//! - [`storage::ByteStorage`] - Persistent settings cells

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod onewire;
pub mod storage;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OutputPin, Polarity};
pub use onewire::OneWireBus;
pub use storage::{ByteStorage, StorageAddress, StorageError};
