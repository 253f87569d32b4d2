//! Display output
//!
//! The clock core hands over finished text screens. This sink streams them
//! over the defmt log; a panel driver plugs in behind the same
//! `ClockDisplay` trait.

pub mod log;

pub use log::LogDisplay;
