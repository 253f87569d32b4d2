//! Configuration types
//!
//! Board-agnostic configuration structures loaded from `clock.toml`.

pub mod types;

pub use types::*;
