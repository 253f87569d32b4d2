//! Configuration loading and parsing
//!
//! The configuration is `clock.toml`, embedded at compile time and parsed
//! by a small no_std parser.

pub mod loader;
pub mod toml;

pub use loader::{load_config, ConfigError};
pub use toml::parse_config;
