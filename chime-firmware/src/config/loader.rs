//! Configuration loading
//!
//! Parses the embedded `clock.toml` and checks it. Falls back to the
//! built-in defaults if either step fails; build.rs rejects a bad file
//! before it can reach a board, so the fallback only guards against a
//! parser mismatch.

use defmt::*;

use chime_core::config::ClockConfig;

use super::toml::{parse_config, ParseError};

/// Configuration errors
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// TOML parsing failed
    Parse(ParseError),
    /// Parsed values failed range checks
    Invalid(&'static str),
}

impl From<ParseError> for ConfigError {
    fn from(e: ParseError) -> Self {
        ConfigError::Parse(e)
    }
}

/// Parse and validate a configuration source
pub fn parse_and_validate(source: &str) -> Result<ClockConfig, ConfigError> {
    let config = parse_config(source)?;
    config.validate().map_err(ConfigError::Invalid)?;
    Ok(config)
}

/// Load the configuration, falling back to defaults on error
pub fn load_config(source: &str) -> ClockConfig {
    match parse_and_validate(source) {
        Ok(config) => {
            info!("Configuration loaded");
            log_config_summary(&config);
            config
        }
        Err(e) => {
            error!("Embedded configuration rejected: {:?}", e);
            warn!("Using default configuration");
            ClockConfig::default()
        }
    }
}

/// Log a summary of the loaded configuration
fn log_config_summary(config: &ClockConfig) {
    debug!(
        "  tick {} ms, splash {} ms",
        config.tick_interval_ms, config.splash_ms
    );
    debug!(
        "  long press {} ms, debounce {} ms, abandon {} ms, repeat {} ms",
        config.timing.long_press_ms,
        config.timing.advance_debounce_ms,
        config.timing.abandon_timeout_ms,
        config.timing.edit_repeat_ms
    );
    debug!(
        "  buzzer active_low={}, probe enabled={} ({} ms)",
        config.buzzer.active_low, config.probe.enabled, config.probe.conversion_ms
    );
}
