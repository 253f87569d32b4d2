//! Configuration type definitions
//!
//! These types describe the appliance configuration. The firmware embeds it
//! as `clock.toml`; the build script checks the same file against these
//! types through serde.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Setup workflow timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct TimingConfig {
    /// How long SET must be held to open the setup menu (ms)
    pub long_press_ms: u32,
    /// Minimum time on a step before SET moves on (ms)
    pub advance_debounce_ms: u32,
    /// Inactivity after which a setup session is dropped (ms)
    pub abandon_timeout_ms: u32,
    /// Input blackout after each INC/DEC edit (ms)
    pub edit_repeat_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            long_press_ms: 2000,
            advance_debounce_ms: 500,
            abandon_timeout_ms: 12000,
            edit_repeat_ms: 500,
        }
    }
}

/// Buzzer drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct BuzzerConfig {
    /// Buzzer sounds when its pin is driven low
    pub active_low: bool,
}

impl Default for BuzzerConfig {
    fn default() -> Self {
        Self { active_low: true }
    }
}

/// External DS18B20 temperature probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ProbeConfig {
    /// Probe fitted; when false the probe line shows the fault reading
    pub enabled: bool,
    /// Wait between starting a conversion and reading it (ms)
    pub conversion_ms: u16,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            conversion_ms: 750,
        }
    }
}

/// Complete appliance configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ClockConfig {
    pub timing: TimingConfig,
    pub buzzer: BuzzerConfig,
    pub probe: ProbeConfig,
    /// Period of the clock cycle (ms)
    pub tick_interval_ms: u32,
    /// How long the start-up banner stays on screen (ms)
    pub splash_ms: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            timing: TimingConfig::default(),
            buzzer: BuzzerConfig::default(),
            probe: ProbeConfig::default(),
            tick_interval_ms: 50,
            splash_ms: 2000,
        }
    }
}

impl ClockConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Check value ranges
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), &'static str> {
        let timing = &self.timing;
        if self.tick_interval_ms == 0 || self.tick_interval_ms > 500 {
            return Err("tick_interval_ms must be 1-500");
        }
        if timing.long_press_ms < self.tick_interval_ms {
            return Err("timing.long_press_ms must be at least one tick");
        }
        if timing.abandon_timeout_ms <= timing.advance_debounce_ms {
            return Err("timing.abandon_timeout_ms must exceed advance_debounce_ms");
        }
        if timing.abandon_timeout_ms <= timing.edit_repeat_ms {
            return Err("timing.abandon_timeout_ms must exceed edit_repeat_ms");
        }
        if self.probe.conversion_ms > 2000 {
            return Err("probe.conversion_ms must be 0-2000");
        }
        if self.splash_ms > 10_000 {
            return Err("splash_ms must be 0-10000");
        }
        Ok(())
    }
}
