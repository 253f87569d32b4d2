//! Simple TOML parser for the clock configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `clock.toml`. It is NOT a general TOML parser.
//!
//! Supported features:
//! - Key = value pairs (integer, boolean)
//! - [section] headers
//! - Comments (# ...)
//!
//! Unknown sections and keys are errors, so a typo never silently falls
//! back to a default. Missing keys keep their defaults.

use chime_core::config::ClockConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection { line: u16 },
    /// Unknown key for the current section
    UnknownKey { line: u16 },
    /// Value has the wrong type or is out of range for the field
    InvalidValue { line: u16 },
    /// Line is neither a header nor a key = value pair
    Syntax { line: u16 },
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Timing,
    Buzzer,
    Probe,
}

/// Parse TOML configuration into ClockConfig
pub fn parse_config(input: &str) -> Result<ClockConfig, ParseError> {
    let mut config = ClockConfig::default();
    let mut section = Section::Root;

    for (index, line) in input.lines().enumerate() {
        let line_no = (index + 1).min(u16::MAX as usize) as u16;
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)
                .ok_or(ParseError::InvalidSection { line: line_no })?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::Syntax { line: line_no })?;
        apply_value(&mut config, section, key, value, line_no)?;
    }

    Ok(config)
}

/// Drop a trailing `# comment`
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_section_header(line: &str) -> Option<Section> {
    let name = line.strip_prefix('[')?.strip_suffix(']')?.trim();
    match name {
        "timing" => Some(Section::Timing),
        "buzzer" => Some(Section::Buzzer),
        "probe" => Some(Section::Probe),
        _ => None,
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Parse an integer value, allowing `_` digit separators
fn parse_int<T: core::str::FromStr>(value: &str, line: u16) -> Result<T, ParseError> {
    let mut digits: heapless::String<16> = heapless::String::new();
    for c in value.chars().filter(|&c| c != '_') {
        digits
            .push(c)
            .map_err(|_| ParseError::InvalidValue { line })?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue { line })
}

/// Parse a boolean value
fn parse_bool(value: &str, line: u16) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue { line }),
    }
}

fn apply_value(
    config: &mut ClockConfig,
    section: Section,
    key: &str,
    value: &str,
    line: u16,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Root, "tick_interval_ms") => config.tick_interval_ms = parse_int(value, line)?,
        (Section::Root, "splash_ms") => config.splash_ms = parse_int(value, line)?,

        (Section::Timing, "long_press_ms") => {
            config.timing.long_press_ms = parse_int(value, line)?
        }
        (Section::Timing, "advance_debounce_ms") => {
            config.timing.advance_debounce_ms = parse_int(value, line)?
        }
        (Section::Timing, "abandon_timeout_ms") => {
            config.timing.abandon_timeout_ms = parse_int(value, line)?
        }
        (Section::Timing, "edit_repeat_ms") => {
            config.timing.edit_repeat_ms = parse_int(value, line)?
        }

        (Section::Buzzer, "active_low") => config.buzzer.active_low = parse_bool(value, line)?,

        (Section::Probe, "enabled") => config.probe.enabled = parse_bool(value, line)?,
        (Section::Probe, "conversion_ms") => {
            config.probe.conversion_ms = parse_int(value, line)?
        }

        _ => return Err(ParseError::UnknownKey { line }),
    }
    Ok(())
}
