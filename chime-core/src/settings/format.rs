//! Display format and alarm schedule types
//!
//! The display format and the alarm enable bit share one persisted flags
//! byte:
//!
//! ```text
//!  7   6   5   4       3       2       1   0
//! [reserved] [alarm] [temp] [time] [ date  ]
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const DATE_STYLE_MASK: u8 = 0b0000_0011;
const TIME_STYLE_BIT: u8 = 2;
const TEMP_UNIT_BIT: u8 = 3;
const ALARM_ENABLED_BIT: u8 = 4;
const RESERVED_MASK: u8 = 0b1110_0000;

/// Alarm hour used when the stored value is out of range
pub const FALLBACK_ALARM_HOUR: u8 = 12;
/// Alarm minute used when the stored value is out of range
pub const FALLBACK_ALARM_MINUTE: u8 = 30;
/// Alarm length used when the stored value is out of range
pub const FALLBACK_ALARM_LENGTH: u8 = 5;
/// Longest alarm in seconds
pub const MAX_ALARM_LENGTH: u8 = 99;

/// Order of the calendar fields on the clock face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DateStyle {
    /// 2000/01/31
    #[default]
    Ymd,
    /// 31/01/2000
    Dmy,
    /// 01/31/2000
    Mdy,
}

impl DateStyle {
    pub const fn index(self) -> u8 {
        match self {
            DateStyle::Ymd => 0,
            DateStyle::Dmy => 1,
            DateStyle::Mdy => 2,
        }
    }

    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(DateStyle::Ymd),
            1 => Some(DateStyle::Dmy),
            2 => Some(DateStyle::Mdy),
            _ => None,
        }
    }
}

/// 24-hour or 12-hour time display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimeStyle {
    #[default]
    H24,
    H12,
}

impl TimeStyle {
    pub const fn index(self) -> u8 {
        match self {
            TimeStyle::H24 => 0,
            TimeStyle::H12 => 1,
        }
    }

    pub const fn from_index(index: u8) -> Self {
        if index == 0 {
            TimeStyle::H24
        } else {
            TimeStyle::H12
        }
    }
}

/// Temperature display unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TempUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TempUnit {
    pub const fn index(self) -> u8 {
        match self {
            TempUnit::Celsius => 0,
            TempUnit::Fahrenheit => 1,
        }
    }

    pub const fn from_index(index: u8) -> Self {
        if index == 0 {
            TempUnit::Celsius
        } else {
            TempUnit::Fahrenheit
        }
    }

    /// Unit letter shown after the degree sign
    pub const fn letter(self) -> &'static str {
        match self {
            TempUnit::Celsius => "C",
            TempUnit::Fahrenheit => "F",
        }
    }
}

/// How the clock face presents dates, times and temperatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayFormat {
    pub date_style: DateStyle,
    pub time_style: TimeStyle,
    pub temp_unit: TempUnit,
}

/// Daily alarm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlarmSchedule {
    /// Alarm armed
    pub enabled: bool,
    /// Hour (0-23)
    pub hour: u8,
    /// Minute (0-59)
    pub minute: u8,
    /// How long the buzzer sounds, in seconds (0-99)
    pub duration_seconds: u8,
}

impl Default for AlarmSchedule {
    fn default() -> Self {
        Self {
            enabled: false,
            hour: FALLBACK_ALARM_HOUR,
            minute: FALLBACK_ALARM_MINUTE,
            duration_seconds: FALLBACK_ALARM_LENGTH,
        }
    }
}

impl AlarmSchedule {
    /// Build a schedule from raw stored bytes
    ///
    /// Each field falls back independently when out of range.
    pub fn from_raw(enabled: bool, hour: u8, minute: u8, duration_seconds: u8) -> Self {
        Self {
            enabled,
            hour: if hour < 24 { hour } else { FALLBACK_ALARM_HOUR },
            minute: if minute < 60 { minute } else { FALLBACK_ALARM_MINUTE },
            duration_seconds: if duration_seconds <= MAX_ALARM_LENGTH {
                duration_seconds
            } else {
                FALLBACK_ALARM_LENGTH
            },
        }
    }

    /// Whether the alarm fires at `hour`:`minute`
    pub fn matches(&self, hour: u8, minute: u8) -> bool {
        self.hour == hour && self.minute == minute
    }

    /// Sounding length in milliseconds
    pub fn duration_ms(&self) -> u32 {
        self.duration_seconds as u32 * 1000
    }
}

/// Pack the display format and the alarm enable bit into the flags byte
pub fn pack_flags(format: &DisplayFormat, alarm_enabled: bool) -> u8 {
    format.date_style.index()
        | (format.time_style.index() << TIME_STYLE_BIT)
        | (format.temp_unit.index() << TEMP_UNIT_BIT)
        | ((alarm_enabled as u8) << ALARM_ENABLED_BIT)
}

/// Unpack a flags byte
///
/// Returns `None` when a reserved bit is set or the date style bits hold the
/// unused value 3.
pub fn unpack_flags(raw: u8) -> Option<(DisplayFormat, bool)> {
    if raw & RESERVED_MASK != 0 {
        return None;
    }
    let date_style = DateStyle::from_index(raw & DATE_STYLE_MASK)?;
    let format = DisplayFormat {
        date_style,
        time_style: TimeStyle::from_index((raw >> TIME_STYLE_BIT) & 1),
        temp_unit: TempUnit::from_index((raw >> TEMP_UNIT_BIT) & 1),
    };
    let alarm_enabled = (raw >> ALARM_ENABLED_BIT) & 1 != 0;
    Some((format, alarm_enabled))
}
