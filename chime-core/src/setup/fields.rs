//! Setup steps and the fields they edit
//!
//! Steps are numbered as a flat sequence. Each top-menu choice owns a
//! contiguous run of steps, and the ordinal just past that run marks the end
//! of the workflow:
//!
//! | Workflow      | Steps | End |
//! |---------------|-------|-----|
//! | top menu      | 0     |     |
//! | alarm         | 1-4   | 5   |
//! | date and time | 5-9   | 10  |
//! | daylight      | 10    | 11  |
//! | display style | 11-13 | 14  |

use crate::settings::{AlarmSchedule, DateStyle, DisplayFormat, TempUnit, TimeStyle};
use crate::time::{last_day_of_month, ClockTime, DaylightDirection};

pub const STEP_TOP_MENU: u8 = 0;
pub const STEP_ALARM_ENABLE: u8 = 1;
pub const STEP_ALARM_HOUR: u8 = 2;
pub const STEP_ALARM_MINUTE: u8 = 3;
pub const STEP_ALARM_LENGTH: u8 = 4;
pub const STEP_ALARM_END: u8 = 5;
pub const STEP_YEAR: u8 = 5;
pub const STEP_MONTH: u8 = 6;
pub const STEP_DAY: u8 = 7;
pub const STEP_HOUR: u8 = 8;
pub const STEP_MINUTE: u8 = 9;
pub const STEP_DATE_TIME_END: u8 = 10;
pub const STEP_DAYLIGHT: u8 = 10;
pub const STEP_DAYLIGHT_END: u8 = 11;
pub const STEP_DATE_STYLE: u8 = 11;
pub const STEP_TIME_STYLE: u8 = 12;
pub const STEP_TEMP_UNIT: u8 = 13;
pub const STEP_FORMAT_END: u8 = 14;

/// Number of editable steps
pub const STEP_COUNT: usize = 14;

/// Upper bound of each step's value, indexed by step ordinal
///
/// The day entry is a ceiling only; the real maximum follows the working
/// month and year.
pub const PARAM_MAX: [u8; STEP_COUNT] = [3, 1, 23, 59, 99, 99, 12, 31, 23, 59, 2, 2, 1, 1];

/// Choice on the top-level menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TopMenuSelection {
    #[default]
    Alarm,
    DateTime,
    Daylight,
    DisplayStyle,
}

impl TopMenuSelection {
    pub const fn index(self) -> u8 {
        match self {
            TopMenuSelection::Alarm => 0,
            TopMenuSelection::DateTime => 1,
            TopMenuSelection::Daylight => 2,
            TopMenuSelection::DisplayStyle => 3,
        }
    }

    pub const fn from_index(index: u8) -> Self {
        match index {
            0 => TopMenuSelection::Alarm,
            1 => TopMenuSelection::DateTime,
            2 => TopMenuSelection::Daylight,
            _ => TopMenuSelection::DisplayStyle,
        }
    }

    /// First step of this workflow
    pub const fn first_step(self) -> u8 {
        match self {
            TopMenuSelection::Alarm => STEP_ALARM_ENABLE,
            TopMenuSelection::DateTime => STEP_YEAR,
            TopMenuSelection::Daylight => STEP_DAYLIGHT,
            TopMenuSelection::DisplayStyle => STEP_DATE_STYLE,
        }
    }

    /// Ordinal that ends this workflow
    pub const fn end_step(self) -> u8 {
        match self {
            TopMenuSelection::Alarm => STEP_ALARM_END,
            TopMenuSelection::DateTime => STEP_DATE_TIME_END,
            TopMenuSelection::Daylight => STEP_DAYLIGHT_END,
            TopMenuSelection::DisplayStyle => STEP_FORMAT_END,
        }
    }
}

/// Everything a setup session may edit
///
/// Edits land here first and only reach the settings store or the RTC when
/// a workflow completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WorkingCopy {
    pub selection: TopMenuSelection,
    pub daylight: DaylightDirection,
    pub format: DisplayFormat,
    pub alarm: AlarmSchedule,
    pub time: ClockTime,
}

/// Selector for the field edited at a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldRef {
    TopMenu,
    AlarmEnabled,
    AlarmHour,
    AlarmMinute,
    AlarmLength,
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Daylight,
    DateStyle,
    TimeStyle,
    TempUnit,
}

impl FieldRef {
    /// Field edited at `step`, or `None` past the last step
    pub const fn for_step(step: u8) -> Option<Self> {
        Some(match step {
            0 => FieldRef::TopMenu,
            1 => FieldRef::AlarmEnabled,
            2 => FieldRef::AlarmHour,
            3 => FieldRef::AlarmMinute,
            4 => FieldRef::AlarmLength,
            5 => FieldRef::Year,
            6 => FieldRef::Month,
            7 => FieldRef::Day,
            8 => FieldRef::Hour,
            9 => FieldRef::Minute,
            10 => FieldRef::Daylight,
            11 => FieldRef::DateStyle,
            12 => FieldRef::TimeStyle,
            13 => FieldRef::TempUnit,
            _ => return None,
        })
    }

    /// Step ordinal of this field
    pub const fn step(self) -> u8 {
        match self {
            FieldRef::TopMenu => STEP_TOP_MENU,
            FieldRef::AlarmEnabled => STEP_ALARM_ENABLE,
            FieldRef::AlarmHour => STEP_ALARM_HOUR,
            FieldRef::AlarmMinute => STEP_ALARM_MINUTE,
            FieldRef::AlarmLength => STEP_ALARM_LENGTH,
            FieldRef::Year => STEP_YEAR,
            FieldRef::Month => STEP_MONTH,
            FieldRef::Day => STEP_DAY,
            FieldRef::Hour => STEP_HOUR,
            FieldRef::Minute => STEP_MINUTE,
            FieldRef::Daylight => STEP_DAYLIGHT,
            FieldRef::DateStyle => STEP_DATE_STYLE,
            FieldRef::TimeStyle => STEP_TIME_STYLE,
            FieldRef::TempUnit => STEP_TEMP_UNIT,
        }
    }

    /// Smallest value; month and day start at 1
    pub const fn min(self) -> u8 {
        match self {
            FieldRef::Month | FieldRef::Day => 1,
            _ => 0,
        }
    }

    /// Largest value given the rest of the working copy
    pub fn max(self, copy: &WorkingCopy) -> u8 {
        match self {
            FieldRef::Day => last_day_of_month(copy.time.month, copy.time.year),
            _ => PARAM_MAX[self.step() as usize],
        }
    }

    /// Current value of this field in `copy`
    pub fn get(self, copy: &WorkingCopy) -> u8 {
        match self {
            FieldRef::TopMenu => copy.selection.index(),
            FieldRef::AlarmEnabled => copy.alarm.enabled as u8,
            FieldRef::AlarmHour => copy.alarm.hour,
            FieldRef::AlarmMinute => copy.alarm.minute,
            FieldRef::AlarmLength => copy.alarm.duration_seconds,
            FieldRef::Year => copy.time.year,
            FieldRef::Month => copy.time.month,
            FieldRef::Day => copy.time.day,
            FieldRef::Hour => copy.time.hour,
            FieldRef::Minute => copy.time.minute,
            FieldRef::Daylight => copy.daylight.index(),
            FieldRef::DateStyle => copy.format.date_style.index(),
            FieldRef::TimeStyle => copy.format.time_style.index(),
            FieldRef::TempUnit => copy.format.temp_unit.index(),
        }
    }

    /// Store `value` into this field of `copy`
    pub fn set(self, copy: &mut WorkingCopy, value: u8) {
        match self {
            FieldRef::TopMenu => copy.selection = TopMenuSelection::from_index(value),
            FieldRef::AlarmEnabled => copy.alarm.enabled = value != 0,
            FieldRef::AlarmHour => copy.alarm.hour = value,
            FieldRef::AlarmMinute => copy.alarm.minute = value,
            FieldRef::AlarmLength => copy.alarm.duration_seconds = value,
            FieldRef::Year => copy.time.year = value,
            FieldRef::Month => copy.time.month = value,
            FieldRef::Day => copy.time.day = value,
            FieldRef::Hour => copy.time.hour = value,
            FieldRef::Minute => copy.time.minute = value,
            FieldRef::Daylight => copy.daylight = DaylightDirection::from_index(value),
            FieldRef::DateStyle => {
                copy.format.date_style = DateStyle::from_index(value).unwrap_or_default()
            }
            FieldRef::TimeStyle => copy.format.time_style = TimeStyle::from_index(value),
            FieldRef::TempUnit => copy.format.temp_unit = TempUnit::from_index(value),
        }
    }

    /// Pull the value into range: above the maximum becomes the maximum,
    /// below the minimum becomes the minimum
    pub fn clamp(self, copy: &mut WorkingCopy) {
        let value = self.get(copy).clamp(self.min(), self.max(copy));
        self.set(copy, value);
    }

    /// Step the value up, wrapping from the maximum to the minimum
    pub fn increment(self, copy: &mut WorkingCopy) -> u8 {
        let value = self.get(copy);
        let next = if value >= self.max(copy) {
            self.min()
        } else {
            value + 1
        };
        self.set(copy, next);
        next
    }

    /// Step the value down, wrapping from the minimum to the maximum
    pub fn decrement(self, copy: &mut WorkingCopy) -> u8 {
        let value = self.get(copy);
        let next = if value <= self.min() {
            self.max(copy)
        } else {
            value - 1
        };
        self.set(copy, next);
        next
    }
}
