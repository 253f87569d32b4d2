//! Calendar arithmetic for the 2000-2099 range
//!
//! The RTC keeps a two-digit year, so every year divisible by four is a leap
//! year and no century rule is needed.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Days in each month of a common year
const DAYS_IN_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Days elapsed in a common year before the first of each month
const DAYS_BEFORE_MONTH: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Highest two-digit year
pub const MAX_YEAR: u8 = 99;

/// Day-of-week value for Sunday
pub const SUNDAY: u8 = 1;

/// Day-of-week value for Saturday
pub const SATURDAY: u8 = 7;

/// Wall-clock date and time as kept by the RTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockTime {
    /// Seconds (0-59)
    pub second: u8,
    /// Minutes (0-59)
    pub minute: u8,
    /// Hours, 24-hour clock (0-23)
    pub hour: u8,
    /// Day of week, 1 = Sunday to 7 = Saturday
    pub day_of_week: u8,
    /// Day of month (1-31)
    pub day: u8,
    /// Month (1-12)
    pub month: u8,
    /// Year offset from 2000 (0-99)
    pub year: u8,
}

impl Default for ClockTime {
    /// Midnight, Saturday 1 January 2000
    fn default() -> Self {
        Self {
            second: 0,
            minute: 0,
            hour: 0,
            day_of_week: SATURDAY,
            day: 1,
            month: 1,
            year: 0,
        }
    }
}

impl ClockTime {
    /// Build a time from its date and time parts, computing the day of week
    pub fn from_parts(year: u8, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            second,
            minute,
            hour,
            day_of_week: day_of_week(year, month, day),
            day,
            month,
            year,
        }
    }

    /// Check every field against its range, including the month length
    pub fn is_valid(&self) -> bool {
        self.second <= 59
            && self.minute <= 59
            && self.hour <= 23
            && (SUNDAY..=SATURDAY).contains(&self.day_of_week)
            && (1..=12).contains(&self.month)
            && self.year <= MAX_YEAR
            && self.day >= 1
            && self.day <= last_day_of_month(self.month, self.year)
    }

    /// Clamp every field into its range
    ///
    /// Values above a field maximum are pulled down to the maximum; a zero
    /// day, month or day of week is lifted to 1.
    pub fn clamped(mut self) -> Self {
        self.second = self.second.min(59);
        self.minute = self.minute.min(59);
        self.hour = self.hour.min(23);
        self.year = self.year.min(MAX_YEAR);
        self.month = self.month.clamp(1, 12);
        self.day = self.day.clamp(1, last_day_of_month(self.month, self.year));
        self.day_of_week = self.day_of_week.clamp(SUNDAY, SATURDAY);
        self
    }

    /// Recompute the day of week from the date fields
    pub fn with_day_of_week(mut self) -> Self {
        self.day_of_week = day_of_week(self.year, self.month, self.day);
        self
    }
}

/// Leap year test, valid for 2000-2099
pub const fn is_leap_year(year: u8) -> bool {
    year % 4 == 0
}

/// Last day of `month` (1-12) in `year` (0-99)
///
/// Month values outside 1-12 are treated as the nearest valid month.
pub fn last_day_of_month(month: u8, year: u8) -> u8 {
    let index = month.clamp(1, 12) as usize - 1;
    let days = DAYS_IN_MONTH[index];
    if index == 1 && is_leap_year(year) {
        days + 1
    } else {
        days
    }
}

/// Day of week for a date in 2000-2099, 1 = Sunday to 7 = Saturday
///
/// Counts days from a fixed epoch in closed form. The result is only
/// meaningful for years 0-99 (2000-2099); callers must not pass dates
/// outside that range.
pub fn day_of_week(year: u8, month: u8, day: u8) -> u8 {
    let quads = year as u32 / 4;
    let year_in_quad = year as u32 % 4;
    let month_index = month.clamp(1, 12) as usize - 1;

    let mut day_number = 1461 * quads + 365 * year_in_quad + day as u32 + 5;
    day_number += DAYS_BEFORE_MONTH[month_index] as u32;

    // Leap day of the quad's first year has passed for every date not in
    // the leap year itself and for March onward in the leap year.
    if year_in_quad > 0 || month > 2 {
        day_number += 1;
    }

    (day_number % 7) as u8 + 1
}
