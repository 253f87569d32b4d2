//! Text formatting for the clock face and setup screens

use core::fmt::Write;

use heapless::String;

use crate::settings::{AlarmSchedule, DateStyle, TempUnit, TimeStyle};
use crate::time::{fahrenheit_from_celsius_hundredths, to_12_hour, ClockTime};

use super::screen::LINE_LEN;

/// One formatted screen row
pub type Line = String<LINE_LEN>;

const WEEKDAYS: [&str; 7] = [
    "SUNDAY",
    "MONDAY",
    "TUESDAY",
    "WEDNESDAY",
    "THURSDAY",
    "FRIDAY",
    "SATURDAY",
];

/// Name of a day of week, 1 = Sunday
///
/// Out-of-range values (a corrupt RTC register) map to Sunday or Saturday.
pub fn weekday_name(day_of_week: u8) -> &'static str {
    WEEKDAYS[day_of_week.clamp(1, 7) as usize - 1]
}

/// `"<WEEKDAY> <date>"` in the chosen date style
pub fn date_line(time: &ClockTime, style: DateStyle) -> Line {
    let mut line = Line::new();
    let _ = write!(line, "{} ", weekday_name(time.day_of_week));
    let (y, m, d) = (time.year, time.month, time.day);
    let _ = match style {
        DateStyle::Ymd => write!(line, "20{:02}/{:02}/{:02}", y, m, d),
        DateStyle::Dmy => write!(line, "{:02}/{:02}/20{:02}", d, m, y),
        DateStyle::Mdy => write!(line, "{:02}/{:02}/20{:02}", m, d, y),
    };
    line
}

/// Hour in the chosen style, with the AM/PM suffix for 12-hour time
fn write_hour_minute(
    line: &mut Line,
    hour: u8,
    minute: u8,
    style: TimeStyle,
) -> Option<&'static str> {
    match style {
        TimeStyle::H24 => {
            let _ = write!(line, "{:02}:{:02}", hour, minute);
            None
        }
        TimeStyle::H12 => {
            let (h, meridiem) = to_12_hour(hour);
            let _ = write!(line, "{:02}:{:02}", h, minute);
            Some(meridiem.as_str())
        }
    }
}

/// `HH:MM:SS`, or `HH:MM:SSAM`/`PM` in 12-hour style
pub fn time_line(time: &ClockTime, style: TimeStyle) -> Line {
    let mut line = Line::new();
    let suffix = write_hour_minute(&mut line, time.hour, time.minute, style);
    let _ = write!(line, ":{:02}", time.second);
    if let Some(suffix) = suffix {
        let _ = line.push_str(suffix);
    }
    line
}

/// `ALARM AT: HH:MM`, or with an AM/PM suffix in 12-hour style
pub fn alarm_line(alarm: &AlarmSchedule, style: TimeStyle) -> Line {
    let mut line = Line::new();
    let _ = line.push_str("ALARM AT: ");
    if let Some(suffix) = write_hour_minute(&mut line, alarm.hour, alarm.minute, style) {
        let _ = line.push_str(suffix);
    }
    line
}

/// Temperature with two decimals, converted to the display unit
///
/// Leading zeros are suppressed down to the ones digit: `23.50`, `-0.25`,
/// `-55.00`, `123.45`.
pub fn temperature_text(celsius_hundredths: i16, unit: TempUnit) -> Line {
    let value: i32 = match unit {
        TempUnit::Celsius => celsius_hundredths as i32,
        TempUnit::Fahrenheit => fahrenheit_from_celsius_hundredths(celsius_hundredths),
    };
    let mut line = Line::new();
    if value < 0 {
        let _ = line.push('-');
    }
    let magnitude = value.unsigned_abs();
    let _ = write!(line, "{}.{:02}", magnitude / 100, magnitude % 100);
    line
}

/// Two-digit value
pub fn two_digits(value: u8) -> Line {
    let mut line = Line::new();
    let _ = write!(line, "{:02}", value);
    line
}

/// Four-digit year from its two-digit offset
pub fn year_text(year: u8) -> Line {
    let mut line = Line::new();
    let _ = write!(line, "20{:02}", year);
    line
}

/// Clock hour for the setup screen: `HH` or `HHAM`/`HHPM`
pub fn hour_text(hour: u8, style: TimeStyle) -> Line {
    match style {
        TimeStyle::H24 => two_digits(hour),
        TimeStyle::H12 => {
            let (h, meridiem) = to_12_hour(hour);
            let mut line = two_digits(h);
            let _ = line.push_str(meridiem.as_str());
            line
        }
    }
}
