//! Time-domain model
//!
//! Pure calendar, BCD and unit helpers shared by the setup workflow, the
//! alarm monitor and the RTC driver.

pub mod bcd;
pub mod calendar;
pub mod daylight;
pub mod units;

pub use bcd::{bcd_decode, bcd_encode};
pub use calendar::{
    day_of_week, is_leap_year, last_day_of_month, ClockTime, MAX_YEAR, SATURDAY, SUNDAY,
};
pub use daylight::{apply_daylight_shift, daylight_shift_allowed, DaylightDirection};
pub use units::{fahrenheit_from_celsius_hundredths, to_12_hour, Meridiem};
