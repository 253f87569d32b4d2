//! Real-time clock trait

use crate::time::ClockTime;

/// Errors that can occur talking to the RTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RtcError {
    /// Bus transaction failed or was not acknowledged
    Bus,
    /// Registers decoded to an impossible date or time
    InvalidData,
}

/// Battery-backed wall clock
///
/// Implementations own the bus transaction; callers only see decoded
/// [`ClockTime`] values.
pub trait TimeSource {
    /// Read the current date and time
    fn read_time(&mut self) -> Result<ClockTime, RtcError>;

    /// Write every field, seconds included
    fn write_time(&mut self, time: &ClockTime) -> Result<(), RtcError>;

    /// Write hour, day of week and date, leaving seconds and minutes running
    ///
    /// Used for daylight shifts. The default writes the full time.
    fn write_hour_and_date(&mut self, time: &ClockTime) -> Result<(), RtcError> {
        self.write_time(time)
    }
}
