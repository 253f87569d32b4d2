//! Events reported by a clock cycle

use chime_hal::storage::StorageError;

use crate::alarm::AlarmEvent;
use crate::time::{ClockTime, DaylightDirection};
use crate::traits::RtcError;

/// Most events a single tick can report
pub const MAX_TICK_EVENTS: usize = 4;

/// Something that happened during a tick, for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockEvent {
    /// SET pressed on the clock face
    MenuArmed,
    /// SET released before the long press
    MenuDisarmed,
    /// Setup session opened
    SessionOpened,
    /// Setup step drawn
    StepEntered { step: u8 },
    /// SET moved to another step
    StepAdvanced { step: u8 },
    /// INC/DEC changed a value
    FieldEdited { step: u8, value: u8 },
    /// Session dropped after inactivity
    SessionAbandoned { step: u8 },
    /// Settings persisted; `writes` bytes actually reached storage
    SettingsCommitted { writes: u8 },
    /// RTC set from the date and time workflow
    TimeSet(ClockTime),
    /// Daylight shift confirmed, waiting for a safe moment
    DaylightScheduled(DaylightDirection),
    /// Daylight shift written to the RTC
    DaylightApplied(DaylightDirection),
    /// Alarm phase change
    Alarm(AlarmEvent),
}

/// Transport failure during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    Rtc(RtcError),
    Storage(StorageError),
}

impl From<RtcError> for ClockError {
    fn from(e: RtcError) -> Self {
        ClockError::Rtc(e)
    }
}

impl From<StorageError> for ClockError {
    fn from(e: StorageError) -> Self {
        ClockError::Storage(e)
    }
}
