//! Events that drive the setup state machine, and what a tick reports

use crate::settings::{AlarmSchedule, DisplayFormat};
use crate::time::{ClockTime, DaylightDirection};

/// Events that can trigger setup state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupEvent {
    /// SET pressed on the clock face
    ConfirmPressed,
    /// SET released
    ConfirmReleased,
    /// SET held past the long-press threshold
    LongPress,
    /// Step screen drawn
    StepShown,
    /// INC or DEC changed the active field
    FieldEdited,
    /// SET pressed to move to the next step
    Advance,
    /// Last step of the workflow confirmed
    WorkflowComplete,
    /// No INC/DEC activity for the abandon timeout
    InactivityTimeout,
}

/// Result of a finished workflow, to be applied by the clock cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Completion {
    /// Persist the alarm cells and the enable bit
    Alarm(AlarmSchedule),
    /// Set the RTC; seconds are already zeroed and the weekday recomputed
    DateTime(ClockTime),
    /// Shift the clock by one hour once it is safe to write
    Daylight(DaylightDirection),
    /// Persist the display format
    DisplayFormat(DisplayFormat),
}

/// What a setup tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupOutcome {
    /// Nothing changed
    None,
    /// SET pressed, waiting for a long press
    Armed,
    /// SET released early, back to the clock face
    Disarmed,
    /// Long press recognised, session opened on the top menu
    Opened,
    /// A step was entered and should be drawn
    StepEntered { step: u8 },
    /// SET moved the session on to `step`
    Advanced { step: u8 },
    /// The active field changed and should be redrawn
    Edited { step: u8, value: u8 },
    /// Session timed out; edits were dropped
    Abandoned { step: u8 },
    /// Workflow finished
    Completed(Completion),
}

impl SetupOutcome {
    /// Whether the setup screen needs redrawing
    pub fn needs_render(&self) -> bool {
        matches!(
            self,
            SetupOutcome::StepEntered { .. } | SetupOutcome::Edited { .. }
        )
    }
}
