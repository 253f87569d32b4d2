//! Setup state machine definition
//!
//! Whether the clock face or a setup screen is shown, and how SET, INC and
//! DEC are interpreted, is a function of the current state and an event.

use super::events::SetupEvent;

/// Setup controller states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupState {
    /// Clock face shown, waiting for SET
    #[default]
    Clock,
    /// SET held, timing the long press; clock face still shown
    ArmMenu,
    /// Entering a step: clamp its field and draw it
    EnterMenu,
    /// Step drawn, waiting for SET to be released
    AwaitRelease,
    /// Editing the step's field with INC/DEC
    EditParam,
}

impl SetupState {
    /// Check if the clock face is refreshed in this state
    pub fn shows_clock(&self) -> bool {
        matches!(self, SetupState::Clock | SetupState::ArmMenu)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: SetupEvent) -> Self {
        use SetupEvent::*;
        use SetupState::*;

        match (self, event) {
            (Clock, ConfirmPressed) => ArmMenu,

            (ArmMenu, ConfirmReleased) => Clock,
            (ArmMenu, LongPress) => EnterMenu,

            (EnterMenu, StepShown) => AwaitRelease,

            (AwaitRelease, ConfirmReleased) => EditParam,

            (EditParam, FieldEdited) => EditParam,
            (EditParam, Advance) => EnterMenu,
            (EditParam, WorkflowComplete) => Clock,
            (EditParam, InactivityTimeout) => Clock,

            // Default: stay in current state
            _ => self,
        }
    }
}
