//! Setup workflow
//!
//! The SET/INC/DEC menu system: a state machine driven by button levels,
//! a session holding the working copy of everything being edited, and the
//! step table that maps ordinals to fields.

pub mod controller;
pub mod events;
pub mod fields;
pub mod machine;
pub mod session;

pub use controller::SetupController;
pub use events::{Completion, SetupEvent, SetupOutcome};
pub use fields::{FieldRef, TopMenuSelection, WorkingCopy};
pub use machine::SetupState;
pub use session::{SetupSession, StepChange};
