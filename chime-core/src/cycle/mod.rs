//! Clock cycle driver
//!
//! The per-tick loop tying the setup controller, the settings store, the
//! alarm monitor and the collaborators together.

pub mod driver;
pub mod events;

pub use driver::ClockCycle;
pub use events::{ClockError, ClockEvent, MAX_TICK_EVENTS};
