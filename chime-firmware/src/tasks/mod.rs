//! Embassy async tasks
//!
//! Each task runs independently and communicates via signals.

pub mod clock;
pub mod tick;

pub use clock::{clock_task, BoardClock};
pub use tick::tick_task;
