//! Display text
//!
//! Formats the clock face and setup screens into a text [`Screen`] that a
//! display driver can draw.

pub mod render;
pub mod screen;
pub mod text;

pub use render::{ClockFace, Renderer};
pub use screen::{Screen, TextSize, LINE_LEN, SCREEN_ROWS};
