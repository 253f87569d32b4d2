//! Text display trait

use crate::display::Screen;

/// Sink for rendered screens
///
/// The core hands over fully formatted text lines; pixel layout and fonts
/// belong to the implementation.
pub trait ClockDisplay {
    fn show(&mut self, screen: &Screen);
}
