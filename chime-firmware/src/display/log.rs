//! Screen sink that logs changed screens

use defmt::*;

use chime_core::display::{Screen, TextSize};
use chime_core::traits::ClockDisplay;

/// Logs each screen that differs from the previous one
#[derive(Default)]
pub struct LogDisplay {
    last: Option<Screen>,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClockDisplay for LogDisplay {
    fn show(&mut self, screen: &Screen) {
        if self.last.as_ref() == Some(screen) {
            return;
        }
        for (row, line) in screen.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            let large = screen.size(row) == TextSize::Large;
            let marker = if screen.is_highlighted(row) { '>' } else { ' ' };
            if large {
                debug!("{}{}| {=str} (large)", row, marker, line);
            } else {
                debug!("{}{}| {=str}", row, marker, line);
            }
        }
        self.last = Some(screen.clone());
    }
}
