//! GPIO adapters
//!
//! Wrap embassy-rp pins in the `chime-hal` GPIO traits so the drivers stay
//! chip-independent.

use chime_hal::gpio::{InputPin, OutputPin};
use embassy_rp::gpio::{Input, Output};

/// Push-pull output
pub struct RpOutput<'d>(pub Output<'d>);

impl OutputPin for RpOutput<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Digital input
pub struct RpInput<'d>(pub Input<'d>);

impl InputPin for RpInput<'_> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}
