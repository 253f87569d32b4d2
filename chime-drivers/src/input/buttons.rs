//! Three-button panel
//!
//! SET, INC and DEC wired to ground with pull-ups. Levels are sampled once
//! per clock cycle; the setup controller does its own timing, so no
//! debouncing happens here.

use chime_core::traits::{ButtonInput, Buttons};
use chime_hal::gpio::{InputPin, Polarity};

/// SET/INC/DEC buttons on three GPIO inputs
pub struct ButtonPanel<C, I, D> {
    confirm: C,
    inc: I,
    dec: D,
    polarity: Polarity,
}

impl<C: InputPin, I: InputPin, D: InputPin> ButtonPanel<C, I, D> {
    pub fn new(confirm: C, inc: I, dec: D, polarity: Polarity) -> Self {
        Self {
            confirm,
            inc,
            dec,
            polarity,
        }
    }

    /// Buttons to ground with pull-ups
    pub fn new_active_low(confirm: C, inc: I, dec: D) -> Self {
        Self::new(confirm, inc, dec, Polarity::ActiveLow)
    }
}

impl<C: InputPin, I: InputPin, D: InputPin> ButtonInput for ButtonPanel<C, I, D> {
    fn sample(&mut self) -> Buttons {
        Buttons {
            confirm: self.polarity.is_active(self.confirm.is_high()),
            inc: self.polarity.is_active(self.inc.is_high()),
            dec: self.polarity.is_active(self.dec.is_high()),
        }
    }
}
