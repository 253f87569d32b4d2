//! GPIO buzzer output
//!
//! Drives a piezo buzzer directly or through a transistor. The reference
//! board switches it through a PNP stage, so it is active-low by default.

use chime_core::traits::Buzzer;
use chime_hal::gpio::{OutputPin, Polarity};

/// Buzzer on a single GPIO pin
pub struct GpioBuzzer<P> {
    pin: P,
    polarity: Polarity,
    /// Current logical state (true = sounding)
    on: bool,
}

impl<P: OutputPin> GpioBuzzer<P> {
    /// Create a buzzer and make sure it starts silent
    pub fn new(pin: P, polarity: Polarity) -> Self {
        let mut buzzer = Self {
            pin,
            polarity,
            on: false,
        };
        buzzer.set_buzzer(false);
        buzzer
    }

    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, Polarity::ActiveLow)
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

impl<P: OutputPin> Buzzer for GpioBuzzer<P> {
    fn set_buzzer(&mut self, on: bool) {
        self.on = on;
        self.pin.set_state(self.polarity.level(on));
    }
}
