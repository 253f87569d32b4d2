//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins that can be implemented
//! by chip-specific HALs.

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Electrical level that means "active"
///
/// Buttons wired to ground with pull-ups and buzzers driven through a
/// PNP transistor are both active-low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    ActiveHigh,
    #[default]
    ActiveLow,
}

impl Polarity {
    /// Whether a pin reading `high` is in its active state
    pub fn is_active(self, high: bool) -> bool {
        match self {
            Polarity::ActiveHigh => high,
            Polarity::ActiveLow => !high,
        }
    }

    /// Pin level (true = high) that represents `active`
    pub fn level(self, active: bool) -> bool {
        self.is_active(active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polarity_levels() {
        assert!(Polarity::ActiveHigh.is_active(true));
        assert!(!Polarity::ActiveHigh.is_active(false));
        assert!(Polarity::ActiveLow.is_active(false));
        assert!(!Polarity::ActiveLow.is_active(true));

        assert!(Polarity::ActiveHigh.level(true));
        assert!(!Polarity::ActiveLow.level(true));
        assert!(Polarity::ActiveLow.level(false));
    }
}
