//! Front-panel button input

/// Levels of the three setup buttons, true while pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons {
    /// SET / confirm
    pub confirm: bool,
    /// Increment
    pub inc: bool,
    /// Decrement
    pub dec: bool,
}

impl Buttons {
    pub const NONE: Buttons = Buttons {
        confirm: false,
        inc: false,
        dec: false,
    };

    pub const CONFIRM: Buttons = Buttons {
        confirm: true,
        inc: false,
        dec: false,
    };

    pub const INC: Buttons = Buttons {
        confirm: false,
        inc: true,
        dec: false,
    };

    pub const DEC: Buttons = Buttons {
        confirm: false,
        inc: false,
        dec: true,
    };

    /// Buttons pressed in either sample
    pub const fn union(self, other: Buttons) -> Buttons {
        Buttons {
            confirm: self.confirm || other.confirm,
            inc: self.inc || other.inc,
            dec: self.dec || other.dec,
        }
    }
}

/// Raw button sampler
///
/// Sampled once per tick. No debouncing is expected here; the setup
/// controller's timing absorbs contact bounce.
pub trait ButtonInput {
    fn sample(&mut self) -> Buttons;
}
