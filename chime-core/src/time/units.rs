//! Hour and temperature unit conversions

/// Half of a 12-hour day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub const fn as_str(self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }
}

/// Convert a 24-hour clock hour (0-23) to 12-hour form
///
/// Midnight is 12 AM and noon is 12 PM.
pub const fn to_12_hour(hour: u8) -> (u8, Meridiem) {
    let meridiem = if hour < 12 { Meridiem::Am } else { Meridiem::Pm };
    let h = hour % 12;
    if h == 0 {
        (12, meridiem)
    } else {
        (h, meridiem)
    }
}

/// Convert hundredths of a degree Celsius to hundredths of a degree Fahrenheit
pub const fn fahrenheit_from_celsius_hundredths(celsius: i16) -> i32 {
    celsius as i32 * 9 / 5 + 3200
}
