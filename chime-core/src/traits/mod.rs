//! Hardware abstraction traits
//!
//! These traits define the interface between the clock logic and the
//! device drivers.

pub mod buzzer;
pub mod display;
pub mod input;
pub mod rtc;
pub mod sensor;

pub use buzzer::Buzzer;
pub use display::ClockDisplay;
pub use input::{ButtonInput, Buttons};
pub use rtc::{RtcError, TimeSource};
pub use sensor::{SensorError, TemperatureSensor, SENSOR_FAULT_HUNDREDTHS};
