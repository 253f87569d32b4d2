//! Alarm buzzer trait

/// Alarm sounder
pub trait Buzzer {
    /// Switch the buzzer on or off
    fn set_buzzer(&mut self, on: bool);
}
