//! Output drivers

pub mod buzzer;

pub use buzzer::GpioBuzzer;
