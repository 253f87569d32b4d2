//! Temperature sensor drivers

pub mod ds18b20;

pub use ds18b20::Ds18b20;
