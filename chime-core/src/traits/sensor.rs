//! Temperature sensor trait

/// Reading shown when a sensor cannot be read (-55.00°C)
pub const SENSOR_FAULT_HUNDREDTHS: i16 = -5500;

/// Errors that can occur with temperature sensing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// No device answered on the bus
    NotPresent,
    /// Data failed its integrity check
    Crc,
    /// Bus transaction failed
    Bus,
}

/// Trait for temperature sensors
///
/// Readings are fixed point with 0.01°C resolution: 23.5°C is 2350.
pub trait TemperatureSensor {
    /// Read the current temperature in hundredths of a degree Celsius
    fn read_hundredths(&mut self) -> Result<i16, SensorError>;

    /// Read, substituting [`SENSOR_FAULT_HUNDREDTHS`] on failure
    fn read_or_sentinel(&mut self) -> i16 {
        self.read_hundredths().unwrap_or(SENSOR_FAULT_HUNDREDTHS)
    }
}

/// A probe that may not be fitted
impl<T: TemperatureSensor> TemperatureSensor for Option<T> {
    fn read_hundredths(&mut self) -> Result<i16, SensorError> {
        match self {
            Some(sensor) => sensor.read_hundredths(),
            None => Err(SensorError::NotPresent),
        }
    }
}
