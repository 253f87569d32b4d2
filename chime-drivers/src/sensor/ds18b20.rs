//! DS18B20 temperature probe (1-Wire)
//!
//! A conversion takes up to 750 ms at 12-bit resolution. The driver never
//! waits for it: each read collects the result of the previous conversion
//! and immediately starts the next one, so the clock cycle only has to
//! poll slower than the conversion time.
//!
//! Only a single probe on the bus is supported (Skip ROM addressing).

use chime_core::traits::{SensorError, TemperatureSensor};
use chime_hal::onewire::{crc8, OneWireBus};

/// DS18B20 function commands
pub mod cmd {
    /// Address the only device on the bus
    pub const SKIP_ROM: u8 = 0xCC;
    /// Start a temperature conversion
    pub const CONVERT_T: u8 = 0x44;
    /// Read the 9-byte scratchpad
    pub const READ_SCRATCHPAD: u8 = 0xBE;
}

const SCRATCHPAD_LEN: usize = 9;

/// Convert a raw 1/16°C reading to hundredths of a degree
pub const fn raw_to_hundredths(raw: i16) -> i16 {
    ((25 * raw as i32) >> 2) as i16
}

/// DS18B20 driver
pub struct Ds18b20<B> {
    bus: B,
}

impl<B: OneWireBus> Ds18b20<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Kick off a conversion
    pub fn start_conversion(&mut self) -> Result<(), SensorError> {
        self.select()?;
        self.bus
            .write_byte(cmd::CONVERT_T)
            .map_err(|_| SensorError::Bus)
    }

    /// Read and check the scratchpad, returning the raw 1/16°C reading
    pub fn read_raw(&mut self) -> Result<i16, SensorError> {
        self.select()?;
        self.bus
            .write_byte(cmd::READ_SCRATCHPAD)
            .map_err(|_| SensorError::Bus)?;
        let mut scratchpad = [0u8; SCRATCHPAD_LEN];
        self.bus
            .read_bytes(&mut scratchpad)
            .map_err(|_| SensorError::Bus)?;

        // An absent probe with a pull-up reads all ones, which fails the CRC
        if crc8(&scratchpad) != 0 {
            return Err(SensorError::Crc);
        }
        Ok(i16::from_le_bytes([scratchpad[0], scratchpad[1]]))
    }

    fn select(&mut self) -> Result<(), SensorError> {
        let present = self.bus.reset().map_err(|_| SensorError::Bus)?;
        if !present {
            return Err(SensorError::NotPresent);
        }
        self.bus
            .write_byte(cmd::SKIP_ROM)
            .map_err(|_| SensorError::Bus)
    }
}

impl<B: OneWireBus> TemperatureSensor for Ds18b20<B> {
    fn read_hundredths(&mut self) -> Result<i16, SensorError> {
        let raw = self.read_raw()?;
        self.start_conversion()?;
        Ok(raw_to_hundredths(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    /// Scripted 1-Wire bus holding one scratchpad
    struct MockBus {
        present: bool,
        scratchpad: [u8; SCRATCHPAD_LEN],
        read_pos: usize,
        written: Vec<u8, 16>,
    }

    impl MockBus {
        fn with_reading(raw: i16) -> Self {
            let [lsb, msb] = raw.to_le_bytes();
            let mut scratchpad = [lsb, msb, 0x4B, 0x46, 0x7F, 0xFF, 0x0C, 0x10, 0];
            scratchpad[8] = crc8(&scratchpad[..8]);
            Self {
                present: true,
                scratchpad,
                read_pos: 0,
                written: Vec::new(),
            }
        }
    }

    impl OneWireBus for MockBus {
        type Error = ();

        fn reset(&mut self) -> Result<bool, ()> {
            self.read_pos = 0;
            Ok(self.present)
        }

        fn write_byte(&mut self, byte: u8) -> Result<(), ()> {
            self.written.push(byte).map_err(|_| ())
        }

        fn read_byte(&mut self) -> Result<u8, ()> {
            let byte = self.scratchpad[self.read_pos];
            self.read_pos += 1;
            Ok(byte)
        }
    }

    #[test]
    fn test_raw_to_hundredths() {
        assert_eq!(raw_to_hundredths(0x0191), 2506); // +25.0625
        assert_eq!(raw_to_hundredths(0x0550), 8500); // power-on value
        assert_eq!(raw_to_hundredths(-0x0370), -5500);
        assert_eq!(raw_to_hundredths(-8), -50);
    }

    #[test]
    fn test_read_collects_then_restarts_conversion() {
        let mut probe = Ds18b20::new(MockBus::with_reading(0x0191));
        assert_eq!(probe.read_hundredths(), Ok(2506));
        assert_eq!(
            probe.bus.written.as_slice(),
            &[
                cmd::SKIP_ROM,
                cmd::READ_SCRATCHPAD,
                cmd::SKIP_ROM,
                cmd::CONVERT_T
            ]
        );
    }

    #[test]
    fn test_missing_probe() {
        let mut bus = MockBus::with_reading(0);
        bus.present = false;
        let mut probe = Ds18b20::new(bus);
        assert_eq!(probe.read_hundredths(), Err(SensorError::NotPresent));
    }

    #[test]
    fn test_corrupt_scratchpad() {
        let mut bus = MockBus::with_reading(0x0191);
        bus.scratchpad[0] ^= 0x01;
        let mut probe = Ds18b20::new(bus);
        assert_eq!(probe.read_hundredths(), Err(SensorError::Crc));
        assert_eq!(probe.read_or_sentinel(), -5500);
    }
}
