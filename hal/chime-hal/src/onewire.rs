//! 1-Wire bus abstractions
//!
//! Provides the byte-level 1-Wire master operations needed by Dallas/Maxim
//! sensors. Chip HALs implement the bit timing.

/// 1-Wire bus master
pub trait OneWireBus {
    /// Error type for bus operations
    type Error;

    /// Issue a reset pulse
    ///
    /// Returns `true` if at least one device answered with a presence pulse.
    fn reset(&mut self) -> Result<bool, Self::Error>;

    /// Write one byte, least significant bit first
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Read one byte, least significant bit first
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Write a sequence of bytes
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        for &byte in bytes {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    /// Fill `buf` with bytes read from the bus
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        for byte in buf.iter_mut() {
            *byte = self.read_byte()?;
        }
        Ok(())
    }
}

/// Dallas/Maxim CRC-8 (polynomial x^8 + x^5 + x^4 + 1)
///
/// Running the CRC over a block that ends with its own CRC byte yields 0.
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc: u8 = 0;
    for &byte in data {
        let mut b = byte;
        for _ in 0..8 {
            let mix = (crc ^ b) & 0x01;
            crc >>= 1;
            if mix != 0 {
                crc ^= 0x8C;
            }
            b >>= 1;
        }
    }
    crc
}
