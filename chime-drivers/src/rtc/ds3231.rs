//! DS3231 real-time clock (I2C)
//!
//! The DS3231 keeps calendar time in seven BCD registers and measures its
//! own die temperature for crystal compensation, which doubles as the
//! clock's "local" temperature reading.
//!
//! # Register map (subset)
//!
//! | Address | Contents                          |
//! |---------|-----------------------------------|
//! | 0x00    | Seconds                           |
//! | 0x01    | Minutes                           |
//! | 0x02    | Hours (bit 6 set = 12-hour mode)  |
//! | 0x03    | Day of week (1-7)                 |
//! | 0x04    | Day of month                      |
//! | 0x05    | Month (bit 7 = century)           |
//! | 0x06    | Year (00-99)                      |
//! | 0x11    | Temperature, integer part         |
//! | 0x12    | Temperature, fraction in bits 7:6 |

use chime_core::time::{bcd_decode, bcd_encode, ClockTime};
use chime_core::traits::{RtcError, SensorError, TemperatureSensor, TimeSource};
use embedded_hal::i2c::I2c;

/// Fixed 7-bit bus address
pub const DS3231_ADDRESS: u8 = 0x68;

/// DS3231 register addresses
pub mod reg {
    pub const SECONDS: u8 = 0x00;
    pub const MINUTES: u8 = 0x01;
    pub const HOURS: u8 = 0x02;
    pub const DAY: u8 = 0x03;
    pub const DATE: u8 = 0x04;
    pub const MONTH: u8 = 0x05;
    pub const YEAR: u8 = 0x06;
    pub const TEMP_MSB: u8 = 0x11;
    pub const TEMP_LSB: u8 = 0x12;
}

const HOUR_12_MODE: u8 = 0x40;
const HOUR_PM: u8 = 0x20;
const CENTURY: u8 = 0x80;

/// DS3231 driver
pub struct Ds3231<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Ds3231<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn read_registers(&mut self, start: u8, buf: &mut [u8]) -> Result<(), RtcError> {
        self.i2c
            .write_read(DS3231_ADDRESS, &[start], buf)
            .map_err(|_| RtcError::Bus)
    }

    fn write_registers(&mut self, frame: &[u8]) -> Result<(), RtcError> {
        self.i2c
            .write(DS3231_ADDRESS, frame)
            .map_err(|_| RtcError::Bus)
    }
}

/// Decode the hours register in either 12- or 24-hour mode
fn decode_hour(raw: u8) -> u8 {
    if raw & HOUR_12_MODE == 0 {
        return bcd_decode(raw & 0x3F);
    }
    let hour = bcd_decode(raw & 0x1F) % 12;
    if raw & HOUR_PM != 0 {
        hour + 12
    } else {
        hour
    }
}

/// Decode registers 0x00-0x06
///
/// Rejects non-BCD nibbles. Well-formed but out-of-range fields are clamped
/// to their maximum.
fn decode_time(regs: &[u8; 7]) -> Result<ClockTime, RtcError> {
    let valid_bcd = regs
        .iter()
        .all(|&b| b & 0x0F <= 9 && (b >> 4) & 0x07 <= 9);
    if !valid_bcd {
        return Err(RtcError::InvalidData);
    }

    let time = ClockTime {
        second: bcd_decode(regs[0] & 0x7F),
        minute: bcd_decode(regs[1] & 0x7F),
        hour: decode_hour(regs[2]),
        day_of_week: regs[3] & 0x07,
        day: bcd_decode(regs[4] & 0x3F),
        month: bcd_decode(regs[5] & !CENTURY),
        year: bcd_decode(regs[6]),
    };
    Ok(time.clamped())
}

impl<I2C: I2c> TimeSource for Ds3231<I2C> {
    fn read_time(&mut self) -> Result<ClockTime, RtcError> {
        let mut regs = [0u8; 7];
        self.read_registers(reg::SECONDS, &mut regs)?;
        decode_time(&regs)
    }

    /// Set every calendar register; the hour is written in 24-hour mode
    fn write_time(&mut self, time: &ClockTime) -> Result<(), RtcError> {
        self.write_registers(&[
            reg::SECONDS,
            bcd_encode(time.second),
            bcd_encode(time.minute),
            bcd_encode(time.hour),
            time.day_of_week,
            bcd_encode(time.day),
            bcd_encode(time.month),
            bcd_encode(time.year),
        ])
    }

    /// Registers 0x02-0x06 only, so the running seconds and minutes are kept
    fn write_hour_and_date(&mut self, time: &ClockTime) -> Result<(), RtcError> {
        self.write_registers(&[
            reg::HOURS,
            bcd_encode(time.hour),
            time.day_of_week,
            bcd_encode(time.day),
            bcd_encode(time.month),
            bcd_encode(time.year),
        ])
    }
}

impl<I2C: I2c> TemperatureSensor for Ds3231<I2C> {
    /// Die temperature with 0.25°C resolution
    fn read_hundredths(&mut self) -> Result<i16, SensorError> {
        let mut raw = [0u8; 2];
        self.i2c
            .write_read(DS3231_ADDRESS, &[reg::TEMP_MSB], &mut raw)
            .map_err(|_| SensorError::Bus)?;
        let quarters = i16::from_be_bytes(raw) >> 6;
        Ok(25 * quarters)
    }
}
