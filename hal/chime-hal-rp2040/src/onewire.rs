//! Bit-banged 1-Wire master
//!
//! Drives the bus as open drain on a [`Flex`] pin: pulling low switches the
//! pin to an output at level low, releasing switches it back to an input
//! and lets the pull-up raise the line. An external 4.7k pull-up is
//! expected; the internal one is enabled as a fallback.
//!
//! Slot timing follows the standard-speed values from Maxim AN126. Each
//! slot runs with interrupts masked; the reset pulse does not need to.

use chime_hal::onewire::OneWireBus;
use embassy_rp::gpio::{Flex, Pull};
use embassy_time::{block_for, Duration};

/// 1-Wire bus errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OneWireError {
    /// Line held low before a reset; shorted or missing pull-up
    BusStuck,
}

fn delay_us(us: u64) {
    block_for(Duration::from_micros(us));
}

/// 1-Wire master on one GPIO
pub struct FlexOneWire<'d> {
    pin: Flex<'d>,
}

impl<'d> FlexOneWire<'d> {
    pub fn new(mut pin: Flex<'d>) -> Self {
        pin.set_pull(Pull::Up);
        pin.set_low();
        pin.set_as_input();
        Self { pin }
    }

    fn pull_low(&mut self) {
        self.pin.set_as_output();
    }

    fn release(&mut self) {
        self.pin.set_as_input();
    }

    fn write_bit(&mut self, bit: bool) {
        let (low_us, high_us) = if bit { (6, 64) } else { (60, 10) };
        cortex_m::interrupt::free(|_| {
            self.pull_low();
            delay_us(low_us);
            self.release();
        });
        delay_us(high_us);
    }

    fn read_bit(&mut self) -> bool {
        let bit = cortex_m::interrupt::free(|_| {
            self.pull_low();
            delay_us(6);
            self.release();
            delay_us(9);
            self.pin.is_high()
        });
        delay_us(55);
        bit
    }
}

impl OneWireBus for FlexOneWire<'_> {
    type Error = OneWireError;

    fn reset(&mut self) -> Result<bool, OneWireError> {
        self.release();
        if self.pin.is_low() {
            return Err(OneWireError::BusStuck);
        }

        self.pull_low();
        delay_us(480);
        let present = cortex_m::interrupt::free(|_| {
            self.release();
            delay_us(70);
            self.pin.is_low()
        });
        delay_us(410);
        Ok(present)
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), OneWireError> {
        for i in 0..8 {
            self.write_bit(byte & (1 << i) != 0);
        }
        Ok(())
    }

    fn read_byte(&mut self) -> Result<u8, OneWireError> {
        let mut byte = 0u8;
        for i in 0..8 {
            if self.read_bit() {
                byte |= 1 << i;
            }
        }
        Ok(byte)
    }
}
