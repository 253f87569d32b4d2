//! Chime - Alarm Clock Firmware
//!
//! Main firmware binary for RP2040-based alarm clocks: a DS3231 real-time
//! clock, a DS18B20 temperature probe, three buttons and a buzzer.
//!
//! Board wiring (Raspberry Pi Pico):
//!
//! | Function      | Pin    |
//! |---------------|--------|
//! | I2C0 SDA      | GPIO4  |
//! | I2C0 SCL      | GPIO5  |
//! | 1-Wire probe  | GPIO2  |
//! | SET button    | GPIO10 |
//! | INC button    | GPIO11 |
//! | DEC button    | GPIO12 |
//! | Buzzer        | GPIO15 |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Flex, Input, Level, Output, Pull};
use embassy_rp::i2c::{Config as I2cConfig, I2c};
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use chime_core::config::ClockConfig;
use chime_core::cycle::ClockCycle;
use chime_core::settings::LoadStatus;
use chime_drivers::input::ButtonPanel;
use chime_drivers::output::GpioBuzzer;
use chime_drivers::rtc::Ds3231;
use chime_drivers::sensor::Ds18b20;
use chime_hal::gpio::Polarity;
use chime_hal_rp2040::{FlashByteStorage, FlexOneWire, RpInput, RpOutput};

use crate::config::load_config;
use crate::display::LogDisplay;

mod config;
mod display;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit clock.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../clock.toml");

/// DS3231 supports fast mode
const I2C_FREQUENCY_HZ: u32 = 400_000;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Chime firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config(EMBEDDED_CONFIG);

    // Real-time clock, also the local temperature sensor
    let mut i2c_config = I2cConfig::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);
    let rtc = Ds3231::new(i2c);

    // External probe
    let probe = if config.probe.enabled {
        let mut probe = Ds18b20::new(FlexOneWire::new(Flex::new(p.PIN_2)));
        // First result is ready by the end of the banner
        if let Err(e) = probe.start_conversion() {
            warn!("Probe not responding: {:?}", e);
        }
        Some(probe)
    } else {
        info!("Probe disabled in configuration");
        None
    };

    let storage = FlashByteStorage::new(p.FLASH, p.DMA_CH0);

    let buttons = ButtonPanel::new_active_low(
        RpInput(Input::new(p.PIN_10, Pull::Up)),
        RpInput(Input::new(p.PIN_11, Pull::Up)),
        RpInput(Input::new(p.PIN_12, Pull::Up)),
    );

    let buzzer = init_buzzer(&config, p.PIN_15);

    let mut clock = ClockCycle::new(
        &config,
        rtc,
        probe,
        storage,
        buttons,
        buzzer,
        LogDisplay::new(),
    );

    match clock.load_status() {
        LoadStatus::Clean => info!("Settings loaded"),
        LoadStatus::FlagsReset => warn!("Stored display flags were invalid, reset to defaults"),
        LoadStatus::ReadFailed(e) => error!("Settings unreadable ({:?}), using defaults", e),
    }

    clock.show_banner();
    Timer::after_millis(config.splash_ms as u64).await;

    spawner.spawn(unwrap!(tasks::tick_task(config.tick_interval_ms)));
    spawner.spawn(unwrap!(tasks::clock_task(clock)));

    info!("All tasks spawned, firmware running");

    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Drive the buzzer pin to its silent level before anything else runs
fn init_buzzer(
    config: &ClockConfig,
    pin: embassy_rp::Peri<'static, embassy_rp::peripherals::PIN_15>,
) -> GpioBuzzer<RpOutput<'static>> {
    let polarity = if config.buzzer.active_low {
        Polarity::ActiveLow
    } else {
        Polarity::ActiveHigh
    };
    let silent = if polarity.level(false) {
        Level::High
    } else {
        Level::Low
    };
    GpioBuzzer::new(RpOutput(Output::new(pin, silent)), polarity)
}
