//! Clock task
//!
//! Owns the clock cycle and runs it once per tick. Events and transport
//! errors coming back from the cycle are logged; the cycle itself recovers
//! on the next tick.

use defmt::*;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;

use chime_core::cycle::{ClockCycle, ClockError, ClockEvent};
use chime_drivers::input::ButtonPanel;
use chime_drivers::output::GpioBuzzer;
use chime_drivers::rtc::Ds3231;
use chime_drivers::sensor::Ds18b20;
use chime_hal_rp2040::{FlashByteStorage, FlexOneWire, RpInput, RpOutput};

use crate::display::LogDisplay;

use super::tick::TICK_SIGNAL;

/// The clock cycle as wired on the board
pub type BoardClock = ClockCycle<
    Ds3231<I2c<'static, I2C0, Blocking>>,
    Option<Ds18b20<FlexOneWire<'static>>>,
    FlashByteStorage<'static>,
    ButtonPanel<RpInput<'static>, RpInput<'static>, RpInput<'static>>,
    GpioBuzzer<RpOutput<'static>>,
    LogDisplay,
>;

/// Clock task - one cycle per tick
#[embassy_executor::task]
pub async fn clock_task(mut clock: BoardClock) {
    info!("Clock task started");

    loop {
        let now_ms = TICK_SIGNAL.wait().await;

        match clock.tick(now_ms) {
            Ok(events) => {
                for event in events.iter() {
                    log_event(event);
                }
            }
            Err(e) => log_error(e),
        }
    }
}

fn log_event(event: &ClockEvent) {
    match event {
        ClockEvent::MenuArmed | ClockEvent::MenuDisarmed => trace!("{:?}", event),
        ClockEvent::StepEntered { .. }
        | ClockEvent::StepAdvanced { .. }
        | ClockEvent::FieldEdited { .. } => debug!("Setup: {:?}", event),
        ClockEvent::SessionOpened => info!("Setup menu opened"),
        ClockEvent::SessionAbandoned { step } => {
            info!("Setup abandoned at step {} after inactivity", step)
        }
        ClockEvent::SettingsCommitted { writes } => {
            info!("Settings committed ({} bytes written)", writes)
        }
        ClockEvent::TimeSet(time) => info!("RTC set: {:?}", time),
        ClockEvent::DaylightScheduled(direction) => {
            info!("Daylight shift {:?} scheduled", direction)
        }
        ClockEvent::DaylightApplied(direction) => info!("Daylight shift {:?} applied", direction),
        ClockEvent::Alarm(alarm) => info!("Alarm: {:?}", alarm),
    }
}

fn log_error(error: ClockError) {
    match error {
        ClockError::Rtc(e) => warn!("RTC error: {:?}", e),
        ClockError::Storage(e) => error!("Settings storage error: {:?}", e),
    }
}
