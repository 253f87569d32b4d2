//! Tick task for time-based updates
//!
//! Provides periodic ticks to the clock task, stamped with the
//! milliseconds elapsed since boot. All setup and alarm timing is measured
//! against this stamp.

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Ticker};

/// Signal to notify the clock task of a tick
pub static TICK_SIGNAL: Signal<CriticalSectionRawMutex, u32> = Signal::new();

/// Tick task - sends periodic tick signals with timestamp
#[embassy_executor::task]
pub async fn tick_task(interval_ms: u32) {
    info!("Tick task started ({} ms)", interval_ms);

    let mut ticker = Ticker::every(Duration::from_millis(interval_ms as u64));

    loop {
        ticker.next().await;

        // Wraps after ~49 days; all consumers use wrapping arithmetic
        let now_ms = Instant::now().as_millis() as u32;

        TICK_SIGNAL.signal(now_ms);
    }
}
