//! Clock cycle implementation
//!
//! One call to [`ClockCycle::tick`] samples the buttons, refreshes the clock
//! face when no setup session is open, runs one setup transition and applies
//! whatever a finished workflow asks for.

use chime_hal::storage::ByteStorage;
use heapless::Vec;

use crate::alarm::AlarmMonitor;
use crate::config::ClockConfig;
use crate::display::{ClockFace, Renderer, Screen};
use crate::settings::{LoadStatus, SettingsStore};
use crate::setup::{Completion, SetupController, SetupOutcome, SetupState};
use crate::time::{apply_daylight_shift, daylight_shift_allowed, ClockTime};
use crate::traits::{
    ButtonInput, Buzzer, ClockDisplay, TemperatureSensor, TimeSource, SENSOR_FAULT_HUNDREDTHS,
};

use super::events::{ClockError, ClockEvent, MAX_TICK_EVENTS};

/// Events from one tick
pub type TickEvents = Vec<ClockEvent, MAX_TICK_EVENTS>;

/// The appliance main loop, one tick at a time
///
/// - `R`: RTC, also the local temperature sensor
/// - `P`: external temperature probe
/// - `S`: settings storage
/// - `I`: button sampler
/// - `B`: alarm buzzer
/// - `D`: display
pub struct ClockCycle<R, P, S, I, B, D> {
    rtc: R,
    probe: P,
    storage: S,
    buttons: I,
    buzzer: B,
    display: D,
    settings: SettingsStore,
    controller: SetupController,
    alarm: AlarmMonitor,
    renderer: Renderer,
    /// Last time read successfully
    time: ClockTime,
    local_hundredths: i16,
    probe_hundredths: i16,
    /// Temperatures are read at most once per probe conversion
    sensor_interval_ms: u32,
    sensors_read_at: Option<u32>,
}

impl<R, P, S, I, B, D> ClockCycle<R, P, S, I, B, D>
where
    R: TimeSource + TemperatureSensor,
    P: TemperatureSensor,
    S: ByteStorage,
    I: ButtonInput,
    B: Buzzer,
    D: ClockDisplay,
{
    /// Load the persisted settings and silence the buzzer
    pub fn new(
        config: &ClockConfig,
        rtc: R,
        probe: P,
        mut storage: S,
        buttons: I,
        mut buzzer: B,
        display: D,
    ) -> Self {
        let settings = SettingsStore::load(&mut storage);
        buzzer.set_buzzer(false);
        Self {
            rtc,
            probe,
            storage,
            buttons,
            buzzer,
            display,
            settings,
            controller: SetupController::new(config.timing),
            alarm: AlarmMonitor::new(),
            renderer: Renderer::new(),
            time: ClockTime::default(),
            local_hundredths: SENSOR_FAULT_HUNDREDTHS,
            probe_hundredths: SENSOR_FAULT_HUNDREDTHS,
            sensor_interval_ms: config.probe.conversion_ms as u32,
            sensors_read_at: None,
        }
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn load_status(&self) -> LoadStatus {
        self.settings.load_status()
    }

    pub fn setup_state(&self) -> SetupState {
        self.controller.state()
    }

    pub fn controller(&self) -> &SetupController {
        &self.controller
    }

    pub fn alarm(&self) -> &AlarmMonitor {
        &self.alarm
    }

    /// Last time read from the RTC
    pub fn time(&self) -> &ClockTime {
        &self.time
    }

    /// Last screen handed to the display
    pub fn screen(&self) -> &Screen {
        self.renderer.screen()
    }

    /// Draw the start-up banner
    pub fn show_banner(&mut self) {
        self.renderer.render_banner();
        self.display.show(self.renderer.screen());
    }

    /// Run one cycle at monotonic time `now_ms`
    ///
    /// Transport failures are reported after the rest of the tick has run;
    /// the clock keeps the last good time and carries on next tick.
    pub fn tick(&mut self, now_ms: u32) -> Result<TickEvents, ClockError> {
        let mut events = TickEvents::new();
        let mut failure = None;

        let buttons = self.buttons.sample();

        if self.controller.state().shows_clock() {
            if let Err(e) = self.refresh_clock(now_ms, &mut events) {
                failure = Some(e);
            }
        }

        let outcome = self
            .controller
            .update(buttons, now_ms, &self.settings, &self.time);
        if let Err(e) = self.handle_outcome(outcome, &mut events) {
            failure = Some(e);
        }

        match failure {
            Some(e) => Err(e),
            None => Ok(events),
        }
    }

    /// Read the RTC, apply a pending daylight shift, draw the clock face and
    /// run the alarm
    fn refresh_clock(&mut self, now_ms: u32, events: &mut TickEvents) -> Result<(), ClockError> {
        // First transport failure, reported once the face and alarm are done
        let mut result = Ok(());
        match self.rtc.read_time() {
            Ok(time) => {
                self.time = time;

                let pending = self.controller.pending_daylight();
                if pending.is_pending() && daylight_shift_allowed(&time) {
                    let shifted = apply_daylight_shift(time, pending);
                    match self.rtc.write_hour_and_date(&shifted) {
                        Ok(()) => {
                            self.time = shifted;
                            self.controller.clear_pending_daylight();
                            let _ = events.push(ClockEvent::DaylightApplied(pending));
                        }
                        // Still pending, retried next cycle
                        Err(e) => result = Err(e),
                    }
                }
            }
            Err(e) => result = Err(e),
        }

        let sensors_due = self
            .sensors_read_at
            .map_or(true, |at| now_ms.wrapping_sub(at) >= self.sensor_interval_ms);
        if sensors_due {
            self.local_hundredths = self.rtc.read_or_sentinel();
            self.probe_hundredths = self.probe.read_or_sentinel();
            self.sensors_read_at = Some(now_ms);
        }

        self.renderer.render_clock_face(&ClockFace {
            time: &self.time,
            format: self.settings.format(),
            alarm: self.settings.alarm(),
            local_hundredths: self.local_hundredths,
            probe_hundredths: self.probe_hundredths,
        });
        self.display.show(self.renderer.screen());

        if let Some(event) =
            self.alarm
                .evaluate(self.settings.alarm(), self.time.hour, self.time.minute, now_ms)
        {
            if let Some(on) = event.buzzer() {
                self.buzzer.set_buzzer(on);
            }
            let _ = events.push(ClockEvent::Alarm(event));
        }

        result.map_err(ClockError::from)
    }

    fn handle_outcome(
        &mut self,
        outcome: SetupOutcome,
        events: &mut TickEvents,
    ) -> Result<(), ClockError> {
        if outcome.needs_render() {
            if let Some(session) = self.controller.session() {
                self.renderer.render_setup(session);
                self.display.show(self.renderer.screen());
            }
        }

        let event = match outcome {
            SetupOutcome::None => return Ok(()),
            SetupOutcome::Armed => ClockEvent::MenuArmed,
            SetupOutcome::Disarmed => ClockEvent::MenuDisarmed,
            SetupOutcome::Opened => ClockEvent::SessionOpened,
            SetupOutcome::StepEntered { step } => ClockEvent::StepEntered { step },
            SetupOutcome::Advanced { step } => ClockEvent::StepAdvanced { step },
            SetupOutcome::Edited { step, value } => ClockEvent::FieldEdited { step, value },
            SetupOutcome::Abandoned { step } => ClockEvent::SessionAbandoned { step },
            SetupOutcome::Completed(completion) => self.complete(completion)?,
        };
        let _ = events.push(event);
        Ok(())
    }

    /// Apply a finished workflow
    fn complete(&mut self, completion: Completion) -> Result<ClockEvent, ClockError> {
        let event = match completion {
            Completion::Alarm(alarm) => {
                let mut writes = self
                    .settings
                    .commit_alarm_if_changed(&mut self.storage, alarm)?;
                let format = *self.settings.format();
                writes += self
                    .settings
                    .commit_format_if_changed(&mut self.storage, format)?;
                ClockEvent::SettingsCommitted { writes }
            }
            Completion::DateTime(time) => {
                self.rtc.write_time(&time)?;
                self.time = time;
                ClockEvent::TimeSet(time)
            }
            Completion::Daylight(direction) => ClockEvent::DaylightScheduled(direction),
            Completion::DisplayFormat(format) => {
                let writes = self
                    .settings
                    .commit_format_if_changed(&mut self.storage, format)?;
                ClockEvent::SettingsCommitted { writes }
            }
        };
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::{AlarmEvent, AlarmPhase};
    use crate::settings::{DateStyle, TempUnit};
    use crate::time::DaylightDirection;
    use crate::traits::{Buttons, RtcError, SensorError};
    use chime_hal::storage::{StorageAddress, StorageError};

    struct FakeRtc {
        time: ClockTime,
        fail_reads: bool,
        fail_writes: bool,
        full_writes: u32,
        daylight_writes: u32,
        temp_reads: u32,
    }

    impl TimeSource for FakeRtc {
        fn read_time(&mut self) -> Result<ClockTime, RtcError> {
            if self.fail_reads {
                Err(RtcError::Bus)
            } else {
                Ok(self.time)
            }
        }

        fn write_time(&mut self, time: &ClockTime) -> Result<(), RtcError> {
            self.time = *time;
            self.full_writes += 1;
            Ok(())
        }

        fn write_hour_and_date(&mut self, time: &ClockTime) -> Result<(), RtcError> {
            if self.fail_writes {
                return Err(RtcError::Bus);
            }
            self.time.hour = time.hour;
            self.time.day_of_week = time.day_of_week;
            self.time.day = time.day;
            self.time.month = time.month;
            self.time.year = time.year;
            self.daylight_writes += 1;
            Ok(())
        }
    }

    impl TemperatureSensor for FakeRtc {
        fn read_hundredths(&mut self) -> Result<i16, SensorError> {
            self.temp_reads += 1;
            Ok(2350)
        }
    }

    struct NoProbe;

    impl TemperatureSensor for NoProbe {
        fn read_hundredths(&mut self) -> Result<i16, SensorError> {
            Err(SensorError::NotPresent)
        }
    }

    struct MemStorage {
        cells: [u8; 4],
        writes: u32,
    }

    impl ByteStorage for MemStorage {
        fn read_byte(&mut self, address: StorageAddress) -> Result<u8, StorageError> {
            Ok(self.cells[address as usize])
        }

        fn write_byte(&mut self, address: StorageAddress, value: u8) -> Result<(), StorageError> {
            self.cells[address as usize] = value;
            self.writes += 1;
            Ok(())
        }
    }

    struct Panel(Buttons);

    impl ButtonInput for Panel {
        fn sample(&mut self) -> Buttons {
            self.0
        }
    }

    struct Beeper(bool);

    impl Buzzer for Beeper {
        fn set_buzzer(&mut self, on: bool) {
            self.0 = on;
        }
    }

    #[derive(Default)]
    struct Frames(u32);

    impl ClockDisplay for Frames {
        fn show(&mut self, _screen: &Screen) {
            self.0 += 1;
        }
    }

    type TestCycle = ClockCycle<FakeRtc, NoProbe, MemStorage, Panel, Beeper, Frames>;

    struct Harness {
        cycle: TestCycle,
        now: u32,
    }

    impl Harness {
        /// Clock at `time`, storage cells [flags, minute, hour, length]
        fn new(time: ClockTime, cells: [u8; 4]) -> Self {
            let cycle = ClockCycle::new(
                &ClockConfig::default(),
                FakeRtc {
                    time,
                    fail_reads: false,
                    fail_writes: false,
                    full_writes: 0,
                    daylight_writes: 0,
                    temp_reads: 0,
                },
                NoProbe,
                MemStorage { cells, writes: 0 },
                Panel(Buttons::NONE),
                Beeper(true),
                Frames::default(),
            );
            Self { cycle, now: 0 }
        }

        fn tick_at(&mut self, now: u32, buttons: Buttons) -> TickEvents {
            self.now = now;
            self.cycle.buttons.0 = buttons;
            self.cycle.tick(now).unwrap()
        }

        fn after(&mut self, ms: u32, buttons: Buttons) -> TickEvents {
            let at = self.now + ms;
            self.tick_at(at, buttons)
        }

        fn open_menu(&mut self) {
            self.after(10, Buttons::CONFIRM);
            self.after(2100, Buttons::CONFIRM);
            self.after(50, Buttons::CONFIRM);
            self.after(50, Buttons::NONE);
            assert_eq!(self.cycle.setup_state(), SetupState::EditParam);
        }

        fn confirm(&mut self) -> TickEvents {
            let events = self.after(600, Buttons::CONFIRM);
            if self.cycle.setup_state() == SetupState::EnterMenu {
                self.after(50, Buttons::CONFIRM);
                self.after(50, Buttons::NONE);
            }
            events
        }

        fn press(&mut self, buttons: Buttons) -> TickEvents {
            self.after(600, buttons)
        }

        fn set_time(&mut self, hour: u8, minute: u8, second: u8) {
            let time = &mut self.cycle.rtc.time;
            time.hour = hour;
            time.minute = minute;
            time.second = second;
        }
    }

    #[test]
    fn test_new_silences_buzzer_and_loads_settings() {
        let h = Harness::new(ClockTime::default(), [0xFF; 4]);
        assert!(!h.cycle.buzzer.0);
        assert_eq!(h.cycle.load_status(), LoadStatus::FlagsReset);
        assert_eq!(h.cycle.storage.cells[0], 0);
    }

    #[test]
    fn test_clock_face_refresh() {
        let mut h = Harness::new(ClockTime::from_parts(26, 10, 18, 9, 30, 15), [0, 0, 7, 5]);
        let events = h.tick_at(0, Buttons::NONE);
        assert!(events.is_empty());
        assert_eq!(h.cycle.screen().get_line(0), Some("SUNDAY 2026/10/18"));
        assert_eq!(h.cycle.screen().get_line(1), Some("09:30:15"));
        assert_eq!(h.cycle.screen().get_line(4), Some("Probe -55.00 C"));
        assert_eq!(h.cycle.display.0, 1);
    }

    #[test]
    fn test_temperatures_follow_probe_conversion() {
        let mut h = Harness::new(ClockTime::default(), [0, 0, 7, 5]);
        h.tick_at(0, Buttons::NONE);
        h.tick_at(50, Buttons::NONE);
        h.tick_at(700, Buttons::NONE);
        assert_eq!(h.cycle.rtc.temp_reads, 1);

        h.tick_at(750, Buttons::NONE);
        assert_eq!(h.cycle.rtc.temp_reads, 2);
        assert_eq!(h.cycle.screen().get_line(3), Some("Local 23.50 C"));
    }

    #[test]
    fn test_seven_am_alarm() {
        // Alarm enabled, 07:00, 5 s
        let mut h = Harness::new(ClockTime::from_parts(26, 10, 19, 6, 59, 59), [0x10, 0, 7, 5]);
        h.tick_at(0, Buttons::NONE);
        assert!(!h.cycle.buzzer.0);
        assert_eq!(
            h.cycle.screen().get_line(2),
            Some("ALARM AT: 07:00")
        );

        h.set_time(7, 0, 0);
        let events = h.tick_at(1000, Buttons::NONE);
        assert_eq!(events.as_slice(), &[ClockEvent::Alarm(AlarmEvent::Started)]);
        assert!(h.cycle.buzzer.0);

        h.tick_at(5999, Buttons::NONE);
        assert!(h.cycle.buzzer.0);

        let events = h.tick_at(6000, Buttons::NONE);
        assert_eq!(events.as_slice(), &[ClockEvent::Alarm(AlarmEvent::Finished)]);
        assert!(!h.cycle.buzzer.0);

        h.set_time(7, 0, 40);
        assert!(h.tick_at(40_000, Buttons::NONE).is_empty());
        assert!(!h.cycle.buzzer.0);

        h.set_time(7, 1, 0);
        let events = h.tick_at(60_000, Buttons::NONE);
        assert_eq!(events.as_slice(), &[ClockEvent::Alarm(AlarmEvent::Rearmed)]);
        assert_eq!(h.cycle.alarm().phase(), AlarmPhase::Idle);
    }

    #[test]
    fn test_abandon_keeps_stored_settings() {
        let mut h = Harness::new(ClockTime::default(), [0, 0, 7, 5]);
        h.open_menu();
        h.press(Buttons::INC);
        h.press(Buttons::INC);
        h.press(Buttons::INC); // display style
        h.confirm();
        h.press(Buttons::INC); // DMY
        assert_eq!(
            h.cycle
                .controller()
                .session()
                .map(|s| s.working().format.date_style),
            Some(DateStyle::Dmy)
        );

        let events = h.after(12_001, Buttons::NONE);
        assert_eq!(
            events.as_slice(),
            &[ClockEvent::SessionAbandoned { step: 11 }]
        );
        assert_eq!(h.cycle.settings().format().date_style, DateStyle::Ymd);
        assert_eq!(h.cycle.storage.writes, 0);
        assert_eq!(h.cycle.setup_state(), SetupState::Clock);
    }

    #[test]
    fn test_abandoned_alarm_minute_edit_is_dropped() {
        let mut h = Harness::new(ClockTime::default(), [0x10, 0, 7, 5]);
        h.open_menu();
        h.confirm(); // alarm on/off
        h.confirm(); // hour
        h.confirm(); // minute
        h.press(Buttons::INC);
        h.press(Buttons::INC);
        assert_eq!(
            h.cycle
                .controller()
                .session()
                .map(|s| s.working().alarm.minute),
            Some(2)
        );

        let events = h.after(12_001, Buttons::NONE);
        assert_eq!(
            events.as_slice(),
            &[ClockEvent::SessionAbandoned { step: 3 }]
        );
        let alarm = h.cycle.settings().alarm();
        assert!(alarm.enabled);
        assert_eq!((alarm.hour, alarm.minute, alarm.duration_seconds), (7, 0, 5));
        assert_eq!(h.cycle.storage.cells, [0x10, 0, 7, 5]);
        assert_eq!(h.cycle.storage.writes, 0);
    }

    #[test]
    fn test_display_style_commit_writes_flags_once() {
        let mut h = Harness::new(ClockTime::default(), [0, 0, 7, 5]);
        h.open_menu();
        for _ in 0..3 {
            h.press(Buttons::INC);
        }
        h.confirm(); // date style
        h.confirm(); // time style
        h.confirm(); // temp unit
        h.press(Buttons::INC); // fahrenheit
        let events = h.confirm();
        assert_eq!(
            events.as_slice(),
            &[ClockEvent::SettingsCommitted { writes: 1 }]
        );
        assert_eq!(h.cycle.settings().format().temp_unit, TempUnit::Fahrenheit);
        assert_eq!(h.cycle.storage.cells[0], 0b0000_1000);

        // Same choices again: nothing to write
        h.after(100, Buttons::NONE);
        h.open_menu();
        for _ in 0..3 {
            h.press(Buttons::INC);
        }
        h.confirm();
        h.confirm();
        h.confirm();
        let events = h.confirm();
        assert_eq!(
            events.as_slice(),
            &[ClockEvent::SettingsCommitted { writes: 0 }]
        );
        assert_eq!(h.cycle.storage.writes, 1);
    }

    #[test]
    fn test_alarm_workflow_persists_cells() {
        let mut h = Harness::new(ClockTime::default(), [0, 0, 7, 5]);
        h.open_menu();
        h.confirm(); // alarm on/off
        h.press(Buttons::INC); // on
        h.confirm(); // hour
        h.press(Buttons::INC); // 08
        h.confirm(); // minute
        h.confirm(); // length
        let events = h.confirm();
        assert_eq!(
            events.as_slice(),
            &[ClockEvent::SettingsCommitted { writes: 2 }]
        );
        assert_eq!(h.cycle.storage.cells, [0x10, 0, 8, 5]);
        assert!(h.cycle.settings().alarm().enabled);
    }

    #[test]
    fn test_date_time_workflow_sets_rtc() {
        let mut h = Harness::new(ClockTime::from_parts(24, 4, 30, 10, 20, 45), [0, 0, 7, 5]);
        h.tick_at(0, Buttons::NONE);
        h.open_menu();
        h.press(Buttons::INC); // date time
        h.confirm(); // year
        h.confirm(); // month
        h.confirm(); // day
        h.press(Buttons::INC); // 30 -> 1
        h.confirm(); // hour
        h.confirm(); // minute
        let events = h.confirm();

        let expected = ClockTime::from_parts(24, 4, 1, 10, 20, 0);
        assert_eq!(events.as_slice(), &[ClockEvent::TimeSet(expected)]);
        assert_eq!(h.cycle.rtc.time, expected);
        assert_eq!(h.cycle.rtc.full_writes, 1);
    }

    #[test]
    fn test_daylight_waits_for_safe_window() {
        let mut h = Harness::new(ClockTime::from_parts(26, 3, 29, 1, 30, 0), [0, 0, 7, 5]);
        h.open_menu();
        h.press(Buttons::INC);
        h.press(Buttons::INC); // daylight
        h.confirm();
        h.press(Buttons::INC); // spring
        let events = h.confirm();
        assert_eq!(
            events.as_slice(),
            &[ClockEvent::DaylightScheduled(DaylightDirection::Spring)]
        );

        // Last minute of the hour: held back, and SET cannot reopen the menu
        h.set_time(1, 59, 10);
        let events = h.after(100, Buttons::CONFIRM);
        assert!(events.is_empty());
        assert_eq!(h.cycle.rtc.daylight_writes, 0);
        assert_eq!(h.cycle.setup_state(), SetupState::Clock);

        h.set_time(2, 0, 58);
        h.after(100, Buttons::NONE);
        assert_eq!(h.cycle.rtc.daylight_writes, 0);

        h.set_time(2, 1, 0);
        let events = h.after(100, Buttons::NONE);
        assert_eq!(
            events.as_slice(),
            &[ClockEvent::DaylightApplied(DaylightDirection::Spring)]
        );
        assert_eq!(h.cycle.rtc.time.hour, 3);
        assert_eq!(h.cycle.rtc.time.minute, 1);
        assert_eq!(h.cycle.time().hour, 3);
        assert!(!h.cycle.controller().pending_daylight().is_pending());
    }

    #[test]
    fn test_failed_daylight_write_still_refreshes_clock() {
        // Alarm enabled at 02:01
        let mut h = Harness::new(ClockTime::from_parts(26, 3, 29, 1, 30, 0), [0x10, 1, 2, 5]);
        h.open_menu();
        h.press(Buttons::INC);
        h.press(Buttons::INC); // daylight
        h.confirm();
        h.press(Buttons::INC); // spring
        h.confirm();

        h.set_time(2, 1, 0);
        h.cycle.rtc.fail_writes = true;
        h.cycle.buttons.0 = Buttons::NONE;
        let now = h.now + 1000;
        assert_eq!(h.cycle.tick(now), Err(ClockError::Rtc(RtcError::Bus)));
        assert_eq!(h.cycle.time().hour, 2);
        assert_eq!(h.cycle.screen().get_line(1), Some("02:01:00"));
        assert!(h.cycle.buzzer.0);
        assert!(h.cycle.controller().pending_daylight().is_pending());

        h.cycle.rtc.fail_writes = false;
        h.now = now;
        let events = h.after(100, Buttons::NONE);
        assert_eq!(
            events.as_slice(),
            &[ClockEvent::DaylightApplied(DaylightDirection::Spring)]
        );
        assert_eq!(h.cycle.time().hour, 3);
    }

    #[test]
    fn test_rtc_failure_keeps_last_time() {
        let mut h = Harness::new(ClockTime::from_parts(26, 10, 18, 9, 30, 15), [0, 0, 7, 5]);
        h.tick_at(0, Buttons::NONE);
        h.cycle.rtc.fail_reads = true;
        h.cycle.rtc.time.minute = 45;

        assert_eq!(h.cycle.tick(100), Err(ClockError::Rtc(RtcError::Bus)));
        assert_eq!(h.cycle.time().minute, 30);
        assert_eq!(h.cycle.screen().get_line(1), Some("09:30:15"));

        // SET is still handled while the RTC is down
        h.cycle.buttons.0 = Buttons::CONFIRM;
        assert!(h.cycle.tick(200).is_err());
        assert_eq!(h.cycle.setup_state(), SetupState::ArmMenu);
    }

    #[test]
    fn test_banner() {
        let mut h = Harness::new(ClockTime::default(), [0, 0, 7, 5]);
        h.cycle.show_banner();
        assert_eq!(h.cycle.screen().get_line(0), Some("CLOCK"));
        assert_eq!(h.cycle.display.0, 1);
    }
}
