//! Setup controller
//!
//! Turns sampled button levels and a monotonic millisecond clock into setup
//! state transitions. One transition at most per call; every wait is an
//! elapsed-time comparison, so the caller's loop never blocks.

use crate::config::TimingConfig;
use crate::settings::SettingsStore;
use crate::time::{ClockTime, DaylightDirection};
use crate::traits::Buttons;

use super::events::{Completion, SetupEvent, SetupOutcome};
use super::machine::SetupState;
use super::session::{SetupSession, StepChange};

/// Owns the setup state machine and the open session, if any
#[derive(Debug, Clone)]
pub struct SetupController {
    state: SetupState,
    timing: TimingConfig,
    /// When SET went down on the clock face
    armed_at: u32,
    session: Option<SetupSession>,
    /// Confirmed daylight shift not yet written to the RTC
    pending_daylight: DaylightDirection,
}

impl SetupController {
    pub fn new(timing: TimingConfig) -> Self {
        Self {
            state: SetupState::Clock,
            timing,
            armed_at: 0,
            session: None,
            pending_daylight: DaylightDirection::None,
        }
    }

    pub fn state(&self) -> SetupState {
        self.state
    }

    pub fn session(&self) -> Option<&SetupSession> {
        self.session.as_ref()
    }

    pub fn pending_daylight(&self) -> DaylightDirection {
        self.pending_daylight
    }

    /// Forget the pending shift once it has been written
    pub fn clear_pending_daylight(&mut self) {
        self.pending_daylight = DaylightDirection::None;
    }

    fn apply(&mut self, event: SetupEvent) {
        self.state = self.state.transition(event);
    }

    /// Run one step of the setup state machine
    ///
    /// `settings` and `time` seed the working copy when a session opens.
    pub fn update(
        &mut self,
        buttons: Buttons,
        now_ms: u32,
        settings: &SettingsStore,
        time: &ClockTime,
    ) -> SetupOutcome {
        match self.state {
            SetupState::Clock => {
                // A pending shift must reach the RTC before the menu reopens
                if !buttons.confirm || self.pending_daylight.is_pending() {
                    return SetupOutcome::None;
                }
                self.armed_at = now_ms;
                self.apply(SetupEvent::ConfirmPressed);
                SetupOutcome::Armed
            }

            SetupState::ArmMenu => {
                if !buttons.confirm {
                    self.apply(SetupEvent::ConfirmReleased);
                    return SetupOutcome::Disarmed;
                }
                if now_ms.wrapping_sub(self.armed_at) <= self.timing.long_press_ms {
                    return SetupOutcome::None;
                }
                self.session = Some(SetupSession::new(
                    *settings.format(),
                    *settings.alarm(),
                    *time,
                ));
                self.apply(SetupEvent::LongPress);
                SetupOutcome::Opened
            }

            SetupState::EnterMenu => {
                let Some(session) = self.session.as_mut() else {
                    self.state = SetupState::Clock;
                    return SetupOutcome::None;
                };
                session.enter_step();
                let step = session.step();
                self.apply(SetupEvent::StepShown);
                SetupOutcome::StepEntered { step }
            }

            SetupState::AwaitRelease => {
                if buttons.confirm {
                    return SetupOutcome::None;
                }
                if let Some(session) = self.session.as_mut() {
                    session.start_editing(now_ms);
                }
                self.apply(SetupEvent::ConfirmReleased);
                SetupOutcome::None
            }

            SetupState::EditParam => self.edit(buttons, now_ms),
        }
    }

    fn edit(&mut self, buttons: Buttons, now_ms: u32) -> SetupOutcome {
        let timing = self.timing;
        let Some(session) = self.session.as_mut() else {
            self.state = SetupState::Clock;
            return SetupOutcome::None;
        };

        if session.idle_ms(now_ms) > timing.abandon_timeout_ms {
            let step = session.step();
            self.session = None;
            self.apply(SetupEvent::InactivityTimeout);
            return SetupOutcome::Abandoned { step };
        }

        if session.edit_hold_active(now_ms, timing.edit_repeat_ms) {
            return SetupOutcome::None;
        }

        if buttons.confirm && session.since_entered(now_ms) >= timing.advance_debounce_ms {
            return match session.advance() {
                StepChange::Next(field) => {
                    self.apply(SetupEvent::Advance);
                    SetupOutcome::Advanced { step: field.step() }
                }
                StepChange::Complete(completion) => {
                    if let Completion::Daylight(direction) = completion {
                        self.pending_daylight = direction;
                    }
                    self.session = None;
                    self.apply(SetupEvent::WorkflowComplete);
                    SetupOutcome::Completed(completion)
                }
            };
        }

        let value = if buttons.inc {
            session.increment(now_ms)
        } else if buttons.dec {
            session.decrement(now_ms)
        } else {
            return SetupOutcome::None;
        };
        let step = session.step();
        self.apply(SetupEvent::FieldEdited);
        SetupOutcome::Edited { step, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::AlarmSchedule;
    use crate::setup::fields::STEP_DAY;

    struct Harness {
        controller: SetupController,
        settings: SettingsStore,
        time: ClockTime,
        now: u32,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                controller: SetupController::new(TimingConfig::default()),
                // alarm 07:00 for 5 s, disabled
                settings: SettingsStore::from_raw(0, 7, 0, 5),
                time: ClockTime::from_parts(24, 4, 30, 6, 59, 0),
                now: 0,
            }
        }

        fn tick(&mut self, buttons: Buttons) -> SetupOutcome {
            self.controller
                .update(buttons, self.now, &self.settings, &self.time)
        }

        fn tick_at(&mut self, now: u32, buttons: Buttons) -> SetupOutcome {
            self.now = now;
            self.tick(buttons)
        }

        /// Long press into the top menu and release, leaving EditParam
        fn open_menu(&mut self) {
            self.tick_at(0, Buttons::CONFIRM);
            self.tick_at(2100, Buttons::CONFIRM);
            self.tick_at(2150, Buttons::CONFIRM);
            self.tick_at(2200, Buttons::NONE);
            assert_eq!(self.controller.state(), SetupState::EditParam);
        }

        /// Press SET after the debounce, draw the next step and release
        fn confirm(&mut self) -> SetupOutcome {
            let at = self.now + 600;
            let outcome = self.tick_at(at, Buttons::CONFIRM);
            if self.controller.state() == SetupState::EnterMenu {
                self.tick_at(at + 50, Buttons::CONFIRM);
                self.tick_at(at + 100, Buttons::NONE);
            }
            outcome
        }

        fn press(&mut self, buttons: Buttons) -> SetupOutcome {
            let at = self.now + 600;
            self.tick_at(at, buttons)
        }
    }

    #[test]
    fn test_short_press_returns_to_clock() {
        let mut h = Harness::new();
        assert_eq!(h.tick_at(0, Buttons::CONFIRM), SetupOutcome::Armed);
        assert_eq!(h.tick_at(1000, Buttons::NONE), SetupOutcome::Disarmed);
        assert_eq!(h.controller.state(), SetupState::Clock);
        assert!(h.controller.session().is_none());
    }

    #[test]
    fn test_long_press_enters_menu() {
        let mut h = Harness::new();
        h.tick_at(0, Buttons::CONFIRM);
        assert_eq!(h.tick_at(2000, Buttons::CONFIRM), SetupOutcome::None);
        assert_eq!(h.tick_at(2100, Buttons::CONFIRM), SetupOutcome::Opened);
        assert_eq!(h.controller.state(), SetupState::EnterMenu);

        assert_eq!(
            h.tick_at(2150, Buttons::CONFIRM),
            SetupOutcome::StepEntered { step: 0 }
        );
        assert_eq!(h.controller.state(), SetupState::AwaitRelease);
        assert_eq!(h.tick_at(2200, Buttons::CONFIRM), SetupOutcome::None);
        assert_eq!(h.controller.state(), SetupState::AwaitRelease);
    }

    #[test]
    fn test_release_before_threshold_never_opens() {
        let mut h = Harness::new();
        h.tick_at(0, Buttons::CONFIRM);
        h.tick_at(1999, Buttons::CONFIRM);
        assert_eq!(h.tick_at(2500, Buttons::NONE), SetupOutcome::Disarmed);
        assert_eq!(h.controller.state(), SetupState::Clock);
    }

    #[test]
    fn test_advance_needs_debounce() {
        let mut h = Harness::new();
        h.open_menu();
        assert_eq!(h.tick_at(2500, Buttons::CONFIRM), SetupOutcome::None);
        assert_eq!(h.controller.state(), SetupState::EditParam);
        assert_eq!(
            h.tick_at(2700, Buttons::CONFIRM),
            SetupOutcome::Advanced { step: 1 }
        );
    }

    #[test]
    fn test_edit_then_blackout() {
        let mut h = Harness::new();
        h.open_menu();
        assert_eq!(
            h.tick_at(2300, Buttons::INC),
            SetupOutcome::Edited { step: 0, value: 1 }
        );
        // Held INC is ignored for the repeat interval
        assert_eq!(h.tick_at(2700, Buttons::INC), SetupOutcome::None);
        assert_eq!(
            h.tick_at(2800, Buttons::INC),
            SetupOutcome::Edited { step: 0, value: 2 }
        );
        // INC wins over DEC
        assert_eq!(
            h.tick_at(3300, Buttons::INC.union(Buttons::DEC)),
            SetupOutcome::Edited { step: 0, value: 3 }
        );
    }

    #[test]
    fn test_april_day_inc_wraps_to_one() {
        let mut h = Harness::new();
        h.open_menu();
        h.press(Buttons::INC); // date time
        h.confirm(); // year
        h.confirm(); // month
        h.confirm(); // day
        assert_eq!(h.controller.session().map(|s| s.step()), Some(STEP_DAY));

        assert_eq!(
            h.press(Buttons::INC),
            SetupOutcome::Edited {
                step: STEP_DAY,
                value: 1
            }
        );
    }

    #[test]
    fn test_alarm_scenario_commits_schedule() {
        let mut h = Harness::new();
        h.open_menu();
        h.confirm(); // alarm on/off
        h.press(Buttons::INC); // on
        h.confirm(); // hour 07
        h.confirm(); // minute 00
        h.confirm(); // length 05
        match h.confirm() {
            SetupOutcome::Completed(Completion::Alarm(alarm)) => assert_eq!(
                alarm,
                AlarmSchedule {
                    enabled: true,
                    hour: 7,
                    minute: 0,
                    duration_seconds: 5
                }
            ),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(h.controller.state(), SetupState::Clock);
        assert!(h.controller.session().is_none());
    }

    #[test]
    fn test_abandon_after_inactivity() {
        let mut h = Harness::new();
        h.open_menu();
        h.press(Buttons::INC);
        let last_edit = h.now;

        assert_eq!(h.tick_at(last_edit + 12000, Buttons::NONE), SetupOutcome::None);
        assert_eq!(
            h.tick_at(last_edit + 12001, Buttons::NONE),
            SetupOutcome::Abandoned { step: 0 }
        );
        assert_eq!(h.controller.state(), SetupState::Clock);
        assert!(h.controller.session().is_none());
    }

    #[test]
    fn test_pending_daylight_blocks_menu() {
        let mut h = Harness::new();
        h.open_menu();
        h.press(Buttons::INC);
        h.press(Buttons::INC); // daylight
        h.confirm();
        h.press(Buttons::DEC); // fall
        assert_eq!(
            h.confirm(),
            SetupOutcome::Completed(Completion::Daylight(DaylightDirection::Fall))
        );
        assert_eq!(h.controller.pending_daylight(), DaylightDirection::Fall);

        let at = h.now + 100;
        assert_eq!(h.tick_at(at, Buttons::CONFIRM), SetupOutcome::None);
        assert_eq!(h.controller.state(), SetupState::Clock);

        h.controller.clear_pending_daylight();
        assert_eq!(h.tick_at(at + 100, Buttons::CONFIRM), SetupOutcome::Armed);
    }

    #[test]
    fn test_cancelled_daylight_leaves_nothing_pending() {
        let mut h = Harness::new();
        h.open_menu();
        h.press(Buttons::INC);
        h.press(Buttons::INC);
        h.confirm();
        assert_eq!(
            h.confirm(),
            SetupOutcome::Completed(Completion::Daylight(DaylightDirection::None))
        );
        assert!(!h.controller.pending_daylight().is_pending());
    }
}
