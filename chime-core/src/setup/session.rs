//! Setup session: the working copy and the step cursor

use crate::settings::{AlarmSchedule, DisplayFormat};
use crate::time::{ClockTime, DaylightDirection};

use super::events::Completion;
use super::fields::{FieldRef, TopMenuSelection, WorkingCopy, STEP_ALARM_END, STEP_ALARM_HOUR};

/// Where [`SetupSession::advance`] went
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepChange {
    /// Moved to another step of the same workflow
    Next(FieldRef),
    /// Workflow finished
    Complete(Completion),
}

/// One pass through the setup menus
///
/// Lives from the long press until the workflow completes or is abandoned.
/// Dropping it discards every edit.
#[derive(Debug, Clone)]
pub struct SetupSession {
    field: FieldRef,
    copy: WorkingCopy,
    /// Start of the advance debounce
    step_entered_at: u32,
    /// Start of the abandon timeout
    last_activity_at: u32,
    /// Time of the last INC/DEC edit, for the repeat blackout
    last_edit_at: Option<u32>,
}

impl SetupSession {
    /// Open a session on the top-level menu with a copy of the current
    /// settings and time
    pub fn new(format: DisplayFormat, alarm: AlarmSchedule, time: ClockTime) -> Self {
        Self {
            field: FieldRef::TopMenu,
            copy: WorkingCopy {
                selection: TopMenuSelection::Alarm,
                daylight: DaylightDirection::None,
                format,
                alarm,
                time,
            },
            step_entered_at: 0,
            last_activity_at: 0,
            last_edit_at: None,
        }
    }

    /// Step ordinal
    pub fn step(&self) -> u8 {
        self.field.step()
    }

    pub fn field(&self) -> FieldRef {
        self.field
    }

    pub fn working(&self) -> &WorkingCopy {
        &self.copy
    }

    /// Current value of the active field
    pub fn value(&self) -> u8 {
        self.field.get(&self.copy)
    }

    /// Prepare the active step for display
    ///
    /// Pulls the field into range, resets the top-menu selection to the
    /// alarm entry and the daylight choice to cancel.
    pub fn enter_step(&mut self) {
        match self.field {
            FieldRef::TopMenu => self.copy.selection = TopMenuSelection::Alarm,
            FieldRef::Daylight => self.copy.daylight = DaylightDirection::None,
            _ => {}
        }
        self.field.clamp(&mut self.copy);
    }

    /// Start the advance and abandon clocks once SET is released
    pub fn start_editing(&mut self, now_ms: u32) {
        self.step_entered_at = now_ms;
        self.last_activity_at = now_ms;
        self.last_edit_at = None;
    }

    /// Time since editing of this step started
    pub fn since_entered(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.step_entered_at)
    }

    /// Time since the last INC/DEC activity
    pub fn idle_ms(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.last_activity_at)
    }

    /// Whether input is still blanked after the last edit
    pub fn edit_hold_active(&self, now_ms: u32, hold_ms: u32) -> bool {
        self.last_edit_at
            .is_some_and(|at| now_ms.wrapping_sub(at) < hold_ms)
    }

    pub fn increment(&mut self, now_ms: u32) -> u8 {
        self.touch(now_ms);
        self.field.increment(&mut self.copy)
    }

    pub fn decrement(&mut self, now_ms: u32) -> u8 {
        self.touch(now_ms);
        self.field.decrement(&mut self.copy)
    }

    fn touch(&mut self, now_ms: u32) {
        self.last_activity_at = now_ms;
        self.last_edit_at = Some(now_ms);
    }

    /// Move past the active step
    ///
    /// Leaving the top menu enters the selected workflow. Inside the alarm
    /// workflow, confirming "off" skips the hour, minute and length steps.
    pub fn advance(&mut self) -> StepChange {
        let workflow = self.copy.selection;
        let next = if self.field == FieldRef::TopMenu {
            workflow.first_step()
        } else {
            let next = self.step() + 1;
            if workflow == TopMenuSelection::Alarm
                && next == STEP_ALARM_HOUR
                && !self.copy.alarm.enabled
            {
                STEP_ALARM_END
            } else {
                next
            }
        };

        match FieldRef::for_step(next) {
            Some(field) if next < workflow.end_step() => {
                self.field = field;
                StepChange::Next(field)
            }
            _ => StepChange::Complete(self.completion(workflow)),
        }
    }

    fn completion(&self, workflow: TopMenuSelection) -> Completion {
        match workflow {
            TopMenuSelection::Alarm => Completion::Alarm(self.copy.alarm),
            TopMenuSelection::DateTime => {
                let mut time = self.copy.time;
                time.second = 0;
                Completion::DateTime(time.with_day_of_week())
            }
            TopMenuSelection::Daylight => Completion::Daylight(self.copy.daylight),
            TopMenuSelection::DisplayStyle => Completion::DisplayFormat(self.copy.format),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{DateStyle, TimeStyle};

    fn session() -> SetupSession {
        SetupSession::new(
            DisplayFormat::default(),
            AlarmSchedule::default(),
            ClockTime::from_parts(26, 10, 18, 9, 41, 27),
        )
    }

    fn choose(session: &mut SetupSession, selection: TopMenuSelection) {
        session.enter_step();
        for _ in 0..selection.index() {
            session.increment(0);
        }
    }

    #[test]
    fn test_top_menu_enters_selected_workflow() {
        let mut s = session();
        choose(&mut s, TopMenuSelection::DateTime);
        assert_eq!(s.advance(), StepChange::Next(FieldRef::Year));
        assert_eq!(s.step(), 5);
    }

    #[test]
    fn test_entering_top_menu_resets_selection() {
        let mut s = session();
        s.increment(0);
        assert_eq!(s.working().selection, TopMenuSelection::DateTime);
        s.enter_step();
        assert_eq!(s.working().selection, TopMenuSelection::Alarm);
    }

    #[test]
    fn test_alarm_off_skips_to_completion() {
        let mut s = session();
        choose(&mut s, TopMenuSelection::Alarm);
        assert_eq!(s.advance(), StepChange::Next(FieldRef::AlarmEnabled));
        s.enter_step();
        assert!(!s.working().alarm.enabled);

        match s.advance() {
            StepChange::Complete(Completion::Alarm(alarm)) => assert!(!alarm.enabled),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_alarm_on_walks_every_step() {
        let mut s = session();
        choose(&mut s, TopMenuSelection::Alarm);
        s.advance();
        s.enter_step();
        s.increment(0);

        assert_eq!(s.advance(), StepChange::Next(FieldRef::AlarmHour));
        assert_eq!(s.advance(), StepChange::Next(FieldRef::AlarmMinute));
        assert_eq!(s.advance(), StepChange::Next(FieldRef::AlarmLength));
        match s.advance() {
            StepChange::Complete(Completion::Alarm(alarm)) => assert!(alarm.enabled),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_date_time_completion_zeroes_seconds() {
        let mut s = session();
        choose(&mut s, TopMenuSelection::DateTime);
        s.advance();
        s.enter_step();
        s.increment(0); // year 27

        for _ in 0..4 {
            assert!(matches!(s.advance(), StepChange::Next(_)));
            s.enter_step();
        }
        match s.advance() {
            StepChange::Complete(Completion::DateTime(time)) => {
                assert_eq!(time.year, 27);
                assert_eq!(time.second, 0);
                assert_eq!(time.minute, 41);
                assert_eq!(time.day_of_week, 2); // Mon 2027-10-18
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_daylight_step_resets_to_cancel() {
        let mut s = session();
        choose(&mut s, TopMenuSelection::Daylight);
        s.advance();
        s.copy.daylight = DaylightDirection::Fall;
        s.enter_step();
        assert_eq!(s.working().daylight, DaylightDirection::None);

        s.increment(0);
        assert_eq!(
            s.advance(),
            StepChange::Complete(Completion::Daylight(DaylightDirection::Spring))
        );
    }

    #[test]
    fn test_display_style_workflow() {
        let mut s = session();
        choose(&mut s, TopMenuSelection::DisplayStyle);
        assert_eq!(s.advance(), StepChange::Next(FieldRef::DateStyle));
        s.enter_step();
        s.decrement(0);
        assert_eq!(s.advance(), StepChange::Next(FieldRef::TimeStyle));
        s.enter_step();
        s.increment(0);
        assert_eq!(s.advance(), StepChange::Next(FieldRef::TempUnit));
        s.enter_step();
        match s.advance() {
            StepChange::Complete(Completion::DisplayFormat(format)) => {
                assert_eq!(format.date_style, DateStyle::Mdy);
                assert_eq!(format.time_style, TimeStyle::H12);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_edit_hold_and_idle_clocks() {
        let mut s = session();
        s.start_editing(1000);
        assert!(!s.edit_hold_active(1000, 500));
        assert_eq!(s.since_entered(1600), 600);

        s.increment(2000);
        assert!(s.edit_hold_active(2499, 500));
        assert!(!s.edit_hold_active(2500, 500));
        assert_eq!(s.idle_ms(2600), 600);
        assert_eq!(s.since_entered(2600), 1600);
    }
}
