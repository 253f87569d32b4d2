//! Alarm monitor implementation
//!
//! Evaluated once per clock cycle. Tracks whether the buzzer is sounding and
//! keeps the alarm from re-triggering within its own minute.

use crate::settings::AlarmSchedule;

/// Alarm phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmPhase {
    /// Waiting for the alarm time
    #[default]
    Idle,
    /// Buzzer on
    Sounding,
    /// Sounded this minute, waiting for the minute to pass
    Cooldown,
}

/// Phase change reported by [`AlarmMonitor::evaluate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmEvent {
    /// Alarm time reached, buzzer switched on
    Started,
    /// Sounding length elapsed, buzzer switched off
    Finished,
    /// Alarm minute over, ready for the next day
    Rearmed,
    /// Alarm disabled while sounding, buzzer switched off until the minute passes
    Silenced,
}

impl AlarmEvent {
    /// Buzzer level this event asks for, if it changes it
    pub fn buzzer(self) -> Option<bool> {
        match self {
            AlarmEvent::Started => Some(true),
            AlarmEvent::Finished | AlarmEvent::Silenced => Some(false),
            AlarmEvent::Rearmed => None,
        }
    }
}

/// Alarm runtime state
#[derive(Debug, Clone, Default)]
pub struct AlarmMonitor {
    phase: AlarmPhase,
    /// Monotonic timestamp of the last Idle -> Sounding transition
    sounding_started_at: u32,
}

impl AlarmMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> AlarmPhase {
        self.phase
    }

    pub fn is_sounding(&self) -> bool {
        self.phase == AlarmPhase::Sounding
    }

    /// Advance the monitor for the current wall-clock `hour`:`minute`
    ///
    /// No transition fires while the schedule is disabled, except that a
    /// sounding alarm is silenced into cooldown so it cannot restart within
    /// the same minute.
    pub fn evaluate(
        &mut self,
        schedule: &AlarmSchedule,
        hour: u8,
        minute: u8,
        now_ms: u32,
    ) -> Option<AlarmEvent> {
        if !schedule.enabled {
            if self.is_sounding() {
                self.phase = AlarmPhase::Cooldown;
                return Some(AlarmEvent::Silenced);
            }
            return None;
        }

        match self.phase {
            AlarmPhase::Idle => {
                if schedule.matches(hour, minute) {
                    self.phase = AlarmPhase::Sounding;
                    self.sounding_started_at = now_ms;
                    Some(AlarmEvent::Started)
                } else {
                    None
                }
            }
            AlarmPhase::Sounding => {
                let elapsed = now_ms.wrapping_sub(self.sounding_started_at);
                if elapsed >= schedule.duration_ms() {
                    self.phase = AlarmPhase::Cooldown;
                    Some(AlarmEvent::Finished)
                } else {
                    None
                }
            }
            AlarmPhase::Cooldown => {
                if schedule.matches(hour, minute) {
                    None
                } else {
                    self.phase = AlarmPhase::Idle;
                    Some(AlarmEvent::Rearmed)
                }
            }
        }
    }
}
