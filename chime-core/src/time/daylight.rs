//! Daylight-saving hour shifts

use super::calendar::{last_day_of_month, ClockTime, MAX_YEAR};

/// Direction of a manual daylight-saving adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DaylightDirection {
    /// No adjustment
    #[default]
    None,
    /// Spring forward, +1 hour
    Spring,
    /// Fall back, -1 hour
    Fall,
}

impl DaylightDirection {
    /// Menu order: cancel, spring, fall
    pub const fn index(self) -> u8 {
        match self {
            DaylightDirection::None => 0,
            DaylightDirection::Spring => 1,
            DaylightDirection::Fall => 2,
        }
    }

    pub const fn from_index(index: u8) -> Self {
        match index {
            1 => DaylightDirection::Spring,
            2 => DaylightDirection::Fall,
            _ => DaylightDirection::None,
        }
    }

    pub const fn is_pending(self) -> bool {
        !matches!(self, DaylightDirection::None)
    }
}

/// Whether a shift may be written now without racing an RTC rollover
///
/// The shift rewrites the hour and date registers while the RTC keeps
/// counting; it is held back during the last minute of the hour and the
/// last three seconds of every minute.
pub const fn daylight_shift_allowed(time: &ClockTime) -> bool {
    time.minute < 59 && time.second < 57
}

/// Shift `time` by one hour in `direction`, rolling the date over
///
/// Years wrap within the century (99 -> 0 forward, 0 -> 99 backward). The
/// day of week is recomputed. `DaylightDirection::None` returns the time
/// unchanged.
pub fn apply_daylight_shift(time: ClockTime, direction: DaylightDirection) -> ClockTime {
    let mut t = time;
    match direction {
        DaylightDirection::None => return time,
        DaylightDirection::Spring => {
            if t.hour < 23 {
                t.hour += 1;
            } else {
                t.hour = 0;
                if t.day < last_day_of_month(t.month, t.year) {
                    t.day += 1;
                } else {
                    t.day = 1;
                    if t.month < 12 {
                        t.month += 1;
                    } else {
                        t.month = 1;
                        t.year = if t.year < MAX_YEAR { t.year + 1 } else { 0 };
                    }
                }
            }
        }
        DaylightDirection::Fall => {
            if t.hour > 0 {
                t.hour -= 1;
            } else {
                t.hour = 23;
                if t.day > 1 {
                    t.day -= 1;
                } else {
                    if t.month > 1 {
                        t.month -= 1;
                    } else {
                        t.month = 12;
                        t.year = if t.year > 0 { t.year - 1 } else { MAX_YEAR };
                    }
                    t.day = last_day_of_month(t.month, t.year);
                }
            }
        }
    }
    t.with_day_of_week()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_spring_within_day() {
        let t = ClockTime::from_parts(26, 3, 29, 2, 0, 0);
        let shifted = apply_daylight_shift(t, DaylightDirection::Spring);
        assert_eq!(shifted.hour, 3);
        assert_eq!(shifted.day, 29);
    }

    #[test]
    fn test_spring_leap_february_rolls_to_march() {
        let t = ClockTime::from_parts(24, 2, 29, 23, 10, 0);
        let shifted = apply_daylight_shift(t, DaylightDirection::Spring);
        assert_eq!((shifted.year, shifted.month, shifted.day), (24, 3, 1));
        assert_eq!(shifted.hour, 0);
        assert_eq!(shifted.minute, 10);
        assert_eq!(shifted.day_of_week, 6); // Fri 2024-03-01
    }

    #[test]
    fn test_spring_common_february_rolls_on_28th() {
        let t = ClockTime::from_parts(23, 2, 28, 23, 0, 0);
        let shifted = apply_daylight_shift(t, DaylightDirection::Spring);
        assert_eq!((shifted.month, shifted.day), (3, 1));
    }

    #[test]
    fn test_spring_new_year_and_century_wrap() {
        let t = ClockTime::from_parts(25, 12, 31, 23, 0, 0);
        let shifted = apply_daylight_shift(t, DaylightDirection::Spring);
        assert_eq!((shifted.year, shifted.month, shifted.day), (26, 1, 1));

        let t = ClockTime::from_parts(99, 12, 31, 23, 0, 0);
        let shifted = apply_daylight_shift(t, DaylightDirection::Spring);
        assert_eq!((shifted.year, shifted.month, shifted.day), (0, 1, 1));
    }

    #[test]
    fn test_fall_new_year_rolls_back() {
        let t = ClockTime::from_parts(26, 1, 1, 0, 30, 0);
        let shifted = apply_daylight_shift(t, DaylightDirection::Fall);
        assert_eq!((shifted.year, shifted.month, shifted.day), (25, 12, 31));
        assert_eq!(shifted.hour, 23);
        assert_eq!(shifted.day_of_week, 4); // Wed 2025-12-31

        let t = ClockTime::from_parts(0, 1, 1, 0, 0, 0);
        let shifted = apply_daylight_shift(t, DaylightDirection::Fall);
        assert_eq!((shifted.year, shifted.month, shifted.day), (99, 12, 31));
    }

    #[test]
    fn test_fall_into_leap_february() {
        let t = ClockTime::from_parts(24, 3, 1, 0, 0, 0);
        let shifted = apply_daylight_shift(t, DaylightDirection::Fall);
        assert_eq!((shifted.month, shifted.day, shifted.hour), (2, 29, 23));
    }

    #[test]
    fn test_none_is_identity() {
        let t = ClockTime::from_parts(24, 3, 1, 0, 0, 0);
        assert_eq!(apply_daylight_shift(t, DaylightDirection::None), t);
    }

    #[test]
    fn test_shift_guard() {
        let mut t = ClockTime::from_parts(24, 3, 1, 1, 58, 56);
        assert!(daylight_shift_allowed(&t));
        t.second = 57;
        assert!(!daylight_shift_allowed(&t));
        t.second = 0;
        t.minute = 59;
        assert!(!daylight_shift_allowed(&t));
    }

    #[test]
    fn test_direction_index_roundtrip() {
        for direction in [
            DaylightDirection::None,
            DaylightDirection::Spring,
            DaylightDirection::Fall,
        ] {
            assert_eq!(DaylightDirection::from_index(direction.index()), direction);
        }
    }

    proptest! {
        #[test]
        fn fall_undoes_spring(
            year in 0u8..=99,
            month in 1u8..=12,
            day in 1u8..=31,
            hour in 0u8..=23,
            minute in 0u8..=58,
        ) {
            prop_assume!(day <= last_day_of_month(month, year));
            let t = ClockTime::from_parts(year, month, day, hour, minute, 0);
            let forward = apply_daylight_shift(t, DaylightDirection::Spring);
            prop_assert!(forward.is_valid());
            prop_assert_eq!(apply_daylight_shift(forward, DaylightDirection::Fall), t);
        }
    }
}
