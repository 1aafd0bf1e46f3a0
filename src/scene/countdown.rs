//! Countdown to Christmas
//!
//! Two-phase state machine: `Counting` recomputes the decomposed
//! days/hours/minutes/seconds once per second; `Arrived` is absorbing for
//! the session and freezes the numeric fields at their last values.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Current phase of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CountdownPhase {
    /// Ticking down toward the target instant
    Counting,
    /// Target reached; never exited for the lifetime of the scene
    Arrived,
}

/// Decomposed time remaining until the next Christmas
#[derive(Debug, Clone, Serialize)]
pub struct Countdown {
    pub phase: CountdownPhase,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

/// Midnight on Dec 25 of the given year
fn christmas_of(year: i32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, 12, 25)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("Dec 25 midnight is always representable")
}

/// The target instant: this year's Dec 25 unless it has already passed
pub fn next_christmas(now: NaiveDateTime) -> NaiveDateTime {
    let this_year = christmas_of(now.year());
    if now > this_year {
        christmas_of(now.year() + 1)
    } else {
        this_year
    }
}

impl Countdown {
    /// Compute the countdown for `now` (runs once immediately at init)
    pub fn new(now: NaiveDateTime) -> Self {
        let mut countdown = Self {
            phase: CountdownPhase::Counting,
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        };
        countdown.update(now);
        countdown
    }

    /// Recompute the decomposition wholesale; no-op once arrived
    pub fn update(&mut self, now: NaiveDateTime) {
        if self.phase == CountdownPhase::Arrived {
            return;
        }

        let diff = (next_christmas(now) - now).num_milliseconds();
        if diff <= 0 {
            self.phase = CountdownPhase::Arrived;
            return;
        }

        self.days = (diff / MS_PER_DAY) as u32;
        self.hours = ((diff % MS_PER_DAY) / MS_PER_HOUR) as u32;
        self.minutes = ((diff % MS_PER_HOUR) / MS_PER_MINUTE) as u32;
        self.seconds = ((diff % MS_PER_MINUTE) / MS_PER_SECOND) as u32;
    }

    pub fn arrived(&self) -> bool {
        self.phase == CountdownPhase::Arrived
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_one_second_before_christmas() {
        let countdown = Countdown::new(at(2025, 12, 24, 23, 59, 59));
        assert_eq!(countdown.phase, CountdownPhase::Counting);
        assert_eq!(countdown.days, 0);
        assert_eq!(countdown.hours, 0);
        assert_eq!(countdown.minutes, 0);
        assert_eq!(countdown.seconds, 1);
    }

    #[test]
    fn test_after_christmas_targets_next_year() {
        let target = next_christmas(at(2025, 12, 26, 8, 30, 0));
        assert_eq!(target, at(2026, 12, 25, 0, 0, 0));
    }

    #[test]
    fn test_before_christmas_targets_this_year() {
        let target = next_christmas(at(2025, 11, 1, 0, 0, 0));
        assert_eq!(target, at(2025, 12, 25, 0, 0, 0));
    }

    #[test]
    fn test_exact_target_instant_is_arrived() {
        let countdown = Countdown::new(at(2025, 12, 25, 0, 0, 0));
        assert_eq!(countdown.phase, CountdownPhase::Arrived);
    }

    #[test]
    fn test_arrived_is_absorbing_and_freezes_fields() {
        let mut countdown = Countdown::new(at(2025, 12, 24, 23, 59, 59));
        countdown.update(at(2025, 12, 25, 0, 0, 0));
        assert!(countdown.arrived());
        // A later update would see next year's target but must not resume
        countdown.update(at(2025, 12, 25, 0, 0, 5));
        assert!(countdown.arrived());
        assert_eq!(countdown.seconds, 1);
    }

    #[test]
    fn test_units_are_remainder_bounded() {
        let countdown = Countdown::new(at(2025, 3, 14, 15, 9, 26));
        assert!(countdown.hours < 24);
        assert!(countdown.minutes < 60);
        assert!(countdown.seconds < 60);
    }
}
