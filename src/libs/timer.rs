//! Local stopwatch for logging time against a row.
//!
//! A timer keeps the instant it was last (re)started and the seconds
//! accumulated before that. Elapsed time is therefore
//! `accumulated + (now - started_at)` while running and just `accumulated`
//! while paused. A clock that moved backwards never produces negative time.

use crate::libs::duration::{round_for_storage, MAX_HOURS};
use crate::libs::week::WeekRow;
use chrono::{Duration, NaiveDateTime};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("timer is already paused")]
    AlreadyPaused,
    #[error("timer is not paused")]
    NotPaused,
    #[error("timer ran for less than the storage precision")]
    TooShort,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timer {
    pub user_id: String,
    pub row: WeekRow,
    pub started_at: NaiveDateTime,
    pub accumulated_secs: i64,
    pub running: bool,
}

impl Timer {
    pub fn start(user_id: &str, row: WeekRow, now: NaiveDateTime) -> Self {
        Timer {
            user_id: user_id.to_string(),
            row,
            started_at: now,
            accumulated_secs: 0,
            running: true,
        }
    }

    pub fn elapsed(&self, now: NaiveDateTime) -> Duration {
        let mut secs = self.accumulated_secs.max(0);
        if self.running {
            secs += (now - self.started_at).num_seconds().max(0);
        }
        Duration::seconds(secs)
    }

    /// Elapsed time as decimal hours, rounded for storage.
    pub fn elapsed_hours(&self, now: NaiveDateTime) -> f64 {
        round_for_storage(self.elapsed(now).num_seconds() as f64 / 3600.0)
    }

    pub fn pause(&mut self, now: NaiveDateTime) -> Result<(), TimerError> {
        if !self.running {
            return Err(TimerError::AlreadyPaused);
        }
        self.accumulated_secs = self.elapsed(now).num_seconds();
        self.running = false;
        Ok(())
    }

    pub fn resume(&mut self, now: NaiveDateTime) -> Result<(), TimerError> {
        if self.running {
            return Err(TimerError::NotPaused);
        }
        self.started_at = now;
        self.running = true;
        Ok(())
    }

    /// Final hours to log, capped at the 24:00 ceiling.
    ///
    /// # Errors
    ///
    /// [`TimerError::TooShort`] when the rounded value is zero.
    pub fn stop(&self, now: NaiveDateTime) -> Result<f64, TimerError> {
        let hours = self.elapsed_hours(now).min(MAX_HOURS as f64);
        if hours == 0.0 {
            return Err(TimerError::TooShort);
        }
        Ok(hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap().and_hms_opt(h, m, s).unwrap()
    }

    fn timer() -> Timer {
        Timer::start("alice", WeekRow::new("Apollo", None), at(9, 0, 0))
    }

    #[test]
    fn test_elapsed_running() {
        let timer = timer();
        assert_eq!(timer.elapsed(at(10, 30, 0)), Duration::minutes(90));
        assert_eq!(timer.elapsed_hours(at(10, 30, 0)), 1.5);
    }

    #[test]
    fn test_elapsed_excludes_pause() {
        let mut timer = timer();
        timer.pause(at(10, 0, 0)).unwrap();
        assert_eq!(timer.elapsed(at(12, 0, 0)), Duration::hours(1));
        timer.resume(at(12, 0, 0)).unwrap();
        assert_eq!(timer.elapsed(at(12, 15, 0)), Duration::minutes(75));
        assert_eq!(timer.stop(at(12, 15, 0)).unwrap(), 1.25);
    }

    #[test]
    fn test_pause_resume_errors() {
        let mut timer = timer();
        assert_eq!(timer.resume(at(9, 1, 0)), Err(TimerError::NotPaused));
        timer.pause(at(9, 1, 0)).unwrap();
        assert_eq!(timer.pause(at(9, 2, 0)), Err(TimerError::AlreadyPaused));
    }

    #[test]
    fn test_clock_skew_never_negative() {
        let timer = timer();
        assert_eq!(timer.elapsed(at(8, 0, 0)), Duration::zero());
    }

    #[test]
    fn test_stop_too_short() {
        let timer = timer();
        // 10 seconds is 0.0028h, rounds to 0.00
        assert_eq!(timer.stop(at(9, 0, 10)), Err(TimerError::TooShort));
        // 20 minutes
        assert_eq!(timer.stop(at(9, 20, 0)).unwrap(), 0.33);
    }

    #[test]
    fn test_stop_caps_at_ceiling() {
        let timer = timer();
        let next_day = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap().and_hms_opt(12, 0, 0).unwrap();
        assert_eq!(timer.stop(next_day).unwrap(), 24.0);
    }
}
