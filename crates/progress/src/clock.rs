//! Wall-clock source for day rollover.

use chrono::{Duration, NaiveDate};
use std::sync::{Arc, Mutex};

/// Supplies the current calendar date.
pub trait DayClock: Send + Sync {
    /// Today's date.
    fn today(&self) -> NaiveDate;
}

/// Local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl DayClock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// A clock that only moves when told to. Clones share the same date.
#[derive(Debug, Clone)]
pub struct ManualClock {
    date: Arc<Mutex<NaiveDate>>,
}

impl ManualClock {
    /// Create a clock showing `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Arc::new(Mutex::new(date)),
        }
    }

    /// Show `date` from now on.
    pub fn set(&self, date: NaiveDate) {
        *self.date.lock().unwrap_or_else(|e| e.into_inner()) = date;
    }

    /// Move forward by `days` and return the new date.
    pub fn advance_days(&self, days: i64) -> NaiveDate {
        let mut date = self.date.lock().unwrap_or_else(|e| e.into_inner());
        *date = *date + Duration::days(days);
        *date
    }
}

impl DayClock for ManualClock {
    fn today(&self) -> NaiveDate {
        *self.date.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new(NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
        let other = clock.clone();

        let next = clock.advance_days(1);
        assert_eq!(next, NaiveDate::from_ymd_opt(2027, 1, 1).unwrap());
        assert_eq!(other.today(), next);

        other.set(NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
    }
}
