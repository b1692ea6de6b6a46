//! Day keys - comparable identifiers for a calendar day.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// How a calendar date is reduced to a day key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayKeyPolicy {
    /// Year and day-of-year. Rolls over correctly at year boundaries.
    #[default]
    CalendarDate,

    /// Day-of-year only. The same ordinal in two different years compares
    /// equal, so no rollover is seen between them.
    DayOfYear,
}

impl DayKeyPolicy {
    /// Reduce `date` to a key under this policy.
    pub fn key_for(self, date: NaiveDate) -> DayKey {
        match self {
            DayKeyPolicy::CalendarDate => DayKey {
                year: Some(date.year()),
                ordinal: date.ordinal(),
            },
            DayKeyPolicy::DayOfYear => DayKey {
                year: None,
                ordinal: date.ordinal(),
            },
        }
    }
}

/// A comparable key for a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DayKey {
    /// Calendar year, absent under [`DayKeyPolicy::DayOfYear`]
    pub year: Option<i32>,

    /// Day of the year, starting at 1
    pub ordinal: u32,
}

impl std::fmt::Display for DayKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.year {
            Some(year) => write!(f, "{year}-{:03}", self.ordinal),
            None => write!(f, "day {}", self.ordinal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_calendar_date_distinguishes_years() {
        let policy = DayKeyPolicy::CalendarDate;
        assert_ne!(
            policy.key_for(date(2025, 3, 1)),
            policy.key_for(date(2026, 3, 1))
        );
        assert_ne!(
            policy.key_for(date(2025, 12, 31)),
            policy.key_for(date(2026, 1, 1))
        );
    }

    #[test]
    fn test_day_of_year_collides_across_years() {
        let policy = DayKeyPolicy::DayOfYear;
        assert_eq!(
            policy.key_for(date(2025, 3, 1)),
            policy.key_for(date(2026, 3, 1))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(DayKeyPolicy::CalendarDate.key_for(date(2026, 1, 5)).to_string(), "2026-005");
        assert_eq!(DayKeyPolicy::DayOfYear.key_for(date(2026, 1, 5)).to_string(), "day 5");
    }

    #[test]
    fn test_policy_serde_names() {
        let policy: DayKeyPolicy = serde_json::from_str("\"day_of_year\"").unwrap();
        assert_eq!(policy, DayKeyPolicy::DayOfYear);
        assert_eq!(DayKeyPolicy::default(), DayKeyPolicy::CalendarDate);
    }
}
