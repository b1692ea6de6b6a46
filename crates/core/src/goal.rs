//! Goal model - the user's age and the daily step goal derived from it.

use serde::{Deserialize, Serialize};
use crate::error::{CoreError, Result};

/// A validated age in years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Age(u32);

impl Age {
    /// Youngest accepted age.
    pub const MIN: u32 = 5;

    /// Oldest accepted age.
    pub const MAX: u32 = 100;

    /// Create an age, rejecting values outside `MIN..=MAX`.
    pub fn new(years: u32) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&years) {
            Ok(Self(years))
        } else {
            Err(CoreError::AgeOutOfRange {
                age: i64::from(years),
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    /// Parse free-text input. Surrounding whitespace is not accepted.
    pub fn parse(input: &str) -> Result<Self> {
        let years: i64 = input
            .parse()
            .map_err(|_| CoreError::AgeNotANumber(input.to_string()))?;

        u32::try_from(years)
            .ok()
            .filter(|y| (Self::MIN..=Self::MAX).contains(y))
            .map(Self)
            .ok_or(CoreError::AgeOutOfRange {
                age: years,
                min: Self::MIN,
                max: Self::MAX,
            })
    }

    /// Age in years.
    pub fn years(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for Age {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A daily step goal.
///
/// Unsigned, so it can never go negative. Once handed to a tracker it is
/// stored by value and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepGoal(u32);

impl StepGoal {
    /// Granularity of manual goal adjustments.
    pub const ADJUSTMENT: u32 = 500;

    /// Create a goal of `steps` per day.
    pub const fn new(steps: u32) -> Self {
        Self(steps)
    }

    /// Steps per day.
    pub const fn steps(self) -> u32 {
        self.0
    }

    /// Whether the goal is zero (progress ratio undefined).
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Cap a step count at the goal.
    pub fn clamp(self, steps: u32) -> u32 {
        steps.min(self.0)
    }

    /// Step count at which `percent` of the goal is reached, rounded down.
    pub fn threshold(self, percent: u8) -> u32 {
        // u64 keeps goal * 100 from overflowing for large goals
        (u64::from(self.0) * u64::from(percent) / 100) as u32
    }

    /// Fraction of the goal covered by `steps`, in `0.0..=1.0`.
    ///
    /// A zero goal reports 0.0 rather than dividing by zero.
    pub fn fraction(self, steps: u32) -> f32 {
        if self.is_zero() {
            return 0.0;
        }
        (self.clamp(steps) as f32 / self.0 as f32).clamp(0.0, 1.0)
    }
}

impl std::fmt::Display for StepGoal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for StepGoal {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        s.parse()
            .map(Self)
            .map_err(|_| CoreError::InvalidGoal(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_bounds_inclusive() {
        assert!(Age::new(5).is_ok());
        assert!(Age::new(100).is_ok());
        assert!(Age::new(4).is_err());
        assert!(Age::new(101).is_err());
    }

    #[test]
    fn test_age_parse_errors() {
        assert_eq!(
            Age::parse("abc"),
            Err(CoreError::AgeNotANumber("abc".to_string()))
        );
        assert_eq!(
            Age::parse("-3"),
            Err(CoreError::AgeOutOfRange { age: -3, min: 5, max: 100 })
        );
        assert!(matches!(Age::parse(""), Err(CoreError::AgeNotANumber(_))));
        assert!(matches!(Age::parse(" 30"), Err(CoreError::AgeNotANumber(_))));
        assert_eq!(Age::parse("30").map(Age::years), Ok(30));
    }

    #[test]
    fn test_goal_threshold_rounds_down() {
        let goal = StepGoal::new(1001);
        assert_eq!(goal.threshold(50), 500);
        assert_eq!(goal.threshold(75), 750);
        assert_eq!(goal.threshold(100), 1001);
    }

    #[test]
    fn test_goal_threshold_large_goal() {
        let goal = StepGoal::new(u32::MAX);
        assert_eq!(goal.threshold(100), u32::MAX);
    }

    #[test]
    fn test_goal_clamp() {
        let goal = StepGoal::new(1000);
        assert_eq!(goal.clamp(400), 400);
        assert_eq!(goal.clamp(1100), 1000);
    }

    #[test]
    fn test_zero_goal_fraction_is_zero() {
        assert_eq!(StepGoal::new(0).fraction(500), 0.0);
        assert_eq!(StepGoal::new(1000).fraction(250), 0.25);
        assert_eq!(StepGoal::new(1000).fraction(5000), 1.0);
    }

    #[test]
    fn test_goal_from_str() {
        assert_eq!("2500".parse::<StepGoal>(), Ok(StepGoal::new(2500)));
        assert!("-1".parse::<StepGoal>().is_err());
        assert!("ten".parse::<StepGoal>().is_err());
    }

    #[test]
    fn test_goal_serializes_as_number() {
        let json = serde_json::to_string(&StepGoal::new(7000)).unwrap();
        assert_eq!(json, "7000");
    }
}
