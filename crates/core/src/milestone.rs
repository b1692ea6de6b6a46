//! Milestone model - percentage-of-goal thresholds.

use serde::{Deserialize, Serialize};
use crate::error::{CoreError, Result};

/// A percentage of the daily goal that triggers a notification the first
/// time it is reached each day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Milestone(u8);

impl Milestone {
    /// Half of the goal.
    pub const HALF: Milestone = Milestone(50);

    /// Three quarters of the goal.
    pub const THREE_QUARTERS: Milestone = Milestone(75);

    /// The whole goal.
    pub const COMPLETE: Milestone = Milestone(100);

    /// Default milestones, ascending.
    pub const DEFAULTS: [Milestone; 3] = [Self::HALF, Self::THREE_QUARTERS, Self::COMPLETE];

    /// Create a milestone at `percent` of the goal.
    pub fn new(percent: u8) -> Result<Self> {
        if (1..=100).contains(&percent) {
            Ok(Self(percent))
        } else {
            Err(CoreError::InvalidMilestone(percent))
        }
    }

    /// Percentage of the goal.
    pub const fn percent(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Milestone {
    type Error = CoreError;

    fn try_from(percent: u8) -> Result<Self> {
        Self::new(percent)
    }
}

impl From<Milestone> for u8 {
    fn from(milestone: Milestone) -> Self {
        milestone.0
    }
}

impl std::fmt::Display for Milestone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_ascending() {
        let percents: Vec<u8> = Milestone::DEFAULTS.iter().map(|m| m.percent()).collect();
        assert_eq!(percents, vec![50, 75, 100]);
    }

    #[test]
    fn test_milestone_range() {
        assert!(Milestone::new(0).is_err());
        assert!(Milestone::new(101).is_err());
        assert_eq!(Milestone::new(25).map(Milestone::percent), Ok(25));
    }

    #[test]
    fn test_milestone_deserialize_rejects_out_of_range() {
        let ok: Milestone = serde_json::from_str("75").unwrap();
        assert_eq!(ok, Milestone::THREE_QUARTERS);
        assert!(serde_json::from_str::<Milestone>("150").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Milestone::HALF.to_string(), "50%");
    }
}
