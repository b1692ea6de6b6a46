//! Tracker configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use stepgoal_core::{DayKeyPolicy, Milestone};

use crate::notifier::ChannelSpec;

/// Errors loading or validating a [`TrackerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Values that parse but cannot be used
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for progress tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Steps added by the manual test control
    pub manual_increment: u32,

    /// Milestones to notify, as percentages of the goal
    pub milestones: Vec<Milestone>,

    /// How calendar days are compared for rollover
    pub day_key_policy: DayKeyPolicy,

    /// Notification channel to register and post to
    pub channel: ChannelSpec,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            manual_increment: 1000,
            milestones: Milestone::DEFAULTS.to_vec(),
            day_key_policy: DayKeyPolicy::CalendarDate,
            channel: ChannelSpec::default(),
        }
    }
}

impl TrackerConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Set the manual increment.
    pub fn with_manual_increment(mut self, steps: u32) -> Self {
        self.manual_increment = steps;
        self
    }

    /// Set the milestones.
    pub fn with_milestones(mut self, milestones: Vec<Milestone>) -> Self {
        self.milestones = milestones;
        self
    }

    /// Set the day key policy.
    pub fn with_day_key_policy(mut self, policy: DayKeyPolicy) -> Self {
        self.day_key_policy = policy;
        self
    }

    /// Check values serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.manual_increment == 0 {
            return Err(ConfigError::Invalid("manual_increment must be positive".into()));
        }
        if self.milestones.is_empty() {
            return Err(ConfigError::Invalid("at least one milestone is required".into()));
        }
        if self.milestones.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::Invalid(
                "milestones must be strictly ascending".into(),
            ));
        }
        if self.channel.id.trim().is_empty() {
            return Err(ConfigError::Invalid("channel id must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = TrackerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.manual_increment, 1000);
        assert_eq!(config.milestones, Milestone::DEFAULTS.to_vec());
        assert_eq!(config.day_key_policy, DayKeyPolicy::CalendarDate);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = TrackerConfig::from_json_str(r#"{"manual_increment": 250}"#).unwrap();
        assert_eq!(config.manual_increment, 250);
        assert_eq!(config.milestones, Milestone::DEFAULTS.to_vec());
    }

    #[test]
    fn test_policy_from_json() {
        let config = TrackerConfig::from_json_str(r#"{"day_key_policy": "day_of_year"}"#).unwrap();
        assert_eq!(config.day_key_policy, DayKeyPolicy::DayOfYear);
    }

    #[test]
    fn test_rejects_bad_milestones() {
        assert!(matches!(
            TrackerConfig::from_json_str(r#"{"milestones": []}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            TrackerConfig::from_json_str(r#"{"milestones": [75, 50]}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            TrackerConfig::from_json_str(r#"{"milestones": [50, 50]}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            TrackerConfig::from_json_str(r#"{"milestones": [50, 120]}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_rejects_zero_increment() {
        assert!(TrackerConfig::default().with_manual_increment(0).validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"milestones": [25, 50, 100]}}"#).unwrap();

        let config = TrackerConfig::load(file.path()).unwrap();
        assert_eq!(
            config.milestones.iter().map(|m| m.percent()).collect::<Vec<_>>(),
            vec![25, 50, 100]
        );
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            TrackerConfig::load("/nonexistent/stepgoal.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
