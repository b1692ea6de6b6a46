//! Unique identifiers for stepgoal entities.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for a posted notification.
///
/// Platform notification managers replace an existing notification when an
/// id is reused, so every milestone notification gets a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(Ulid);

impl NotificationId {
    /// Generate a new NotificationId
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for NotificationId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_ids_are_unique() {
        let a = NotificationId::new();
        let b = NotificationId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_notification_id_display_parses_back() {
        let id = NotificationId::new();
        let parsed: NotificationId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }
}
