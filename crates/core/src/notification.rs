//! Notification model - what gets posted when a milestone is reached.

use serde::{Deserialize, Serialize};
use crate::id::NotificationId;
use crate::milestone::Milestone;
use crate::Time;

/// A local notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique identifier
    pub id: NotificationId,

    /// Title line
    pub title: String,

    /// Body text
    pub body: String,

    /// Milestone that triggered it, if any
    pub milestone: Option<Milestone>,

    /// When created
    pub created_at: Time,
}

impl Notification {
    /// Create a plain notification.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            title: title.into(),
            body: body.into(),
            milestone: None,
            created_at: chrono::Utc::now(),
        }
    }

    /// Create the notification announcing `milestone`.
    pub fn milestone_reached(milestone: Milestone) -> Self {
        Self {
            milestone: Some(milestone),
            ..Self::new(
                "Milestone reached",
                format!("You have reached {}% of your goal!", milestone.percent()),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milestone_text() {
        let n = Notification::milestone_reached(Milestone::THREE_QUARTERS);
        assert_eq!(n.title, "Milestone reached");
        assert_eq!(n.body, "You have reached 75% of your goal!");
        assert_eq!(n.milestone, Some(Milestone::THREE_QUARTERS));
    }
}
