//! Local notification abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Mutex;
use stepgoal_core::Notification;

/// Errors from notifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotifyError {
    /// Posting to a channel that was never registered
    #[error("notification channel not registered: {0}")]
    ChannelMissing(String),

    /// The platform refused the notification
    #[error("notification rejected: {0}")]
    Rejected(String),
}

/// Whether the user allows notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPermission {
    /// Notifications may be shown
    Granted,
    /// The user withheld permission
    Denied,
}

/// A notification channel, registered once before posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelSpec {
    /// Stable channel id
    pub id: String,

    /// User-visible name
    pub name: String,

    /// User-visible description
    pub description: String,
}

impl Default for ChannelSpec {
    fn default() -> Self {
        Self {
            id: "step_milestones".to_string(),
            name: "Step milestones".to_string(),
            description: "Alerts when you reach part of your daily step goal".to_string(),
        }
    }
}

/// Posts local notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Register a channel. Registering twice is harmless.
    async fn register_channel(&self, channel: &ChannelSpec) -> Result<(), NotifyError>;

    /// Current permission state.
    fn permission(&self) -> NotificationPermission;

    /// Show `notification` on `channel`.
    async fn post(&self, channel: &ChannelSpec, notification: &Notification)
        -> Result<(), NotifyError>;
}

/// Where a [`LocalNotifier`] sends notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationSink {
    /// Print to stdout
    Console,

    /// Emit as a log event
    Log,
}

/// Notifier for running without a platform notification manager.
#[derive(Debug)]
pub struct LocalNotifier {
    sink: NotificationSink,
    permission: NotificationPermission,
    channels: Mutex<HashSet<String>>,
}

impl LocalNotifier {
    /// Create a notifier with permission granted.
    pub fn new(sink: NotificationSink) -> Self {
        Self {
            sink,
            permission: NotificationPermission::Granted,
            channels: Mutex::new(HashSet::new()),
        }
    }

    /// Set the permission state.
    pub fn with_permission(mut self, permission: NotificationPermission) -> Self {
        self.permission = permission;
        self
    }

    fn has_channel(&self, id: &str) -> bool {
        self.channels
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(id)
    }
}

#[async_trait]
impl Notifier for LocalNotifier {
    async fn register_channel(&self, channel: &ChannelSpec) -> Result<(), NotifyError> {
        self.channels
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(channel.id.clone());
        tracing::debug!("Registered notification channel {}", channel.id);
        Ok(())
    }

    fn permission(&self) -> NotificationPermission {
        self.permission
    }

    async fn post(
        &self,
        channel: &ChannelSpec,
        notification: &Notification,
    ) -> Result<(), NotifyError> {
        if !self.has_channel(&channel.id) {
            return Err(NotifyError::ChannelMissing(channel.id.clone()));
        }

        match self.sink {
            NotificationSink::Console => {
                println!("🔔 {}: {}", notification.title, notification.body);
            }
            NotificationSink::Log => {
                tracing::info!(
                    "Notification [{}] {} - {}",
                    channel.id,
                    notification.title,
                    notification.body
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepgoal_core::Milestone;

    #[tokio::test]
    async fn test_post_requires_registered_channel() {
        let notifier = LocalNotifier::new(NotificationSink::Log);
        let channel = ChannelSpec::default();
        let n = Notification::milestone_reached(Milestone::HALF);

        assert_eq!(
            notifier.post(&channel, &n).await,
            Err(NotifyError::ChannelMissing("step_milestones".to_string()))
        );

        notifier.register_channel(&channel).await.unwrap();
        notifier.register_channel(&channel).await.unwrap();
        assert!(notifier.post(&channel, &n).await.is_ok());
    }

    #[test]
    fn test_permission_builder() {
        let notifier = LocalNotifier::new(NotificationSink::Console)
            .with_permission(NotificationPermission::Denied);
        assert_eq!(notifier.permission(), NotificationPermission::Denied);
    }
}
