//! Milestone notification dispatch.
//!
//! Posting is best effort: a denied permission or a rejected post is
//! logged and counted, never retried and never surfaced as an error.

use serde::Serialize;
use std::sync::Arc;
use stepgoal_core::{Milestone, Notification, NotificationId};
use tracing::{debug, info, warn};

use crate::notifier::{ChannelSpec, NotificationPermission, Notifier};

/// What happened to a milestone notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum DispatchOutcome {
    /// Handed to the notifier
    Posted {
        /// Id of the posted notification
        id: NotificationId,
    },

    /// Skipped because the user withheld permission
    PermissionDenied,

    /// The notifier refused it
    Failed {
        /// Notifier error text
        reason: String,
    },
}

/// Counters for dispatched notifications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchStats {
    /// Notifications posted
    pub posted: usize,
    /// Skipped for lack of permission
    pub denied: usize,
    /// Rejected by the notifier
    pub failed: usize,
}

/// Turns reached milestones into posted notifications.
pub struct MilestoneDispatcher {
    notifier: Arc<dyn Notifier>,
    channel: ChannelSpec,
    channel_registered: bool,
    stats: DispatchStats,
}

impl MilestoneDispatcher {
    /// Create a dispatcher posting to `channel`.
    pub fn new(notifier: Arc<dyn Notifier>, channel: ChannelSpec) -> Self {
        Self {
            notifier,
            channel,
            channel_registered: false,
            stats: DispatchStats::default(),
        }
    }

    /// Register the channel if that has not succeeded yet.
    pub async fn ensure_channel(&mut self) -> bool {
        if self.channel_registered {
            return true;
        }
        match self.notifier.register_channel(&self.channel).await {
            Ok(()) => {
                debug!("Notification channel {} ready", self.channel.id);
                self.channel_registered = true;
            }
            Err(e) => warn!("Could not register notification channel {}: {}", self.channel.id, e),
        }
        self.channel_registered
    }

    /// Announce `milestone`.
    pub async fn dispatch(&mut self, milestone: Milestone) -> DispatchOutcome {
        if self.notifier.permission() == NotificationPermission::Denied {
            warn!("Notification permission not granted, skipping milestone {}", milestone);
            self.stats.denied += 1;
            return DispatchOutcome::PermissionDenied;
        }

        self.ensure_channel().await;

        let notification = Notification::milestone_reached(milestone);
        match self.notifier.post(&self.channel, &notification).await {
            Ok(()) => {
                info!("Notification posted: {} - {}", notification.title, notification.body);
                self.stats.posted += 1;
                DispatchOutcome::Posted { id: notification.id }
            }
            Err(e) => {
                warn!("Notification for milestone {} not shown: {}", milestone, e);
                self.stats.failed += 1;
                DispatchOutcome::Failed { reason: e.to_string() }
            }
        }
    }

    /// Counters so far.
    pub fn stats(&self) -> DispatchStats {
        self.stats
    }
}
