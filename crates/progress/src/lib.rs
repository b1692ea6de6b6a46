//! Progress Tracking
//!
//! Daily step progress against a fixed goal, milestone notifications and
//! day rollover. Platform services (step sensor, notifications, wall clock)
//! are injected through the traits in [`sensor`], [`notifier`] and
//! [`clock`].

#![warn(missing_docs)]

pub mod tracker;
pub mod config;
pub mod clock;
pub mod sensor;
pub mod notifier;
pub mod dispatcher;
pub mod session;

pub use tracker::{MilestoneTracker, TrackerState, Transition};
pub use config::{ConfigError, TrackerConfig};
pub use clock::{DayClock, ManualClock, SystemClock};
pub use sensor::{
    ChannelSensor, NoSensor, SensorError, SensorFeed, SensorSubscription, StepSensor,
};
pub use notifier::{
    ChannelSpec, LocalNotifier, NotificationPermission, NotificationSink, Notifier, NotifyError,
};
pub use dispatcher::{DispatchOutcome, DispatchStats, MilestoneDispatcher};
pub use session::{InputMode, ProgressSession, ProgressSnapshot, SessionUpdate};
