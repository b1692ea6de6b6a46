//! Stepgoal core data models.
//!
//! This crate defines the value types shared by the goal selector and the
//! progress tracker: ages, goals, milestones, day keys, step events and
//! notifications.

#![warn(missing_docs)]

// Core identities
mod id;

// Goal model
mod goal;
mod milestone;

// Tracking inputs and outputs
mod day;
mod event;
mod notification;

mod error;

// Re-exports
pub use id::*;

pub use goal::{Age, StepGoal};
pub use milestone::Milestone;
pub use day::{DayKey, DayKeyPolicy};
pub use event::StepEvent;
pub use notification::Notification;
pub use error::{CoreError, Result};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
