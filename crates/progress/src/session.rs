//! Progress tracking session.
//!
//! A session is what the progress screen owns while it is visible: the
//! tracker, the sensor registration, the notification dispatcher and the
//! channel the manual test control feeds. All inputs are handled one at a
//! time on the task that owns the session.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use stepgoal_core::{DayKey, DayKeyPolicy, StepEvent, StepGoal};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::clock::DayClock;
use crate::config::{ConfigError, TrackerConfig};
use crate::dispatcher::{DispatchOutcome, DispatchStats, MilestoneDispatcher};
use crate::notifier::Notifier;
use crate::sensor::{SensorSubscription, StepSensor};
use crate::tracker::{MilestoneTracker, Transition, TrackerState};

/// Consecutive sensor readings taken before a pending manual input is served.
const MAX_READINGS_BEFORE_CONTROL: usize = 32;

/// Where step input comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Not started, or stopped
    Idle,
    /// Live sensor readings plus manual increments
    Live,
    /// No sensor; manual increments only
    ManualOnly,
}

/// Result of handling one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUpdate {
    /// The input handled
    pub event: StepEvent,

    /// Tracker transition
    pub transition: Transition,

    /// Notification outcome, when a milestone was reached
    pub notification: Option<DispatchOutcome>,
}

/// A snapshot of progress at a point in time.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressSnapshot {
    /// When snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// Goal being tracked
    pub goal: StepGoal,

    /// Tracker state
    pub state: TrackerState,

    /// Displayed progress, 0-100
    pub percentage: f32,

    /// Input mode
    pub mode: InputMode,

    /// Notification counters
    pub notifications: DispatchStats,
}

/// Drives a [`MilestoneTracker`] from a sensor and manual controls.
pub struct ProgressSession {
    tracker: MilestoneTracker,
    policy: DayKeyPolicy,
    clock: Arc<dyn DayClock>,
    sensor: Arc<dyn StepSensor>,
    dispatcher: MilestoneDispatcher,
    subscription: Option<SensorSubscription>,
    controls: Option<mpsc::Receiver<StepEvent>>,
    readings_in_row: usize,
    mode: InputMode,
}

impl ProgressSession {
    /// Create a session for `goal`. The goal is fixed from here on.
    pub fn new(
        goal: StepGoal,
        config: TrackerConfig,
        clock: Arc<dyn DayClock>,
        sensor: Arc<dyn StepSensor>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let policy = config.day_key_policy;
        let today = policy.key_for(clock.today());
        let tracker = MilestoneTracker::with_config(goal, today, &config);
        let dispatcher = MilestoneDispatcher::new(notifier, config.channel);

        Ok(Self {
            tracker,
            policy,
            clock,
            sensor,
            dispatcher,
            subscription: None,
            controls: None,
            readings_in_row: 0,
            mode: InputMode::Idle,
        })
    }

    /// Register the notification channel and the sensor listener.
    ///
    /// Without a usable sensor the session falls back to manual input.
    pub async fn start(&mut self) -> InputMode {
        self.dispatcher.ensure_channel().await;

        if self.subscription.is_none() {
            match SensorSubscription::acquire(self.sensor.clone()) {
                Ok(subscription) => {
                    self.subscription = Some(subscription);
                    self.mode = InputMode::Live;
                }
                Err(e) => {
                    warn!("Step sensor unavailable ({}), manual input only", e);
                    self.mode = InputMode::ManualOnly;
                }
            }
        }

        info!(
            "Tracking {} steps/day starting {} ({:?})",
            self.tracker.goal(),
            self.tracker.state().current_day(),
            self.mode
        );
        self.mode
    }

    /// Release the sensor. Safe to call more than once; a later
    /// [`start`](Self::start) registers the listener again.
    pub fn stop(&mut self) {
        if self.subscription.take().is_some() {
            info!("Stopped step tracking");
        }
        self.mode = InputMode::Idle;
    }

    /// Open the manual control channel and return its sender.
    ///
    /// Replaces any previous control channel.
    pub fn attach_controls(&mut self, capacity: usize) -> mpsc::Sender<StepEvent> {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        self.controls = Some(rx);
        tx
    }

    /// Wait for the next input.
    ///
    /// Pending sensor readings are taken before manual controls, but after
    /// a run of consecutive readings a pending manual input goes first.
    /// Returns `None` once the sensor stream and the control channel are
    /// both gone.
    pub async fn next_event(&mut self) -> Option<StepEvent> {
        enum Next {
            Reading(Option<u32>),
            Control(Option<StepEvent>),
        }

        loop {
            let controls_due = self.readings_in_row >= MAX_READINGS_BEFORE_CONTROL;
            let next = match (self.subscription.as_mut(), self.controls.as_mut()) {
                (Some(sub), Some(controls)) if controls_due => tokio::select! {
                    biased;
                    control = controls.recv() => Next::Control(control),
                    reading = sub.next_reading() => Next::Reading(reading),
                },
                (Some(sub), Some(controls)) => tokio::select! {
                    biased;
                    reading = sub.next_reading() => Next::Reading(reading),
                    control = controls.recv() => Next::Control(control),
                },
                (Some(sub), None) => Next::Reading(sub.next_reading().await),
                (None, Some(controls)) => Next::Control(controls.recv().await),
                (None, None) => return None,
            };

            match next {
                Next::Reading(Some(steps)) => {
                    self.readings_in_row += 1;
                    return Some(StepEvent::Reading(steps));
                }
                Next::Control(Some(event)) => {
                    self.readings_in_row = 0;
                    return Some(event);
                }
                Next::Reading(None) => {
                    debug!("Sensor stream ended");
                    self.subscription = None;
                }
                Next::Control(None) => {
                    debug!("Control channel closed");
                    self.controls = None;
                    self.readings_in_row = 0;
                }
            }
        }
    }

    /// Apply one input and announce any milestone it reached.
    pub async fn handle(&mut self, event: StepEvent) -> SessionUpdate {
        let today = self.today();
        let transition = self.tracker.apply(event, today);

        let notification = match transition.milestone {
            Some(milestone) => Some(self.dispatcher.dispatch(milestone).await),
            None => None,
        };

        SessionUpdate {
            event,
            transition,
            notification,
        }
    }

    /// Handle inputs until none remain. Returns how many were handled.
    pub async fn run(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.next_event().await {
            self.handle(event).await;
            handled += 1;
        }
        debug!("Session input exhausted after {} events", handled);
        handled
    }

    /// Current progress, after checking for a day change.
    pub fn snapshot(&mut self) -> ProgressSnapshot {
        let today = self.today();
        self.tracker.observe_day(today);

        ProgressSnapshot {
            timestamp: Utc::now(),
            goal: self.tracker.goal(),
            state: self.tracker.state().clone(),
            percentage: self.tracker.progress_fraction() * 100.0,
            mode: self.mode,
            notifications: self.dispatcher.stats(),
        }
    }

    /// The tracker.
    pub fn tracker(&self) -> &MilestoneTracker {
        &self.tracker
    }

    /// Input mode.
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    fn today(&self) -> DayKey {
        self.policy.key_for(self.clock.today())
    }
}
