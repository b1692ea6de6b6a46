//! Milestone and day-rollover state machine.
//!
//! The tracker is a plain owned struct. Every input goes through
//! [`MilestoneTracker::apply`], which:
//!
//! 1. resets the displayed count and milestone when the day key changed,
//! 2. records the new cumulative count (reading value, or displayed count
//!    plus the manual increment),
//! 3. clamps the displayed count at the goal,
//! 4. reports at most one newly reached milestone, the lowest pending one.
//!
//! Rollover does not re-baseline the hardware counter: the cumulative value
//! is whatever the sensor last reported.

use serde::Serialize;
use stepgoal_core::{DayKey, Milestone, StepEvent, StepGoal};
use tracing::{debug, info};

use crate::config::TrackerConfig;

/// Tracked values for the current day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackerState {
    cumulative_steps: u32,
    clamped_steps: u32,
    last_milestone: u8,
    current_day: DayKey,
}

impl TrackerState {
    /// Fresh state for `day`.
    pub fn new(day: DayKey) -> Self {
        Self {
            cumulative_steps: 0,
            clamped_steps: 0,
            last_milestone: 0,
            current_day: day,
        }
    }

    /// Last cumulative count (raw sensor value, or manual total).
    pub fn cumulative_steps(&self) -> u32 {
        self.cumulative_steps
    }

    /// Displayed count, never above the goal.
    pub fn clamped_steps(&self) -> u32 {
        self.clamped_steps
    }

    /// Percentage of the highest milestone reached today, 0 for none.
    pub fn last_milestone(&self) -> u8 {
        self.last_milestone
    }

    /// Day the values belong to.
    pub fn current_day(&self) -> DayKey {
        self.current_day
    }
}

/// Outcome of one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    /// Whether the day changed before the input was applied
    pub rolled_over: bool,

    /// Milestone newly reached by this input
    pub milestone: Option<Milestone>,

    /// Displayed count after the input
    pub clamped_steps: u32,
}

/// Milestone tracker for a single, fixed goal.
#[derive(Debug, Clone)]
pub struct MilestoneTracker {
    goal: StepGoal,
    milestones: Vec<Milestone>,
    manual_increment: u32,
    state: TrackerState,
}

impl MilestoneTracker {
    /// Create a tracker with default milestones and increment.
    pub fn new(goal: StepGoal, today: DayKey) -> Self {
        Self::with_config(goal, today, &TrackerConfig::default())
    }

    /// Create a tracker using the milestones and increment of `config`.
    ///
    /// `config` is expected to have passed [`TrackerConfig::validate`].
    pub fn with_config(goal: StepGoal, today: DayKey, config: &TrackerConfig) -> Self {
        let mut milestones = config.milestones.clone();
        milestones.sort();
        milestones.dedup();

        Self {
            goal,
            milestones,
            manual_increment: config.manual_increment,
            state: TrackerState::new(today),
        }
    }

    /// The goal, fixed for the tracker's lifetime.
    pub fn goal(&self) -> StepGoal {
        self.goal
    }

    /// Current state.
    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    /// Milestones evaluated, ascending.
    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    /// Displayed progress in `0.0..=1.0`; 0.0 for a zero goal.
    pub fn progress_fraction(&self) -> f32 {
        self.goal.fraction(self.state.clamped_steps)
    }

    /// Apply one input observed on `today`.
    pub fn apply(&mut self, event: StepEvent, today: DayKey) -> Transition {
        let rolled_over = self.observe_day(today);

        self.state.cumulative_steps = match event {
            StepEvent::Reading(steps) => steps,
            StepEvent::ManualIncrement => {
                self.state.clamped_steps.saturating_add(self.manual_increment)
            }
        };
        self.state.clamped_steps = self.goal.clamp(self.state.cumulative_steps);

        let milestone = self.check_milestones();

        Transition {
            rolled_over,
            milestone,
            clamped_steps: self.state.clamped_steps,
        }
    }

    /// Reset the displayed count and milestone if `today` is a new day.
    ///
    /// Returns whether a rollover happened. The cumulative count is kept.
    pub fn observe_day(&mut self, today: DayKey) -> bool {
        if today == self.state.current_day {
            return false;
        }

        info!(
            "Day changed {} -> {}, resetting progress (counter stays at {})",
            self.state.current_day, today, self.state.cumulative_steps
        );
        self.state.clamped_steps = 0;
        self.state.last_milestone = 0;
        self.state.current_day = today;
        true
    }

    /// Report the lowest milestone reached but not yet reported today.
    ///
    /// Stops at the first match, so an input that crosses several
    /// thresholds at once reports only one; the next input reports the next.
    fn check_milestones(&mut self) -> Option<Milestone> {
        let steps = self.state.clamped_steps;
        debug!("Checking milestones for {} steps", steps);

        for &milestone in &self.milestones {
            let threshold = self.goal.threshold(milestone.percent());
            debug!(
                "Milestone {} = {} steps, last milestone = {}",
                milestone, threshold, self.state.last_milestone
            );

            if steps >= threshold && milestone.percent() > self.state.last_milestone {
                info!("Reached milestone {} at {} steps", milestone, steps);
                self.state.last_milestone = milestone.percent();
                return Some(milestone);
            }
        }

        None
    }
}
