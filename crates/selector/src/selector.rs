//! Goal selection form state.
//!
//! Holds what the goal-setting screen shows: the raw age text, the
//! recommended goal derived from it and which controls are enabled. The
//! rendering layer reads [`SelectorView`] and calls the actions.

use serde::Serialize;
use stepgoal_core::{Age, CoreError, StepGoal};
use tracing::debug;

use crate::recommend::recommended_steps;

/// Errors returned by selector actions.
///
/// None of these are fatal: the action is refused and the form state is
/// left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    /// The current age text is not a valid age
    #[error("invalid age {input:?}: {reason}")]
    InvalidAge {
        /// Raw age text
        input: String,
        /// Why it was rejected
        reason: CoreError,
    },

    /// Decrementing would take the goal to or below zero
    #[error("goal {current} is at or below the decrement floor")]
    DecrementFloor {
        /// Goal at the time of the request
        current: u32,
    },
}

/// Goal-setting form state.
#[derive(Debug, Clone)]
pub struct GoalSelector {
    age_input: String,
    age: Result<Age, CoreError>,
    recommended: u32,
}

/// Read-only view of the form for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorView {
    /// Raw age text
    pub age_input: String,
    /// Whether the age text is a valid age
    pub age_valid: bool,
    /// Goal currently shown
    pub recommended_steps: u32,
    /// "+" enabled
    pub can_increment: bool,
    /// "-" enabled
    pub can_decrement: bool,
    /// Submit enabled
    pub can_confirm: bool,
}

impl GoalSelector {
    /// Create an empty form. The goal shows 0 until a valid age is entered.
    pub fn new() -> Self {
        Self {
            age_input: String::new(),
            age: Age::parse(""),
            recommended: 0,
        }
    }

    /// Replace the age text and recompute the recommendation.
    ///
    /// Any manual adjustment made before is discarded.
    pub fn set_age_input(&mut self, input: impl Into<String>) {
        self.age_input = input.into();
        self.age = Age::parse(&self.age_input);
        self.recommended = match &self.age {
            Ok(age) => recommended_steps(Some(age.years())),
            Err(_) => 0,
        };
        debug!(
            "Age input {:?} -> recommended {} steps",
            self.age_input, self.recommended
        );
    }

    /// Raw age text.
    pub fn age_input(&self) -> &str {
        &self.age_input
    }

    /// The parsed age, when valid.
    pub fn age(&self) -> Option<Age> {
        self.age.as_ref().ok().copied()
    }

    /// Goal currently shown.
    pub fn recommended(&self) -> u32 {
        self.recommended
    }

    /// Whether "+" is enabled.
    pub fn can_increment(&self) -> bool {
        self.age.is_ok()
    }

    /// Whether "-" is enabled.
    pub fn can_decrement(&self) -> bool {
        self.recommended > StepGoal::ADJUSTMENT
    }

    /// Whether the goal may be submitted.
    pub fn can_confirm(&self) -> bool {
        self.age.is_ok()
    }

    /// Raise the goal by 500.
    pub fn increment(&mut self) -> Result<u32, SelectorError> {
        self.require_valid_age()?;
        self.recommended = self.recommended.saturating_add(StepGoal::ADJUSTMENT);
        Ok(self.recommended)
    }

    /// Lower the goal by 500. Refused at or below 500.
    pub fn decrement(&mut self) -> Result<u32, SelectorError> {
        if !self.can_decrement() {
            return Err(SelectorError::DecrementFloor {
                current: self.recommended,
            });
        }
        self.recommended -= StepGoal::ADJUSTMENT;
        Ok(self.recommended)
    }

    /// Confirm the goal for tracking. Only allowed with a valid age.
    pub fn confirm(&self) -> Result<StepGoal, SelectorError> {
        self.require_valid_age()?;
        Ok(StepGoal::new(self.recommended))
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> SelectorView {
        SelectorView {
            age_input: self.age_input.clone(),
            age_valid: self.age.is_ok(),
            recommended_steps: self.recommended,
            can_increment: self.can_increment(),
            can_decrement: self.can_decrement(),
            can_confirm: self.can_confirm(),
        }
    }

    fn require_valid_age(&self) -> Result<(), SelectorError> {
        match &self.age {
            Ok(_) => Ok(()),
            Err(reason) => Err(SelectorError::InvalidAge {
                input: self.age_input.clone(),
                reason: reason.clone(),
            }),
        }
    }
}

impl Default for GoalSelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector_with_age(input: &str) -> GoalSelector {
        let mut selector = GoalSelector::new();
        selector.set_age_input(input);
        selector
    }

    #[test]
    fn test_empty_form_is_disabled() {
        let view = GoalSelector::new().view();
        assert!(!view.age_valid);
        assert_eq!(view.recommended_steps, 0);
        assert!(!view.can_increment);
        assert!(!view.can_decrement);
        assert!(!view.can_confirm);
    }

    #[test]
    fn test_valid_age_sets_recommendation() {
        let selector = selector_with_age("15");
        assert_eq!(selector.recommended(), 12_000);
        assert_eq!(selector.age().map(Age::years), Some(15));
        assert!(selector.can_increment());
        assert!(selector.can_decrement());
        assert!(selector.can_confirm());
    }

    #[test]
    fn test_invalid_age_resets_and_disables() {
        for input in ["4", "101", "abc", "", "-20", "12.5"] {
            let mut selector = selector_with_age("30");
            selector.set_age_input(input);
            let view = selector.view();
            assert_eq!(selector.age_input(), input);
            assert_eq!(view.recommended_steps, 0, "input {input:?}");
            assert!(!view.can_increment, "input {input:?}");
            assert!(!view.can_decrement, "input {input:?}");
            assert!(!view.can_confirm, "input {input:?}");
        }
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut selector = selector_with_age("70");
        assert_eq!(selector.increment(), Ok(7_500));
        assert_eq!(selector.decrement(), Ok(7_000));
        assert_eq!(selector.decrement(), Ok(6_500));
    }

    #[test]
    fn test_decrement_floor() {
        let mut selector = selector_with_age("70");
        while selector.can_decrement() {
            selector.decrement().unwrap();
        }
        assert_eq!(selector.recommended(), 500);
        assert_eq!(
            selector.decrement(),
            Err(SelectorError::DecrementFloor { current: 500 })
        );
        assert_eq!(selector.recommended(), 500);
    }

    #[test]
    fn test_increment_refused_without_age() {
        let mut selector = selector_with_age("nope");
        assert!(matches!(
            selector.increment(),
            Err(SelectorError::InvalidAge { .. })
        ));
        assert_eq!(selector.recommended(), 0);
    }

    #[test]
    fn test_confirm_forwards_adjusted_goal() {
        let mut selector = selector_with_age("30");
        selector.increment().unwrap();
        assert_eq!(selector.confirm(), Ok(StepGoal::new(10_500)));
    }

    #[test]
    fn test_confirm_refused_without_age() {
        let selector = selector_with_age("200");
        assert!(selector.confirm().is_err());
    }

    #[test]
    fn test_new_age_discards_adjustment() {
        let mut selector = selector_with_age("30");
        selector.increment().unwrap();
        selector.set_age_input("66");
        assert_eq!(selector.recommended(), 7_000);
    }
}
