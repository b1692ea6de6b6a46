//! Goal Selection
//!
//! Age-based step recommendations, the adjustable goal form and the route
//! that hands the confirmed goal over to progress tracking.

#![warn(missing_docs)]

pub mod recommend;
pub mod selector;
pub mod navigation;

pub use recommend::recommended_steps;
pub use selector::{GoalSelector, SelectorError, SelectorView};
pub use navigation::{
    goal_from_route_param, parse_progress_route, progress_route, FALLBACK_GOAL, PROGRESS_ROUTE,
};
