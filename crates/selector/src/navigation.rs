//! Route hand-off between goal selection and progress tracking.

use stepgoal_core::StepGoal;
use tracing::warn;

/// Route prefix of the progress screen.
pub const PROGRESS_ROUTE: &str = "progress";

/// Goal used when the route parameter is missing or malformed.
pub const FALLBACK_GOAL: StepGoal = StepGoal::new(1000);

/// Render the route that opens progress tracking for `goal`.
pub fn progress_route(goal: StepGoal) -> String {
    format!("{PROGRESS_ROUTE}/{goal}")
}

/// Decode the goal route parameter, falling back to [`FALLBACK_GOAL`].
pub fn goal_from_route_param(param: Option<&str>) -> StepGoal {
    match param.map(str::parse::<StepGoal>) {
        Some(Ok(goal)) => goal,
        Some(Err(e)) => {
            warn!("Malformed goal route parameter ({}), using {}", e, FALLBACK_GOAL);
            FALLBACK_GOAL
        }
        None => {
            warn!("Missing goal route parameter, using {}", FALLBACK_GOAL);
            FALLBACK_GOAL
        }
    }
}

/// Decode a full `progress/{goal}` route.
pub fn parse_progress_route(route: &str) -> StepGoal {
    let param = route
        .trim_start_matches('/')
        .strip_prefix(PROGRESS_ROUTE)
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|p| !p.is_empty());
    goal_from_route_param(param)
}
