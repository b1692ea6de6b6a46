//! Step events - the inputs of the progress tracker.

use serde::{Deserialize, Serialize};

/// One input to the progress tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepEvent {
    /// A step-counter reading: cumulative steps since the counter's own
    /// reset point (usually device boot), not since midnight.
    Reading(u32),

    /// The manual test control: adds the configured increment to the
    /// displayed count.
    ManualIncrement,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_shape() {
        let events: Vec<StepEvent> =
            serde_json::from_str(r#"[{"reading": 400}, "manual_increment"]"#).unwrap();
        assert_eq!(events, vec![StepEvent::Reading(400), StepEvent::ManualIncrement]);
    }
}
