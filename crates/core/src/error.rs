//! Errors raised while building core values.

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur when constructing core values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Age input was not an integer
    #[error("age is not a number: {0:?}")]
    AgeNotANumber(String),

    /// Age parsed but lies outside the accepted range
    #[error("age {age} is outside {min}..={max}")]
    AgeOutOfRange {
        /// The parsed age
        age: i64,
        /// Lowest accepted age
        min: u32,
        /// Highest accepted age
        max: u32,
    },

    /// Goal text was not a non-negative integer
    #[error("invalid step goal: {0:?}")]
    InvalidGoal(String),

    /// Milestone percentage outside 1..=100
    #[error("milestone must be within 1..=100%, got {0}%")]
    InvalidMilestone(u8),
}
