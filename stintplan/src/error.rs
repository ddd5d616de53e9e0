use thiserror::Error;

/// Result type alias for schedule operations.
pub type Result<T, E = ScheduleError> = std::result::Result<T, E>;

/// Main error type for schedule operations. Only configuration and plan shape problems are
/// errors, unparsable stint durations and unknown stint numbers are handled where they occur.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ScheduleError {
    #[error("Invalid race configuration: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Invalid plan: {reason}")]
    InvalidPlan { reason: String },
}

impl ScheduleError {
    /// Create a configuration error for the given field.
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig { field, reason: reason.into() }
    }

    /// Create a plan shape error.
    pub fn invalid_plan(reason: impl Into<String>) -> Self {
        Self::InvalidPlan { reason: reason.into() }
    }
}
