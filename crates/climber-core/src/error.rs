//! Error types for Climber

use thiserror::Error;

/// Main error type for engine operations.
///
/// Domain infeasibility is never an error: it flows through
/// [`Score::Infeasible`](crate::Score::Infeasible). Only violated
/// preconditions of the engine itself end up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClimbError {
    /// The search configuration violates an engine precondition.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl ClimbError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ClimbError::InvalidConfiguration(message.into())
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, ClimbError>;
