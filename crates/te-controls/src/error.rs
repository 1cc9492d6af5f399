//! Error types for control element configuration.

use te_core::TeError;
use thiserror::Error;

/// Result type for control element operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur when configuring valves and analyzers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a constructor.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

impl From<ControlError> for TeError {
    fn from(err: ControlError) -> Self {
        match err {
            ControlError::InvalidArg { what } => TeError::InvalidArg { what },
        }
    }
}
