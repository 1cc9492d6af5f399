//! Error types for disturbance configuration.

use te_core::TeError;
use thiserror::Error;

/// Result type for disturbance operations.
pub type DisturbanceResult<T> = Result<T, DisturbanceError>;

/// Errors raised while configuring disturbance sources.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DisturbanceError {
    /// Invalid argument provided to a constructor.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Disturbance number outside IDV(1..20).
    #[error("Unknown disturbance IDV({number})")]
    UnknownDisturbance { number: usize },

    /// Host-supplied vector of the wrong width.
    #[error("Expected {expected} disturbance codes, got {got}")]
    Length { expected: usize, got: usize },
}

impl From<DisturbanceError> for TeError {
    fn from(err: DisturbanceError) -> Self {
        match err {
            DisturbanceError::InvalidArg { what } => TeError::InvalidArg { what },
            DisturbanceError::UnknownDisturbance { .. } => TeError::InvalidArg {
                what: "unknown disturbance number",
            },
            DisturbanceError::Length { expected, got } => TeError::LengthMismatch {
                what: "disturbance codes",
                expected,
                got,
            },
        }
    }
}
