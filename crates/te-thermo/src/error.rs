//! Thermo errors.

use te_core::TeError;
use thiserror::Error;

/// Result type for thermo operations.
pub type ThermoResult<T> = Result<T, ThermoError>;

/// Errors raised while building compositions or property tables.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThermoError {
    /// Non-physical values (negative holdup, empty mixture, ...).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

impl From<ThermoError> for TeError {
    fn from(err: ThermoError) -> Self {
        match err {
            ThermoError::NonPhysical { what } => TeError::Invariant { what },
            ThermoError::InvalidArg { what } => TeError::InvalidArg { what },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ThermoError::NonPhysical { what: "holdup" };
        assert!(err.to_string().contains("holdup"));
    }

    #[test]
    fn error_to_te_error() {
        let err: TeError = ThermoError::InvalidArg { what: "table" }.into();
        assert!(matches!(err, TeError::InvalidArg { .. }));
    }
}
