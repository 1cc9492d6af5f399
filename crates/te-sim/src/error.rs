//! Error types for plant construction and simulation.

use thiserror::Error;

/// Errors encountered while building or driving the plant.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Expected {expected} values for {what}, got {got}")]
    Length {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Non-physical condition: {what}")]
    NonPhysical { what: &'static str },

    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<te_core::TeError> for SimError {
    fn from(e: te_core::TeError) -> Self {
        match e {
            te_core::TeError::LengthMismatch {
                what,
                expected,
                got,
            } => SimError::Length {
                what,
                expected,
                got,
            },
            te_core::TeError::InvalidArg { what } => SimError::InvalidArg { what },
            te_core::TeError::NonFinite { what, .. } => SimError::NonPhysical { what },
            other => SimError::Backend {
                message: other.to_string(),
            },
        }
    }
}

impl From<te_thermo::ThermoError> for SimError {
    fn from(e: te_thermo::ThermoError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}

impl From<te_disturbances::DisturbanceError> for SimError {
    fn from(e: te_disturbances::DisturbanceError) -> Self {
        match e {
            te_disturbances::DisturbanceError::Length { expected, got } => SimError::Length {
                what: "disturbance codes",
                expected,
                got,
            },
            other => SimError::Backend {
                message: other.to_string(),
            },
        }
    }
}

impl From<te_controls::ControlError> for SimError {
    fn from(e: te_controls::ControlError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}
