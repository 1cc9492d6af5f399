//! Run file validation.

use te_disturbances::N_IDV;
use te_sim::{N_INPUTS, N_STATES};

use crate::schema::{DisturbancesDef, RunConfig};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Wrong length for {field}: expected {expected}, got {got}")]
    Length {
        field: String,
        expected: usize,
        got: usize,
    },

    #[error("Unknown disturbance IDV({number}), expected 1..={max}")]
    UnknownDisturbance { number: usize, max: usize },
}

pub fn validate_run(run: &RunConfig) -> Result<(), ValidationError> {
    positive("dt_hours", run.dt_hours)?;
    if !(run.t_end_hours.is_finite() && run.t_end_hours >= 0.0) {
        return Err(invalid("t_end_hours", run.t_end_hours, "must be non-negative"));
    }
    if run.record_every == 0 {
        return Err(invalid("record_every", 0, "must be at least 1"));
    }
    if run.seed == Some(0) {
        return Err(invalid("seed", 0, "must be non-zero"));
    }
    if let Some(state) = &run.initial_state {
        finite_vector("initial_state", state, N_STATES)?;
    }
    if let Some(inputs) = &run.inputs {
        finite_vector("inputs", inputs, N_INPUTS)?;
    }
    match &run.disturbances {
        DisturbancesDef::Active(numbers) => {
            if let Some(&number) = numbers.iter().find(|n| !(1..=N_IDV).contains(*n)) {
                return Err(ValidationError::UnknownDisturbance {
                    number,
                    max: N_IDV,
                });
            }
        }
        DisturbancesDef::Codes(codes) => {
            if codes.len() != N_IDV {
                return Err(ValidationError::Length {
                    field: "disturbances.codes".to_string(),
                    expected: N_IDV,
                    got: codes.len(),
                });
            }
        }
    }
    Ok(())
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be positive"))
    }
}

fn finite_vector(field: &str, values: &[f64], expected: usize) -> Result<(), ValidationError> {
    if values.len() != expected {
        return Err(ValidationError::Length {
            field: field.to_string(),
            expected,
            got: values.len(),
        });
    }
    if let Some((i, v)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(invalid(&format!("{field}[{i}]"), v, "must be finite"));
    }
    Ok(())
}
