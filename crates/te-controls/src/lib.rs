//! Final control elements and sensor timing for the Tennessee Eastman plant.
//!
//! # Architecture
//!
//! - Valves are first-order lags between the commanded position (a host input)
//!   and the filtered position (a plant state), with an optional stiction
//!   deadband on the command
//! - Composition analyzers are sampled instruments: each scan reports the
//!   value captured on the previous scan, so readings lag by one period
//!
//! Neither type owns a random source. Analyzer noise is supplied by the
//! caller so the plant keeps a single, ordered draw sequence.

pub mod actuator;
pub mod error;
pub mod sampled;

pub use actuator::{VALVE_MAX, VALVE_MIN, ValveActuator};
pub use error::{ControlError, ControlResult};
pub use sampled::{DelayedAnalyzer, SampleClock, SampleConfig};
