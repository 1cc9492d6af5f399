//! The Tennessee Eastman process.
//!
//! Reactor, product condenser and separator, recycle compressor and product
//! stripper, described by 50 states. [`TennesseeEastman`] turns a state and
//! 12 valve commands into derivatives and 41 measurements.

pub mod config;
pub mod engine;
pub mod flows;
pub mod heat;
pub mod layout;
pub mod measurements;
pub mod reactions;
pub mod shutdown;
pub mod streams;
pub mod vessels;

pub use config::PlantConfig;
pub use engine::{Evaluation, TennesseeEastman};
pub use layout::{N_INPUTS, N_MEASUREMENTS, N_STATES, NOMINAL_STATE, valve_positions};
pub use measurements::{INPUT_NAMES, MEASUREMENT_NAMES, input_key, measurement_key};
pub use shutdown::{Trip, TripCode};
pub use streams::{Stream, StreamState, StreamTable};
