//! Tennessee Eastman plant model and a reference simulation host.
//!
//! Provides:
//! - [`TennesseeEastman`]: the plant instance. It owns every piece of mutable
//!   model state (random sequence, walk channels, valves, analyzers, trip
//!   latch) and evaluates derivatives and measurements on demand
//! - [`PlantModel`]: adapter that lets the fixed-step runner drive the plant
//!   with constant valve commands
//! - Fixed-step RK4 and forward Euler integrators and [`run_sim`]

pub mod error;
pub mod host;
pub mod integrator;
pub mod model;
pub mod plant;
pub mod sim;

pub use error::{SimError, SimResult};
pub use host::{OutputSample, PlantModel, STARTUP_WINDOW};
pub use integrator::{ForwardEuler, Integrator, RK4};
pub use model::{StepControl, TransientModel};
pub use plant::{
    Evaluation, INPUT_NAMES, MEASUREMENT_NAMES, N_INPUTS, N_MEASUREMENTS, N_STATES, NOMINAL_STATE,
    PlantConfig, Stream, StreamTable, TennesseeEastman, Trip, TripCode,
};
pub use sim::{IntegratorType, SimOptions, SimRecord, run_sim};
