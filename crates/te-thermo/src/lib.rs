//! te-thermo: physical properties of the eight-component Tennessee Eastman system.
//!
//! Provides:
//! - Component definitions (A..H) and the standard property table
//! - Mole-fraction vectors built from unit holdups
//! - The `ThermoModel` trait: mixture enthalpy and its temperature slope,
//!   temperature-from-enthalpy inversion, liquid density and vapor pressure
//!
//! All property functions are pure; they take caller-owned compositions and
//! return plain values. The only "failure" is a non-converged temperature
//! inversion, which is reported as a flag rather than an error.

pub mod component;
pub mod composition;
pub mod error;
pub mod model;
pub mod table;

pub use component::{Component, NC};
pub use composition::MoleFractions;
pub use error::{ThermoError, ThermoResult};
pub use model::{Phase, TemperatureSolve, ThermoModel};
pub use table::PropertyTable;
