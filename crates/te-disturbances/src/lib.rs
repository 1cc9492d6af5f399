//! Stochastic disturbance sources for the Tennessee Eastman plant.
//!
//! # Architecture
//!
//! - [`RandomGenerator`]: the single multiplicative congruential sequence that
//!   feeds every random draw of one plant instance
//! - [`RandomWalk`]: a cubic-spline random walk re-drawn at breakpoints
//! - [`DisturbanceWalks`]: the twelve walk channels of the process
//! - [`DisturbanceVector`]: the host-supplied IDV(1..20) codes
//!
//! Reproducibility depends on draw order, so no type here draws on its own
//! initiative: callers pass the generator in explicitly and decide the order.

pub mod error;
pub mod idv;
pub mod rng;
pub mod walk;

pub use error::{DisturbanceError, DisturbanceResult};
pub use idv::{DisturbanceVector, N_IDV};
pub use rng::{DEFAULT_SEED, Draw, RandomGenerator};
pub use walk::{
    CubicSegment, DisturbanceWalks, FIRST_BREAKPOINT, N_WALKS, RandomWalk, WalkChannel, WalkMode,
    WalkParams,
};
