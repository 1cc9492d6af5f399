//! te-core: pieces shared by every Tennessee Eastman crate.
//!
//! - [`numeric`]: tolerance comparison, length and finiteness checks on host
//!   vectors, cubic evaluation
//! - [`units`]: conversions at the measurement boundary
//! - [`error`]: [`TeError`]

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{TeError, TeResult};
pub use numeric::*;
pub use units::*;
