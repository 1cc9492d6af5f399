//! The process-wide pseudo-random sequence.

use crate::error::{DisturbanceError, DisturbanceResult};

/// Seed of the reference sequence.
pub const DEFAULT_SEED: u32 = 1_431_655_765;

const MULTIPLIER: f64 = 9_228_907.0;
const MODULUS: f64 = 4_294_967_296.0;

/// Range of a single uniform draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Draw {
    /// Uniform on [0, 1).
    Unsigned,
    /// Uniform on [-1, 1).
    Signed,
}

/// Multiplicative congruential generator `g <- g * 9228907 mod 2^32`.
///
/// The product is formed in double precision, as in the published model, so
/// the low bits of large products are rounded before the modulus is taken.
/// Keeping that arithmetic is what makes runs comparable with reference data.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomGenerator {
    state: f64,
}

impl RandomGenerator {
    /// Create a generator. A zero seed would stay at zero forever.
    pub fn new(seed: u32) -> DisturbanceResult<Self> {
        if seed == 0 {
            return Err(DisturbanceError::InvalidArg {
                what: "random seed must be non-zero",
            });
        }
        Ok(Self {
            state: f64::from(seed),
        })
    }

    /// Current accumulator value.
    pub fn state(&self) -> f64 {
        self.state
    }

    /// Advance the sequence once and map the new state to the requested range.
    pub fn next_uniform(&mut self, kind: Draw) -> f64 {
        let product = self.state * MULTIPLIER;
        self.state = product - MODULUS * (product / MODULUS).floor();
        match kind {
            Draw::Unsigned => self.state / MODULUS,
            Draw::Signed => 2.0 * self.state / MODULUS - 1.0,
        }
    }

    /// Approximately normal noise: twelve unsigned draws, `(sum - 6) * std_dev`.
    pub fn sum_of_twelve_uniforms(&mut self, std_dev: f64) -> f64 {
        let mut sum = 0.0;
        for _ in 0..12 {
            sum += self.next_uniform(Draw::Unsigned);
        }
        (sum - 6.0) * std_dev
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self {
            state: f64::from(DEFAULT_SEED),
        }
    }
}
