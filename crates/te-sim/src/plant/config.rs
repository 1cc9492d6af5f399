//! Plant construction parameters.

use te_disturbances::{DEFAULT_SEED, N_WALKS, WalkChannel, WalkParams};
use te_thermo::PropertyTable;

use crate::error::{SimError, SimResult};
use crate::plant::layout::{N_INPUTS, N_MEASUREMENTS, N_STATES, NOMINAL_STATE};
use crate::plant::measurements::{GAS_ANALYZER_PERIOD, NOISE_STD, PRODUCT_ANALYZER_PERIOD};
use crate::plant::vessels::VesselVolumes;

/// Valve time constants (s), XMV(1..12).
pub const VALVE_TAU_SECONDS: [f64; N_INPUTS] =
    [8.0, 8.0, 6.0, 9.0, 7.0, 5.0, 5.0, 5.0, 120.0, 5.0, 5.0, 5.0];

/// Stiction deadband applied when a sticking-valve disturbance is active
/// (% of span).
pub const VALVE_DEADBAND: f64 = 2.0;

/// Everything needed to build a plant instance.
///
/// `Default` is the standard Tennessee Eastman configuration; override
/// `seed` for independent replicate runs.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantConfig {
    pub properties: PropertyTable,
    pub seed: u32,
    /// Walk parameters in [`WalkChannel::ALL`] order.
    pub walks: [WalkParams; N_WALKS],
    pub valve_tau_seconds: [f64; N_INPUTS],
    pub valve_deadband: f64,
    /// Measurement noise standard deviations.
    pub noise_std: [f64; N_MEASUREMENTS],
    pub volumes: VesselVolumes,
    /// Default initial state when no override is supplied.
    pub nominal_state: [f64; N_STATES],
    /// Feed and purge analyzer period (h).
    pub gas_analyzer_period: f64,
    /// Product analyzer period (h).
    pub product_analyzer_period: f64,
}

impl Default for PlantConfig {
    fn default() -> Self {
        Self {
            properties: PropertyTable::standard(),
            seed: DEFAULT_SEED,
            walks: WalkChannel::ALL.map(WalkChannel::standard_params),
            valve_tau_seconds: VALVE_TAU_SECONDS,
            valve_deadband: VALVE_DEADBAND,
            noise_std: NOISE_STD,
            volumes: VesselVolumes::default(),
            nominal_state: NOMINAL_STATE,
            gas_analyzer_period: GAS_ANALYZER_PERIOD,
            product_analyzer_period: PRODUCT_ANALYZER_PERIOD,
        }
    }
}

impl PlantConfig {
    /// Standard configuration with a different random seed.
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Check the parameters before building a plant.
    ///
    /// Walk, valve and analyzer parameters are checked again by their own
    /// constructors; this catches the rest early with plant-level messages.
    pub fn validate(&self) -> SimResult<()> {
        self.properties.validate()?;
        if self.seed == 0 {
            return Err(SimError::InvalidArg {
                what: "seed must be non-zero",
            });
        }
        for p in &self.walks {
            p.validate()?;
        }
        if self
            .valve_tau_seconds
            .iter()
            .any(|t| !(t.is_finite() && *t > 0.0))
        {
            return Err(SimError::InvalidArg {
                what: "valve time constants must be positive",
            });
        }
        if !(self.valve_deadband.is_finite() && self.valve_deadband >= 0.0) {
            return Err(SimError::InvalidArg {
                what: "valve deadband must be non-negative",
            });
        }
        if self.noise_std.iter().any(|s| !(s.is_finite() && *s >= 0.0)) {
            return Err(SimError::InvalidArg {
                what: "noise standard deviations must be non-negative",
            });
        }
        let v = &self.volumes;
        if [v.reactor, v.separator, v.stripper, v.header]
            .iter()
            .any(|x| !(x.is_finite() && *x > 0.0))
        {
            return Err(SimError::InvalidArg {
                what: "vessel volumes must be positive",
            });
        }
        if self.nominal_state.iter().any(|x| !x.is_finite()) {
            return Err(SimError::NonPhysical {
                what: "nominal state must be finite",
            });
        }
        for period in [self.gas_analyzer_period, self.product_analyzer_period] {
            if !(period.is_finite() && period > 0.0) {
                return Err(SimError::InvalidArg {
                    what: "analyzer periods must be positive",
                });
            }
        }
        Ok(())
    }
}
