//! Per-component property coefficients.

use crate::component::NC;
use crate::error::{ThermoError, ThermoResult};

/// Coefficient table for the eight components.
///
/// Temperatures are in deg C; enthalpies come out in the model's energy unit
/// per kmol; densities in kmol/ft3 once divided through by molar mass.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyTable {
    /// Molar mass [kg/kmol].
    pub molar_mass: [f64; NC],
    /// Antoine coefficients: `ln p = a + b / (T + c)`.
    pub antoine_a: [f64; NC],
    pub antoine_b: [f64; NC],
    pub antoine_c: [f64; NC],
    /// Liquid heat-capacity polynomial.
    pub liquid_cp_a: [f64; NC],
    pub liquid_cp_b: [f64; NC],
    pub liquid_cp_c: [f64; NC],
    /// Vapor heat-capacity polynomial.
    pub vapor_cp_a: [f64; NC],
    pub vapor_cp_b: [f64; NC],
    pub vapor_cp_c: [f64; NC],
    /// Heat of vaporization.
    pub vaporization: [f64; NC],
    /// Liquid density polynomial (mass basis).
    pub density_a: [f64; NC],
    pub density_b: [f64; NC],
    pub density_c: [f64; NC],
    /// Ideal-gas correction used by the corrected vapor enthalpy.
    pub gas_correction: f64,
}

impl PropertyTable {
    /// The published coefficient set of the Tennessee Eastman problem.
    pub fn standard() -> Self {
        Self {
            molar_mass: [2.0, 25.4, 28.0, 32.0, 46.0, 48.0, 62.0, 76.0],
            antoine_a: [0.0, 0.0, 0.0, 15.92, 16.35, 16.35, 16.43, 17.21],
            antoine_b: [0.0, 0.0, 0.0, -1444.0, -2114.0, -2114.0, -2748.0, -3318.0],
            antoine_c: [0.0, 0.0, 0.0, 259.0, 265.5, 265.5, 232.9, 249.6],
            liquid_cp_a: [1e-6, 1e-6, 1e-6, 9.6e-7, 5.73e-7, 6.52e-7, 5.15e-7, 4.71e-7],
            liquid_cp_b: [0.0, 0.0, 0.0, 8.7e-9, 2.41e-9, 2.18e-9, 5.65e-10, 8.7e-10],
            liquid_cp_c: [0.0, 0.0, 0.0, 4.81e-11, 1.82e-11, 1.94e-11, 3.82e-12, 2.62e-12],
            vapor_cp_a: [
                3.411e-6, 3.799e-7, 2.491e-7, 3.567e-7, 3.463e-7, 3.93e-7, 1.7e-7, 1.5e-7,
            ],
            vapor_cp_b: [
                7.18e-10, 1.08e-9, 1.36e-11, 8.51e-10, 8.96e-10, 1.02e-9, 0.0, 0.0,
            ],
            vapor_cp_c: [
                6e-13, -3.98e-13, -3.93e-14, -3.12e-13, -3.27e-13, -3.12e-13, 0.0, 0.0,
            ],
            vaporization: [1e-6, 1e-6, 1e-6, 8.67e-5, 1.6e-4, 1.6e-4, 2.25e-4, 2.09e-4],
            density_a: [1.0, 1.0, 1.0, 23.3, 33.9, 32.8, 49.9, 50.5],
            density_b: [0.0, 0.0, 0.0, -0.07, -0.0957, -0.0995, -0.0191, -0.0541],
            density_c: [0.0, 0.0, 0.0, -2e-4, -1.52e-4, -2.33e-4, -4.25e-4, -1.5e-4],
            gas_correction: 3.57696e-6,
        }
    }

    /// Reject tables that would make the property functions meaningless.
    pub fn validate(&self) -> ThermoResult<()> {
        let all_finite = [
            &self.molar_mass,
            &self.antoine_a,
            &self.antoine_b,
            &self.antoine_c,
            &self.liquid_cp_a,
            &self.liquid_cp_b,
            &self.liquid_cp_c,
            &self.vapor_cp_a,
            &self.vapor_cp_b,
            &self.vapor_cp_c,
            &self.vaporization,
            &self.density_a,
            &self.density_b,
            &self.density_c,
        ]
        .iter()
        .all(|row| row.iter().all(|v| v.is_finite()));
        if !all_finite || !self.gas_correction.is_finite() {
            return Err(ThermoError::InvalidArg {
                what: "property table contains non-finite coefficients",
            });
        }
        if self.molar_mass.iter().any(|mw| *mw <= 0.0) {
            return Err(ThermoError::InvalidArg {
                what: "molar masses must be positive",
            });
        }
        Ok(())
    }
}

impl Default for PropertyTable {
    fn default() -> Self {
        Self::standard()
    }
}
