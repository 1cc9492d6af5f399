//! Mixture property functions.

use crate::component::{Component, NC};
use crate::composition::MoleFractions;
use crate::table::PropertyTable;
use tracing::trace;

/// Degrees between deg C and K.
const KELVIN_OFFSET: f64 = 273.15;

/// Enthalpy reference per phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Liquid,
    /// Vapor enthalpy including the heat of vaporization.
    Vapor,
    /// Vapor enthalpy with the ideal-gas `R*T` term removed (internal energy
    /// basis, used for the compressor header holdup).
    VaporCorrected,
}

/// Outcome of a temperature-from-enthalpy inversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureSolve {
    /// Temperature [deg C]. Equals the initial guess when not converged.
    pub temperature: f64,
    pub converged: bool,
    pub iterations: usize,
}

/// Newton iteration limit for the temperature inversion.
pub const MAX_TEMPERATURE_ITERATIONS: usize = 100;

/// Step size below which the temperature inversion has converged.
pub const TEMPERATURE_STEP_TOL: f64 = 1e-12;

/// Property model over eight-component mixtures.
pub trait ThermoModel {
    /// Molar enthalpy of a mixture at `t` [deg C].
    fn enthalpy(&self, x: &MoleFractions, t: f64, phase: Phase) -> f64;

    /// Analytic dH/dT of [`ThermoModel::enthalpy`].
    fn enthalpy_slope(&self, x: &MoleFractions, t: f64, phase: Phase) -> f64;

    /// Molar liquid density.
    fn liquid_density(&self, x: &MoleFractions, t: f64) -> f64;

    /// Pure-component vapor pressure at `t` [deg C].
    fn vapor_pressure(&self, c: Component, t: f64) -> f64;

    /// Invert the enthalpy for temperature by Newton iteration from `t_guess`.
    ///
    /// Non-convergence is tolerated: the guess comes back unchanged with
    /// `converged == false`.
    fn temperature_from_enthalpy(
        &self,
        x: &MoleFractions,
        h: f64,
        phase: Phase,
        t_guess: f64,
    ) -> TemperatureSolve {
        let mut t = t_guess;
        for iter in 1..=MAX_TEMPERATURE_ITERATIONS {
            let err = self.enthalpy(x, t, phase) - h;
            let dt = -err / self.enthalpy_slope(x, t, phase);
            t += dt;
            if dt.abs() < TEMPERATURE_STEP_TOL {
                return TemperatureSolve {
                    temperature: t,
                    converged: true,
                    iterations: iter,
                };
            }
        }
        trace!(t_guess, h, ?phase, "temperature inversion did not converge");
        TemperatureSolve {
            temperature: t_guess,
            converged: false,
            iterations: MAX_TEMPERATURE_ITERATIONS,
        }
    }
}

impl ThermoModel for PropertyTable {
    fn enthalpy(&self, x: &MoleFractions, t: f64, phase: Phase) -> f64 {
        let mut h = 0.0;
        for i in 0..NC {
            let hi = match phase {
                Phase::Liquid => {
                    1.8 * t
                        * (self.liquid_cp_a[i]
                            + self.liquid_cp_b[i] * t / 2.0
                            + self.liquid_cp_c[i] * t * t / 3.0)
                }
                Phase::Vapor | Phase::VaporCorrected => {
                    1.8 * t
                        * (self.vapor_cp_a[i]
                            + self.vapor_cp_b[i] * t / 2.0
                            + self.vapor_cp_c[i] * t * t / 3.0)
                        + self.vaporization[i]
                }
            };
            h += x[i] * self.molar_mass[i] * hi;
        }
        if phase == Phase::VaporCorrected {
            h -= self.gas_correction * (t + KELVIN_OFFSET);
        }
        h
    }

    fn enthalpy_slope(&self, x: &MoleFractions, t: f64, phase: Phase) -> f64 {
        let mut dh = 0.0;
        for i in 0..NC {
            let dhi = match phase {
                Phase::Liquid => {
                    1.8 * (self.liquid_cp_a[i]
                        + self.liquid_cp_b[i] * t
                        + self.liquid_cp_c[i] * t * t)
                }
                Phase::Vapor | Phase::VaporCorrected => {
                    1.8 * (self.vapor_cp_a[i] + self.vapor_cp_b[i] * t + self.vapor_cp_c[i] * t * t)
                }
            };
            dh += x[i] * self.molar_mass[i] * dhi;
        }
        if phase == Phase::VaporCorrected {
            dh -= self.gas_correction;
        }
        dh
    }

    fn liquid_density(&self, x: &MoleFractions, t: f64) -> f64 {
        let mut v = 0.0;
        for i in 0..NC {
            v += x[i] * self.molar_mass[i]
                / (self.density_a[i] + (self.density_b[i] + self.density_c[i] * t) * t);
        }
        1.0 / v
    }

    fn vapor_pressure(&self, c: Component, t: f64) -> f64 {
        let i = c.index();
        (self.antoine_a[i] + self.antoine_b[i] / (t + self.antoine_c[i])).exp()
    }
}
