//! Vessel conditions from holdups.
//!
//! Each evaluation turns the component and energy holdups of a vessel into
//! composition, temperature, liquid volume and pressure. Temperatures are
//! found by inverting the enthalpy, starting from the previous estimate.

use te_core::kelvin_from_celsius;
use te_thermo::{Component, MoleFractions, NC, Phase, PropertyTable, ThermoModel};

/// Gas constant in the model's pressure, volume and amount units.
pub const GAS_CONSTANT: f64 = 998.9;

/// Vessel volumes (ft3).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VesselVolumes {
    pub reactor: f64,
    pub separator: f64,
    pub stripper: f64,
    pub header: f64,
}

impl Default for VesselVolumes {
    fn default() -> Self {
        Self {
            reactor: 1300.0,
            separator: 3500.0,
            stripper: 156.5,
            header: 5000.0,
        }
    }
}

/// A vessel with a liquid pool under a vapor space: the reactor or the
/// product separator.
///
/// A..C live only in the vapor (ideal gas); D..H live in the liquid and
/// exert their Raoult's-law partial pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoPhaseVessel {
    pub liquid: MoleFractions,
    pub liquid_total: f64,
    /// deg C
    pub temperature: f64,
    pub converged: bool,
    pub density: f64,
    pub liquid_volume: f64,
    pub vapor_volume: f64,
    pub partial_pressure: [f64; NC],
    pub pressure: f64,
    pub vapor: MoleFractions,
    /// Moles in the vapor space by component. A..C are the state holdups;
    /// D..H follow from their partial pressures.
    pub vapor_holdup: [f64; NC],
    pub vapor_total: f64,
}

impl TwoPhaseVessel {
    pub fn evaluate(
        table: &PropertyTable,
        vapor_holdup_in: &[f64],
        liquid_holdup: &[f64; NC],
        energy: f64,
        volume: f64,
        t_guess: f64,
    ) -> Self {
        let (liquid, liquid_total) = MoleFractions::from_amounts(liquid_holdup);
        let solve =
            table.temperature_from_enthalpy(&liquid, energy / liquid_total, Phase::Liquid, t_guess);
        let temperature = solve.temperature;
        let tk = kelvin_from_celsius(temperature);
        let density = table.liquid_density(&liquid, temperature);
        let liquid_volume = liquid_total / density;
        let vapor_volume = volume - liquid_volume;

        let mut partial_pressure = [0.0; NC];
        for (p, n) in partial_pressure.iter_mut().zip(vapor_holdup_in) {
            *p = n * GAS_CONSTANT * tk / vapor_volume;
        }
        for c in Component::CONDENSIBLE {
            partial_pressure[c.index()] = table.vapor_pressure(c, temperature) * liquid[c];
        }
        let (vapor, pressure) = MoleFractions::from_amounts(&partial_pressure);

        let moles_per_pressure = vapor_volume / (GAS_CONSTANT * tk);
        let vapor_total = pressure * moles_per_pressure;
        let mut vapor_holdup = [0.0; NC];
        for (i, n) in vapor_holdup.iter_mut().enumerate() {
            *n = match vapor_holdup_in.get(i) {
                Some(held) => *held,
                None => partial_pressure[i] * moles_per_pressure,
            };
        }

        Self {
            liquid,
            liquid_total,
            temperature,
            converged: solve.converged,
            density,
            liquid_volume,
            vapor_volume,
            partial_pressure,
            pressure,
            vapor,
            vapor_holdup,
            vapor_total,
        }
    }
}

/// The stripper sump: liquid only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiquidPool {
    pub liquid: MoleFractions,
    pub temperature: f64,
    pub converged: bool,
    pub density: f64,
    pub volume: f64,
}

impl LiquidPool {
    pub fn evaluate(table: &PropertyTable, holdup: &[f64; NC], energy: f64, t_guess: f64) -> Self {
        let (liquid, total) = MoleFractions::from_amounts(holdup);
        let solve = table.temperature_from_enthalpy(&liquid, energy / total, Phase::Liquid, t_guess);
        let density = table.liquid_density(&liquid, solve.temperature);
        Self {
            liquid,
            temperature: solve.temperature,
            converged: solve.converged,
            density,
            volume: total / density,
        }
    }
}

/// The compressor discharge header: vapor only, energy held as internal
/// energy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasHeader {
    pub vapor: MoleFractions,
    pub temperature: f64,
    pub converged: bool,
    pub pressure: f64,
}

impl GasHeader {
    pub fn evaluate(
        table: &PropertyTable,
        holdup: &[f64; NC],
        energy: f64,
        volume: f64,
        t_guess: f64,
    ) -> Self {
        let (vapor, total) = MoleFractions::from_amounts(holdup);
        let solve =
            table.temperature_from_enthalpy(&vapor, energy / total, Phase::VaporCorrected, t_guess);
        let pressure = total * GAS_CONSTANT * kelvin_from_celsius(solve.temperature) / volume;
        Self {
            vapor,
            temperature: solve.temperature,
            converged: solve.converged,
            pressure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plant::layout::{
        HEADER_ENERGY, HEADER_VAPOR, NOMINAL_STATE, REACTOR_ENERGY, REACTOR_LIQUID, REACTOR_VAPOR,
        STRIPPER_ENERGY, STRIPPER_LIQUID, heavy_liquid, holdups,
    };

    fn reactor() -> TwoPhaseVessel {
        TwoPhaseVessel::evaluate(
            &PropertyTable::standard(),
            &NOMINAL_STATE[REACTOR_VAPOR],
            &heavy_liquid(&NOMINAL_STATE, REACTOR_LIQUID),
            NOMINAL_STATE[REACTOR_ENERGY],
            VesselVolumes::default().reactor,
            0.0,
        )
    }

    #[test]
    fn nominal_reactor_conditions() {
        let r = reactor();
        assert!(r.converged);
        assert!((r.temperature - 120.4).abs() < 0.5, "T = {}", r.temperature);
        // ~2705 kPa gauge
        let kpa = (r.pressure - 760.0) / 760.0 * 101.325;
        assert!((kpa - 2705.0).abs() < 5.0, "p = {kpa}");
        assert!(r.vapor_volume > 0.0 && r.liquid_volume > 0.0);
    }

    #[test]
    fn vapor_fractions_close() {
        let r = reactor();
        assert!((r.vapor.sum() - 1.0).abs() < 1e-12);
        assert!((r.liquid.sum() - 1.0).abs() < 1e-12);
        assert_eq!(r.liquid[Component::A], 0.0);
    }

    #[test]
    fn vapor_holdups_add_up_to_total() {
        let r = reactor();
        for (i, n) in NOMINAL_STATE[REACTOR_VAPOR].iter().enumerate() {
            assert_eq!(r.vapor_holdup[i], *n);
        }
        assert!(r.vapor_holdup.iter().all(|n| *n >= 0.0));
        let sum: f64 = r.vapor_holdup.iter().sum();
        assert!((sum - r.vapor_total).abs() < 1e-9 * r.vapor_total);
        let d = Component::D.index();
        assert!((r.vapor_holdup[d] - r.vapor_total * r.vapor[Component::D]).abs() < 1e-9);
    }

    #[test]
    fn warm_start_reaches_same_temperature() {
        let table = PropertyTable::standard();
        let h = holdups(&NOMINAL_STATE, STRIPPER_LIQUID);
        let cold = LiquidPool::evaluate(&table, &h, NOMINAL_STATE[STRIPPER_ENERGY], 0.0);
        let warm = LiquidPool::evaluate(&table, &h, NOMINAL_STATE[STRIPPER_ENERGY], 65.0);
        assert!((cold.temperature - warm.temperature).abs() < 1e-9);
        assert!((cold.temperature - 65.7).abs() < 1.0);
    }

    #[test]
    fn header_pressure_above_reactor() {
        let table = PropertyTable::standard();
        let header = GasHeader::evaluate(
            &table,
            &holdups(&NOMINAL_STATE, HEADER_VAPOR),
            NOMINAL_STATE[HEADER_ENERGY],
            VesselVolumes::default().header,
            0.0,
        );
        assert!(header.converged);
        assert!(header.pressure > reactor().pressure);
    }
}
