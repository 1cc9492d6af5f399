//! Pressure-driven flows and the stripper split.

use te_thermo::NC;

/// Header to reactor orifice coefficient.
pub const REACTOR_FEED_COEFF: f64 = 1937.6;
/// Reactor to separator orifice coefficient.
pub const EFFLUENT_COEFF: f64 = 4574.21;
/// Purge valve coefficient per % open.
pub const PURGE_COEFF: f64 = 0.151169;
/// Recycle bypass valve coefficient per % open.
pub const RECYCLE_BYPASS_COEFF: f64 = 53.349;
/// Atmospheric back pressure of the purge.
pub const PURGE_BACK_PRESSURE: f64 = 760.0;

/// Mass flow through a restriction: `coeff * sqrt(dp)`, zero for reverse
/// pressure difference.
#[inline]
pub fn orifice_mass_flow(dp: f64, coeff: f64) -> f64 {
    dp.max(0.0).sqrt() * coeff
}

/// Operating point of the recycle compressor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressorPoint {
    /// Net mass flow to the header after the bypass (kg/h).
    pub mass_flow: f64,
    /// Work added to the recycle stream.
    pub work: f64,
}

/// Recycle compressor with a cubic flow/pressure-ratio curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compressor {
    /// Flow at pressure ratio 1 (kg/h).
    pub max_flow: f64,
    /// Largest pressure ratio on the curve.
    pub max_ratio: f64,
}

impl Default for Compressor {
    fn default() -> Self {
        Self {
            max_flow: 280275.0,
            max_ratio: 1.3,
        }
    }
}

impl Compressor {
    /// Curve flow at a discharge/suction ratio, clamped to `[1, max_ratio]`.
    pub fn curve_flow(&self, ratio: f64) -> f64 {
        let pr = ratio.max(1.0).min(self.max_ratio);
        let coeff = self.max_flow / 1.197;
        self.max_flow + coeff * (1.0 - pr * pr * pr)
    }

    /// Evaluate between separator (`suction`) and header (`discharge`).
    ///
    /// `suction_temp` in deg C, `molar_mass` of the recycle gas,
    /// `bypass_pct` the recycle valve opening. The net flow is floored at
    /// 0.001 kg/h so the recycle enthalpy stays finite.
    pub fn evaluate(
        &self,
        suction: f64,
        discharge: f64,
        suction_temp: f64,
        molar_mass: f64,
        bypass_pct: f64,
    ) -> CompressorPoint {
        let curve = self.curve_flow(discharge / suction);
        let work = curve * (suction_temp + 273.15) * 1.8e-6 * 1.9872 * (discharge - suction)
            / (molar_mass * suction);
        let bypass = bypass_pct * orifice_mass_flow(discharge - suction, RECYCLE_BYPASS_COEFF);
        CompressorPoint {
            mass_flow: (curve - bypass).max(0.001),
            work,
        }
    }
}

/// Fraction of A..C fed to the stripper that leaves overhead.
const LIGHT_SPLIT: [f64; 3] = [0.995, 0.991, 0.99];
/// D..H overhead fraction when there is no stripping.
const IDLE_HEAVY_SPLIT: [f64; 5] = [0.9999, 0.999, 0.999, 0.99, 0.98];
/// Relative volatility of D..H in the stripper.
const HEAVY_VOLATILITY: [f64; 5] = [8.501, 11.402, 11.795, 0.048, 0.0242];

/// Overhead fraction per component.
///
/// With more than 0.1 kmol/h of underflow the heavy split follows a
/// vapor/liquid ratio set by the stripping feed and the stripper temperature.
pub fn stripper_split(stripping_feed: f64, underflow: f64, stripper_temp: f64) -> [f64; NC] {
    let mut split = [0.0; NC];
    split[..3].copy_from_slice(&LIGHT_SPLIT);
    if underflow > 0.1 {
        let tmpfac = if stripper_temp > 170.0 {
            stripper_temp - 120.262
        } else if stripper_temp < 5.292 {
            0.1
        } else {
            363.744 / (177.0 - stripper_temp) - 2.22579488
        };
        let vovrl = stripping_feed / underflow * tmpfac;
        for (s, k) in split[3..].iter_mut().zip(HEAVY_VOLATILITY) {
            *s = vovrl * k / (vovrl * k + 1.0);
        }
    } else {
        split[3..].copy_from_slice(&IDLE_HEAVY_SPLIT);
    }
    split
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_pressure_gives_no_flow() {
        assert_eq!(orifice_mass_flow(-10.0, 1937.6), 0.0);
        assert!((orifice_mass_flow(4.0, 1.5) - 3.0).abs() < 1e-15);
    }

    #[test]
    fn compressor_ratio_is_clamped() {
        let c = Compressor::default();
        assert_eq!(c.curve_flow(0.5), c.curve_flow(1.0));
        assert_eq!(c.curve_flow(2.0), c.curve_flow(1.3));
        assert_eq!(c.curve_flow(1.0), 280275.0);
        assert!(c.curve_flow(1.2) < c.curve_flow(1.1));
    }

    #[test]
    fn bypass_flow_is_floored() {
        let c = Compressor::default();
        let p = c.evaluate(2000.0, 3000.0, 80.0, 20.0, 100.0);
        assert_eq!(p.mass_flow, 0.001);
    }

    #[test]
    fn compressor_work_follows_pressure_rise() {
        let c = Compressor::default();
        let closed = c.evaluate(2000.0, 2200.0, 80.0, 20.0, 0.0);
        let open = c.evaluate(2000.0, 2200.0, 80.0, 20.0, 50.0);
        assert!(closed.work > 0.0);
        assert_eq!(closed.work, open.work);
        assert!(open.mass_flow < closed.mass_flow);
        assert_eq!(closed.mass_flow, c.curve_flow(1.1));
    }

    #[test]
    fn idle_stripper_uses_fixed_split() {
        let s = stripper_split(300.0, 0.05, 65.0);
        assert_eq!(s[3], 0.9999);
        assert_eq!(s[7], 0.98);
        assert_eq!(s[0], 0.995);
    }

    #[test]
    fn heavy_split_is_a_fraction() {
        for t in [0.0, 65.0, 176.0, 200.0] {
            let s = stripper_split(300.0, 250.0, t);
            for v in s {
                assert!(v > 0.0 && v < 1.0, "t = {t}, split = {v}");
            }
        }
    }
}
