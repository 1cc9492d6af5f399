//! Mole-fraction vectors.

use crate::component::{Component, NC};
use crate::error::{ThermoError, ThermoResult};
use crate::table::PropertyTable;
use std::ops::Index;
use te_core::numeric::{Tolerances, nearly_equal};

/// Mole fractions of the eight components.
///
/// Fractions are produced by dividing component amounts by their total, so they
/// sum to one by construction. Nothing renormalizes them afterwards: a drifting
/// sum points at a balance error upstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoleFractions([f64; NC]);

impl MoleFractions {
    /// Validate a literal composition: finite, non-negative and summing to one.
    pub fn new(values: [f64; NC]) -> ThermoResult<Self> {
        let mut sum = 0.0;
        for v in values {
            if !v.is_finite() {
                return Err(ThermoError::NonPhysical {
                    what: "non-finite mole fraction",
                });
            }
            if v < 0.0 {
                return Err(ThermoError::NonPhysical {
                    what: "negative mole fraction",
                });
            }
            sum += v;
        }
        let tol = Tolerances {
            abs: 1e-9,
            rel: 1e-9,
        };
        if !nearly_equal(sum, 1.0, tol) {
            return Err(ThermoError::NonPhysical {
                what: "mole fractions do not sum to one",
            });
        }
        Ok(Self(values))
    }

    /// Wrap fractions the caller has already built to sum to one.
    pub const fn from_raw(values: [f64; NC]) -> Self {
        Self(values)
    }

    /// Fractions and total from component amounts (holdups, flows or partial
    /// pressures). A zero total yields non-finite fractions, as the model would.
    pub fn from_amounts(amounts: &[f64; NC]) -> (Self, f64) {
        let total: f64 = amounts.iter().sum();
        let mut x = [0.0; NC];
        for (xi, ai) in x.iter_mut().zip(amounts) {
            *xi = ai / total;
        }
        (Self(x), total)
    }

    pub fn get(&self, c: Component) -> f64 {
        self.0[c.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Component, f64)> + '_ {
        Component::ALL.iter().copied().zip(self.0.iter().copied())
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Component amounts for a given total (e.g. component flows of a stream).
    pub fn scaled(&self, total: f64) -> [f64; NC] {
        let mut out = [0.0; NC];
        for (o, x) in out.iter_mut().zip(self.0) {
            *o = x * total;
        }
        out
    }

    /// Mean molar mass [kg/kmol]: M_mix = Σ x_i M_i.
    pub fn molar_mass(&self, table: &PropertyTable) -> f64 {
        self.0
            .iter()
            .zip(table.molar_mass)
            .map(|(x, mw)| x * mw)
            .sum()
    }
}

impl Index<Component> for MoleFractions {
    type Output = f64;

    fn index(&self, c: Component) -> &f64 {
        &self.0[c.index()]
    }
}

impl Index<usize> for MoleFractions {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_to_fractions() {
        let (x, total) = MoleFractions::from_amounts(&[1.0, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0, 4.0]);
        assert_eq!(total, 8.0);
        assert_eq!(x[Component::A], 0.125);
        assert_eq!(x[Component::B], 0.375);
        assert_eq!(x[Component::H], 0.5);
    }

    #[test]
    fn literal_composition_must_sum_to_one() {
        assert!(MoleFractions::new([0.5, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]).is_ok());
        assert!(MoleFractions::new([0.5, 0.4, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]).is_err());
        assert!(MoleFractions::new([1.5, -0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]).is_err());
        assert!(MoleFractions::new([f64::NAN, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]).is_err());
    }

    #[test]
    fn molar_mass_of_pure_d() {
        let table = PropertyTable::standard();
        let x = MoleFractions::from_raw([0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(x.molar_mass(&table), 32.0);
    }

    #[test]
    fn scaled_recovers_amounts() {
        let amounts = [2.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let (x, total) = MoleFractions::from_amounts(&amounts);
        let back = x.scaled(total);
        for (a, b) in amounts.iter().zip(back) {
            assert!((a - b).abs() < 1e-12);
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn holdup_fractions_sum_to_one(amounts in prop::array::uniform8(0.0_f64..500.0)) {
            prop_assume!(amounts.iter().sum::<f64>() > 1e-6);
            let (x, _) = MoleFractions::from_amounts(&amounts);
            let tol = Tolerances { abs: 1e-9, rel: 1e-9 };
            prop_assert!(nearly_equal(x.sum(), 1.0, tol));
        }
    }
}
