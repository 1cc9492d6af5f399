//! Host-supplied disturbance codes IDV(1..20).

use serde::{Deserialize, Serialize};

use crate::error::{DisturbanceError, DisturbanceResult};

/// Number of externally selectable disturbances.
pub const N_IDV: usize = 20;

/// Latched disturbance flags. Numbers are 1-based, matching IDV(n).
///
/// Hosts pass integer codes; any positive code switches the disturbance on,
/// everything else switches it off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisturbanceVector {
    active: [bool; N_IDV],
}

impl DisturbanceVector {
    /// All disturbances off.
    pub fn none() -> Self {
        Self::default()
    }

    /// Latch a 20-long vector of raw host codes.
    pub fn from_codes(codes: &[i32]) -> DisturbanceResult<Self> {
        if codes.len() != N_IDV {
            return Err(DisturbanceError::Length {
                expected: N_IDV,
                got: codes.len(),
            });
        }
        let mut active = [false; N_IDV];
        for (slot, &code) in active.iter_mut().zip(codes) {
            *slot = code > 0;
        }
        Ok(Self { active })
    }

    /// Switch on the listed IDV numbers.
    pub fn from_active(numbers: &[usize]) -> DisturbanceResult<Self> {
        let mut v = Self::none();
        for &n in numbers {
            v.set(n, true)?;
        }
        Ok(v)
    }

    pub fn set(&mut self, number: usize, on: bool) -> DisturbanceResult<()> {
        let slot = Self::slot(number)?;
        self.active[slot] = on;
        Ok(())
    }

    /// Unknown numbers read as inactive.
    pub fn is_active(&self, number: usize) -> bool {
        Self::slot(number).map(|i| self.active[i]).unwrap_or(false)
    }

    /// 0.0 or 1.0, for use as a multiplier.
    pub fn flag(&self, number: usize) -> f64 {
        if self.is_active(number) { 1.0 } else { 0.0 }
    }

    /// Active IDV numbers in ascending order.
    pub fn active(&self) -> Vec<usize> {
        (1..=N_IDV).filter(|&n| self.is_active(n)).collect()
    }

    /// Codes in host form (1 or 0).
    pub fn to_codes(&self) -> [i32; N_IDV] {
        self.active.map(i32::from)
    }

    fn slot(number: usize) -> DisturbanceResult<usize> {
        if (1..=N_IDV).contains(&number) {
            Ok(number - 1)
        } else {
            Err(DisturbanceError::UnknownDisturbance { number })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_codes_latch_to_one() {
        let mut codes = [0i32; N_IDV];
        codes[0] = 7;
        codes[5] = -3;
        codes[19] = 1;
        let v = DisturbanceVector::from_codes(&codes).unwrap();
        assert!(v.is_active(1));
        assert!(!v.is_active(6));
        assert!(v.is_active(20));
        assert_eq!(v.active(), vec![1, 20]);
        assert_eq!(v.to_codes()[0], 1);
        assert_eq!(v.flag(20), 1.0);
        assert_eq!(v.flag(2), 0.0);
    }

    #[test]
    fn wrong_length_rejected() {
        let err = DisturbanceVector::from_codes(&[0; 21]).unwrap_err();
        assert_eq!(
            err,
            DisturbanceError::Length {
                expected: 20,
                got: 21
            }
        );
    }

    #[test]
    fn out_of_range_numbers() {
        assert!(DisturbanceVector::from_active(&[0]).is_err());
        assert!(DisturbanceVector::from_active(&[21]).is_err());
        assert!(!DisturbanceVector::none().is_active(21));
        let v = DisturbanceVector::from_active(&[3, 14]).unwrap();
        assert_eq!(v.active(), vec![3, 14]);
    }
}
