//! Valve dynamics.
//!
//! Every manipulated variable drives a valve whose stem follows the applied
//! command through a first-order lag. The applied command itself is a sticky
//! copy of the host's command: with stiction enabled it only moves once the
//! command has drifted more than the deadband away from it.

use serde::{Deserialize, Serialize};
use uom::si::f64::Time;
use uom::si::time::{hour, second};

use crate::error::{ControlError, ControlResult};

/// Fully closed, % of span.
pub const VALVE_MIN: f64 = 0.0;
/// Fully open, % of span.
pub const VALVE_MAX: f64 = 100.0;

/// One valve channel.
///
/// Dynamics: `dpos/dt = (applied - pos) / tau`, with `tau` in hours and
/// `applied` clamped to `[VALVE_MIN, VALVE_MAX]`.
///
/// # Example
///
/// ```
/// use te_controls::ValveActuator;
///
/// let mut valve = ValveActuator::from_seconds(8.0, 2.0).unwrap();
/// valve.update_commanded(150.0, true);
/// assert_eq!(valve.applied(), 100.0);
/// assert!(valve.dpdt(40.0) > 0.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValveActuator {
    /// Time constant (h), must be positive
    pub tau: f64,
    /// Stiction band (% of span) when stiction is enabled
    pub deadband: f64,
    /// 0 disables stiction, 1 enables it
    multiplier: f64,
    applied: f64,
}

impl ValveActuator {
    /// Create a valve with time constant `tau` in hours.
    ///
    /// # Errors
    ///
    /// Returns error if `tau` is not positive or `deadband` is negative.
    pub fn new(tau: f64, deadband: f64) -> ControlResult<Self> {
        if !(tau.is_finite() && tau > 0.0) {
            return Err(ControlError::InvalidArg {
                what: "tau must be positive",
            });
        }
        if !(deadband.is_finite() && deadband >= 0.0) {
            return Err(ControlError::InvalidArg {
                what: "deadband must be non-negative",
            });
        }
        Ok(Self {
            tau,
            deadband,
            multiplier: 0.0,
            applied: VALVE_MIN,
        })
    }

    /// Create a valve with the time constant given in seconds.
    pub fn from_seconds(tau_seconds: f64, deadband: f64) -> ControlResult<Self> {
        Self::new(Time::new::<second>(tau_seconds).get::<hour>(), deadband)
    }

    /// Enable or disable stiction.
    pub fn set_stiction(&mut self, enabled: bool) {
        self.multiplier = if enabled { 1.0 } else { 0.0 };
    }

    /// Effective deadband after the stiction multiplier.
    pub fn effective_deadband(&self) -> f64 {
        self.deadband * self.multiplier
    }

    /// Last applied command (% of span).
    pub fn applied(&self) -> f64 {
        self.applied
    }

    /// Accept a new host command.
    ///
    /// On `initial`, or when the command has moved beyond the effective
    /// deadband, the applied command snaps to it; otherwise it holds. The
    /// result is clamped to the valve span and returned.
    pub fn update_commanded(&mut self, commanded: f64, initial: bool) -> f64 {
        if initial || (self.applied - commanded).abs() > self.effective_deadband() {
            self.applied = commanded;
        }
        self.applied = self.applied.clamp(VALVE_MIN, VALVE_MAX);
        self.applied
    }

    /// Stem velocity given the current filtered position.
    pub fn dpdt(&self, position: f64) -> f64 {
        (self.applied - position) / self.tau
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn applied_stays_within_span(
            cmds in proptest::collection::vec(-1000.0f64..1000.0, 1..50),
            stiction in any::<bool>(),
        ) {
            let mut v = ValveActuator::new(0.01, 2.0).unwrap();
            v.set_stiction(stiction);
            for (i, c) in cmds.iter().enumerate() {
                let a = v.update_commanded(*c, i == 0);
                prop_assert!((VALVE_MIN..=VALVE_MAX).contains(&a));
            }
        }
    }
}
