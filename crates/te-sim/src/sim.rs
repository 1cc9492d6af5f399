//! Simulation runner and result recording.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{SimError, SimResult};
use crate::integrator::{ForwardEuler, Integrator, RK4};
use crate::model::{StepControl, TransientModel};

/// Integrator selection for simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorType {
    /// 4th-order Runge-Kutta (default, 4 rhs calls per step).
    #[default]
    RK4,
    /// Forward Euler (1st-order, 1 rhs call per step).
    ForwardEuler,
}

/// Options for simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Fixed time step (h)
    pub dt: f64,
    /// Final simulation time (h)
    pub t_end: f64,
    /// Maximum number of steps (safety limit)
    pub max_steps: usize,
    /// Record every N-th step (decimation)
    pub record_every: usize,
    pub integrator: IntegratorType,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            // 1.8 s
            dt: 5e-4,
            t_end: 1.0,
            max_steps: 1_000_000,
            record_every: 20,
            integrator: IntegratorType::default(),
        }
    }
}

impl SimOptions {
    pub fn validate(&self) -> SimResult<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SimError::InvalidArg {
                what: "dt must be positive",
            });
        }
        if !(self.t_end.is_finite() && self.t_end >= 0.0) {
            return Err(SimError::InvalidArg {
                what: "t_end must be non-negative",
            });
        }
        if self.max_steps == 0 {
            return Err(SimError::InvalidArg {
                what: "max_steps must be positive",
            });
        }
        if self.record_every == 0 {
            return Err(SimError::InvalidArg {
                what: "record_every must be positive",
            });
        }
        Ok(())
    }
}

/// Record of simulation results.
#[derive(Clone, Debug)]
pub struct SimRecord<S> {
    /// Time points (h)
    pub t: Vec<f64>,
    /// State snapshots
    pub x: Vec<S>,
    /// Time at which the model requested a stop, if it did.
    pub stopped_at: Option<f64>,
}

/// Run a fixed-step transient simulation.
///
/// The model's [`TransientModel::major_step`] hook runs at every accepted
/// time, including t = 0 and the final time; a stop request ends the run
/// after recording the current state.
pub fn run_sim<M: TransientModel>(
    model: &mut M,
    opts: &SimOptions,
) -> SimResult<SimRecord<M::State>> {
    opts.validate()?;
    info!(
        dt = opts.dt,
        t_end = opts.t_end,
        integrator = ?opts.integrator,
        "starting run"
    );

    let mut t = 0.0;
    let mut x = model.initial_state();
    let mut t_record = vec![t];
    let mut x_record = vec![x.clone()];
    let mut stopped_at = None;

    let mut step = 0;
    loop {
        if model.major_step(t, &x)? == StepControl::Stop {
            info!(t, "model requested stop");
            stopped_at = Some(t);
            break;
        }
        if t >= opts.t_end || step >= opts.max_steps {
            break;
        }

        x = match opts.integrator {
            IntegratorType::RK4 => RK4.step(model, t, &x, opts.dt)?,
            IntegratorType::ForwardEuler => ForwardEuler.step(model, t, &x, opts.dt)?,
        };
        step += 1;
        // Multiply instead of accumulating so long runs land on t_end.
        t = step as f64 * opts.dt;

        if step % opts.record_every == 0 {
            t_record.push(t);
            x_record.push(x.clone());
        }
    }

    // Always record final state
    if t_record.last() != Some(&t) {
        t_record.push(t);
        x_record.push(x);
    }

    info!(t, steps = step, stopped = stopped_at.is_some(), "run finished");
    Ok(SimRecord {
        t: t_record,
        x: x_record,
        stopped_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ramp {
        stop_after: Option<f64>,
    }

    impl TransientModel for Ramp {
        type State = f64;

        fn initial_state(&self) -> f64 {
            0.0
        }

        fn rhs(&mut self, _t: f64, _x: &f64) -> SimResult<f64> {
            Ok(1.0)
        }

        fn add(&self, a: &f64, b: &f64) -> f64 {
            a + b
        }

        fn scale(&self, a: &f64, scale: f64) -> f64 {
            a * scale
        }

        fn major_step(&mut self, t: f64, _x: &f64) -> SimResult<StepControl> {
            match self.stop_after {
                Some(ts) if t > ts => Ok(StepControl::Stop),
                _ => Ok(StepControl::Continue),
            }
        }
    }

    #[test]
    fn sim_options_defaults() {
        let opts = SimOptions::default();
        assert_eq!(opts.dt, 5e-4);
        assert_eq!(opts.t_end, 1.0);
        assert_eq!(opts.record_every, 20);
        assert_eq!(opts.integrator, IntegratorType::RK4);
    }

    #[test]
    fn sim_options_invalid() {
        let opts = SimOptions {
            dt: 0.0,
            ..SimOptions::default()
        };
        assert!(run_sim(&mut Ramp { stop_after: None }, &opts).is_err());
        let opts = SimOptions {
            record_every: 0,
            ..SimOptions::default()
        };
        assert!(opts.validate().is_err());
    }

    #[test]
    fn runs_to_end_and_records_final() {
        let opts = SimOptions {
            dt: 0.1,
            t_end: 1.0,
            max_steps: 100,
            record_every: 3,
            integrator: IntegratorType::ForwardEuler,
        };
        let rec = run_sim(&mut Ramp { stop_after: None }, &opts).unwrap();
        assert_eq!(rec.stopped_at, None);
        assert_eq!(*rec.t.last().unwrap(), 1.0);
        assert!((rec.x.last().unwrap() - 1.0).abs() < 1e-12);
        // 0, 0.3, 0.6, 0.9, 1.0
        assert_eq!(rec.t.len(), 5);
    }

    #[test]
    fn stop_request_ends_run() {
        let opts = SimOptions {
            dt: 0.1,
            t_end: 5.0,
            max_steps: 100,
            record_every: 1,
            integrator: IntegratorType::RK4,
        };
        let rec = run_sim(&mut Ramp { stop_after: Some(0.25) }, &opts).unwrap();
        let stop = rec.stopped_at.unwrap();
        assert!((stop - 0.3).abs() < 1e-12);
        assert_eq!(*rec.t.last().unwrap(), stop);
    }
}
