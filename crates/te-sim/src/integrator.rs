//! Fixed-step time integrators.

use crate::error::SimResult;
use crate::model::TransientModel;

/// One fixed step of size `dt` from `(t, x)`.
///
/// Every right-hand-side call advances the plant's walks and analyzers, so
/// integrators must call `rhs` with non-decreasing stage times.
pub trait Integrator {
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State>;
}

/// `x + h * k`
fn offset<M: TransientModel>(model: &M, x: &M::State, k: &M::State, h: f64) -> M::State {
    model.add(x, &model.scale(k, h))
}

/// Classical fourth-order Runge-Kutta: four derivative evaluations per step,
/// at `t`, twice at `t + dt/2`, and at `t + dt`.
#[derive(Clone, Copy, Debug)]
pub struct RK4;

impl Integrator for RK4 {
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        let half = 0.5 * dt;
        let k1 = model.rhs(t, x)?;
        let x2 = offset(model, x, &k1, half);
        let k2 = model.rhs(t + half, &x2)?;
        let x3 = offset(model, x, &k2, half);
        let k3 = model.rhs(t + half, &x3)?;
        let x4 = offset(model, x, &k3, dt);
        let k4 = model.rhs(t + dt, &x4)?;

        let inner = model.add(&k2, &k3);
        let outer = model.add(&k1, &k4);
        let slope = model.add(&outer, &model.scale(&inner, 2.0));
        Ok(offset(model, x, &slope, dt / 6.0))
    }
}

/// Explicit Euler, one derivative evaluation per step.
#[derive(Clone, Copy, Debug)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        let xdot = model.rhs(t, x)?;
        Ok(offset(model, x, &xdot, dt))
    }
}
