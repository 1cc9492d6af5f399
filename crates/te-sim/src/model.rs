//! The interface between a dynamic model and the fixed-step runner.

use crate::error::SimResult;

/// What the host should do after a major step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepControl {
    Continue,
    /// The model asks the host to end the run at the current time.
    Stop,
}

/// A system `dx/dt = f(t, x)` with vector-space arithmetic on its state.
pub trait TransientModel {
    /// State type (must be Clone).
    type State: Clone;

    /// Return the initial state at t=0.
    fn initial_state(&self) -> Self::State;

    /// Compute state derivative dxdt = f(t, x).
    ///
    /// Takes &mut self because models may carry state between calls (random
    /// sequences, sample-and-hold instruments, last temperature estimates).
    fn rhs(&mut self, t: f64, x: &Self::State) -> SimResult<Self::State>;

    /// Add two states element-wise: result = a + b.
    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State;

    /// Scale a state by a scalar: result = scale * a.
    fn scale(&self, a: &Self::State, scale: f64) -> Self::State;

    /// Called once per major step, at the accepted state, before the next
    /// integration step. Models publish outputs here and may request a stop.
    fn major_step(&mut self, _t: f64, _x: &Self::State) -> SimResult<StepControl> {
        Ok(StepControl::Continue)
    }
}
