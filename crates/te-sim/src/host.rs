//! Host adapter: drive the plant from the fixed-step runner.
//!
//! Valve commands are held constant for the whole run. The plant is
//! evaluated once more at every accepted step to publish measurements, and
//! the run ends once a shutdown has latched past the start-up window.

use te_core::ensure_len;
use tracing::warn;

use crate::error::SimResult;
use crate::model::{StepControl, TransientModel};
use crate::plant::{N_INPUTS, N_MEASUREMENTS, TennesseeEastman, valve_positions};

/// Trips before this time do not stop the run (h).
pub const STARTUP_WINDOW: f64 = 0.1;

/// Measurements published at one accepted step.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSample {
    pub t: f64,
    pub measurements: [f64; N_MEASUREMENTS],
}

/// A plant with constant valve commands.
#[derive(Debug, Clone)]
pub struct PlantModel {
    plant: TennesseeEastman,
    inputs: [f64; N_INPUTS],
    record_every: usize,
    steps: usize,
    outputs: Vec<OutputSample>,
}

impl PlantModel {
    /// Wrap `plant`. Without `inputs` the commands equal the initial valve
    /// positions.
    pub fn new(plant: TennesseeEastman, inputs: Option<&[f64]>) -> SimResult<Self> {
        let mut model = Self {
            inputs: valve_positions(plant.initial_state()),
            plant,
            record_every: 1,
            steps: 0,
            outputs: Vec::new(),
        };
        if let Some(u) = inputs {
            model.set_inputs(u)?;
        }
        Ok(model)
    }

    /// Keep every `n`-th output sample (n = 0 is treated as 1).
    pub fn with_record_every(mut self, n: usize) -> Self {
        self.record_every = n.max(1);
        self
    }

    pub fn set_inputs(&mut self, inputs: &[f64]) -> SimResult<()> {
        ensure_len(inputs, N_INPUTS, "inputs")?;
        self.inputs.copy_from_slice(inputs);
        Ok(())
    }

    pub fn inputs(&self) -> &[f64; N_INPUTS] {
        &self.inputs
    }

    pub fn plant(&self) -> &TennesseeEastman {
        &self.plant
    }

    pub fn outputs(&self) -> &[OutputSample] {
        &self.outputs
    }

    pub fn into_outputs(self) -> Vec<OutputSample> {
        self.outputs
    }
}

impl TransientModel for PlantModel {
    type State = Vec<f64>;

    fn initial_state(&self) -> Vec<f64> {
        self.plant.initial_state().to_vec()
    }

    fn rhs(&mut self, t: f64, x: &Vec<f64>) -> SimResult<Vec<f64>> {
        let eval = self.plant.evaluate(t, x, &self.inputs)?;
        Ok(eval.derivatives.to_vec())
    }

    fn add(&self, a: &Vec<f64>, b: &Vec<f64>) -> Vec<f64> {
        a.iter().zip(b).map(|(x, y)| x + y).collect()
    }

    fn scale(&self, a: &Vec<f64>, scale: f64) -> Vec<f64> {
        a.iter().map(|x| x * scale).collect()
    }

    fn major_step(&mut self, t: f64, x: &Vec<f64>) -> SimResult<StepControl> {
        let eval = self.plant.evaluate(t, x, &self.inputs)?;
        let stop = eval.trip.filter(|_| t > STARTUP_WINDOW);

        if self.steps % self.record_every == 0 || stop.is_some() {
            self.outputs.push(OutputSample {
                t,
                measurements: self.plant.sample_outputs(),
            });
        }
        self.steps += 1;

        match stop {
            Some(trip) => {
                warn!(code = trip.code.code(), t, "{}", trip.message());
                Ok(StepControl::Stop)
            }
            None => Ok(StepControl::Continue),
        }
    }
}
