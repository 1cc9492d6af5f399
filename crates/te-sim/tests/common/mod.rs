//! Shared fixtures for the plant integration tests.

use te_sim::plant::layout::{REACTOR_ENERGY, REACTOR_LIQUID, REACTOR_VAPOR, heavy_liquid};
use te_sim::plant::vessels::TwoPhaseVessel;
use te_sim::{N_STATES, PlantConfig, TennesseeEastman, plant::NOMINAL_STATE};

pub const NO_IDV: [i32; 20] = [0; 20];

pub fn nominal_plant() -> TennesseeEastman {
    TennesseeEastman::initialize(PlantConfig::default(), None, &NO_IDV).unwrap()
}

/// Nominal state with `factor` times the reactor liquid, at unchanged
/// temperature and pressure.
pub fn swollen_reactor(factor: f64) -> [f64; N_STATES] {
    let config = PlantConfig::default();
    let before = TwoPhaseVessel::evaluate(
        &config.properties,
        &NOMINAL_STATE[REACTOR_VAPOR],
        &heavy_liquid(&NOMINAL_STATE, REACTOR_LIQUID),
        NOMINAL_STATE[REACTOR_ENERGY],
        config.volumes.reactor,
        0.0,
    );
    let total = config.volumes.reactor;
    let vapor_ratio = (total - factor * before.liquid_volume) / (total - before.liquid_volume);

    let mut y = NOMINAL_STATE;
    for v in &mut y[REACTOR_LIQUID] {
        *v *= factor;
    }
    y[REACTOR_ENERGY] *= factor;
    for v in &mut y[REACTOR_VAPOR] {
        *v *= vapor_ratio;
    }
    y
}
