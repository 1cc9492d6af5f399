//! Fixed-step runs of the plant through the host adapter.

mod common;

use common::{NO_IDV, nominal_plant, swollen_reactor};
use te_sim::{
    IntegratorType, PlantConfig, PlantModel, SimOptions, TennesseeEastman, run_sim,
};

#[test]
fn short_open_loop_run_stays_near_base_case() {
    let mut model = PlantModel::new(nominal_plant(), None)
        .unwrap()
        .with_record_every(20);
    let opts = SimOptions {
        dt: 5e-4,
        t_end: 0.05,
        max_steps: 1000,
        record_every: 20,
        integrator: IntegratorType::RK4,
    };
    let rec = run_sim(&mut model, &opts).unwrap();
    assert_eq!(rec.stopped_at, None);
    assert!((rec.t.last().unwrap() - 0.05).abs() < 1e-12);
    assert!(model.plant().is_tripped().is_none());

    let last = model.outputs().last().unwrap();
    assert!((last.measurements[6] - 2705.0).abs() < 50.0);
    assert!(rec.x.last().unwrap().iter().all(|v| v.is_finite()));
    // One sample per 20 steps: t = 0, 0.01, ..., 0.05.
    assert_eq!(model.outputs().len(), 6);
}

#[test]
fn run_stops_after_startup_window_on_trip() {
    let y = swollen_reactor(1.5);
    let plant = TennesseeEastman::initialize(PlantConfig::default(), Some(&y), &NO_IDV).unwrap();
    let mut model = PlantModel::new(plant, None).unwrap();
    let opts = SimOptions {
        dt: 5e-4,
        t_end: 1.0,
        max_steps: 10_000,
        record_every: 1,
        integrator: IntegratorType::RK4,
    };
    let rec = run_sim(&mut model, &opts).unwrap();

    let stop = rec.stopped_at.unwrap();
    assert!((0.1..0.1 + 2.0 * opts.dt).contains(&stop), "stopped at {stop}");
    // Only the first step, which starts at t = 0, moves the state.
    assert_eq!(rec.x[1], *rec.x.last().unwrap());
    assert!(model.plant().is_tripped().is_some());
    let samples = model.into_outputs();
    assert_eq!(samples.len(), rec.t.len());
    assert_eq!(samples.last().unwrap().t, stop);
}

#[test]
fn wrong_input_length_is_rejected() {
    assert!(PlantModel::new(nominal_plant(), Some(&[50.0; 5])).is_err());
}
