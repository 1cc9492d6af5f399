//! Plant behaviour through the public API.

mod common;

use common::{NO_IDV, nominal_plant, swollen_reactor};
use proptest::prelude::*;
use te_sim::plant::measurements::FEED_ANALYZER;
use te_sim::plant::valve_positions;
use te_sim::{PlantConfig, TennesseeEastman, TripCode};

#[test]
fn default_start_matches_base_case() {
    let plant = nominal_plant();
    let xmeas = plant.sample_outputs();
    assert!(plant.is_tripped().is_none());
    assert!((xmeas[6] - 2705.0).abs() < 5.0, "reactor pressure {}", xmeas[6]);
    assert!((xmeas[7] - 75.0).abs() < 2.0, "reactor level {}", xmeas[7]);
    // Analyzers start at the true composition.
    let feed_a = plant.last_streams()[te_sim::plant::Stream::ReactorInlet].x[0] * 100.0;
    assert_eq!(xmeas[FEED_ANALYZER.start], feed_a);
}

#[test]
fn fresh_instances_agree() {
    let mut a = nominal_plant();
    let mut b = nominal_plant();
    let x0 = *a.initial_state();
    let u0 = valve_positions(&x0);

    let ea = a.evaluate(0.0, &x0, &u0).unwrap();
    let eb = b.evaluate(0.0, &x0, &u0).unwrap();
    assert_eq!(ea, eb);

    for t in [0.05, 0.1, 0.2, 0.35] {
        let ea = a.evaluate(t, &x0, &u0).unwrap();
        let eb = b.evaluate(t, &x0, &u0).unwrap();
        assert_eq!(ea.derivatives, eb.derivatives);
        assert_eq!(a.sample_outputs(), b.sample_outputs());
    }
}

#[test]
fn seed_changes_noise() {
    let mut a = nominal_plant();
    let mut b =
        TennesseeEastman::initialize(PlantConfig::with_seed(12345), None, &NO_IDV).unwrap();
    let x0 = *a.initial_state();
    let u0 = valve_positions(&x0);
    a.evaluate(0.01, &x0, &u0).unwrap();
    b.evaluate(0.01, &x0, &u0).unwrap();
    assert_ne!(a.sample_outputs()[0], b.sample_outputs()[0]);
}

#[test]
fn stream_fractions_close() {
    let mut plant = nominal_plant();
    assert!(plant.last_streams().max_closure_error() < 1e-9);

    let mut codes = NO_IDV;
    codes[7] = 1;
    plant.set_disturbances(&codes).unwrap();
    let x0 = *plant.initial_state();
    let u0 = valve_positions(&x0);
    for t in [0.1, 0.5, 1.0, 2.0] {
        plant.evaluate(t, &x0, &u0).unwrap();
        assert!(plant.last_streams().max_closure_error() < 1e-9, "t = {t}");
    }
}

/// Feed upsets, the A feed loss, kinetics drift and the three pulse channels.
const COMBINED_UPSETS: [usize; 6] = [1, 6, 13, 17, 18, 20];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn streams_close_under_combined_disturbances(
        seed in 1u32..u32::MAX,
        mask in 1u8..64,
        dt in 0.01..0.2f64,
    ) {
        let mut codes = NO_IDV;
        for (bit, idv) in COMBINED_UPSETS.iter().enumerate() {
            if mask & (1 << bit) != 0 {
                codes[idv - 1] = 1;
            }
        }
        let mut plant =
            TennesseeEastman::initialize(PlantConfig::with_seed(seed), None, &codes).unwrap();
        let x0 = *plant.initial_state();
        let u0 = valve_positions(&x0);
        let mut t = 0.0;
        while t < 3.0 {
            t += dt;
            let eval = plant.evaluate(t, &x0, &u0).unwrap();
            prop_assert!(eval.derivatives.iter().all(|d| d.is_finite()), "t = {}", t);
            let closure = plant.last_streams().max_closure_error();
            prop_assert!(closure < 1e-9, "t = {}: closure {}", t, closure);
        }
    }
}

#[test]
fn commands_are_clamped() {
    let mut plant = nominal_plant();
    let x0 = *plant.initial_state();
    let mut u = valve_positions(&x0);
    u[0] = -50.0;
    u[1] = 500.0;
    plant.evaluate(0.0, &x0, &u).unwrap();
    let applied = plant.applied_commands();
    assert_eq!(applied[0], 0.0);
    assert_eq!(applied[1], 100.0);

    plant.evaluate(0.01, &x0, &u).unwrap();
    assert_eq!(plant.applied_commands()[0], 0.0);
    assert_eq!(plant.applied_commands()[1], 100.0);
}

#[test]
fn high_reactor_level_trips() {
    let y = swollen_reactor(1.5);
    let plant = TennesseeEastman::initialize(PlantConfig::default(), Some(&y), &NO_IDV).unwrap();
    let trip = plant.is_tripped().unwrap();
    assert_eq!(trip.code, TripCode::HighReactorLevel);
    assert_eq!(trip.code.code(), 2);
    assert!(trip.message().contains("High Reactor Liquid Level"));
    // Pressure is unchanged by the swelling, so the level check fires first.
    assert!(plant.sample_outputs()[6] < 3000.0);
}

#[test]
fn trip_freezes_the_state() {
    let y = swollen_reactor(1.5);
    let mut plant =
        TennesseeEastman::initialize(PlantConfig::default(), Some(&y), &NO_IDV).unwrap();
    let u = valve_positions(&y);
    for t in [0.1, 0.2, 0.3, 1.0] {
        let eval = plant.evaluate(t, &y, &u).unwrap();
        assert!(eval.derivatives.iter().all(|d| *d == 0.0), "t = {t}");
        assert_eq!(eval.trip.map(|tr| tr.code), Some(TripCode::HighReactorLevel));
        assert_eq!(eval.trip.map(|tr| tr.time), Some(0.0));
    }

    // A healthy state does not clear the latch.
    let nominal = *nominal_plant().initial_state();
    let eval = plant.evaluate(1.5, &nominal, &u).unwrap();
    assert!(eval.trip.is_some());
    assert!(eval.derivatives.iter().all(|d| *d == 0.0));

    plant.reinitialize(None, &NO_IDV).unwrap();
    assert!(plant.is_tripped().is_none());
}
