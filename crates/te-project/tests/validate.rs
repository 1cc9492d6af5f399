use te_project::{DisturbancesDef, RunConfig, ValidationError, validate_run};

#[test]
fn rejects_short_initial_state() {
    let run = RunConfig {
        initial_state: Some(vec![1.0; 49]),
        ..RunConfig::default()
    };
    assert!(matches!(
        validate_run(&run),
        Err(ValidationError::Length { expected: 50, got: 49, .. })
    ));
}

#[test]
fn rejects_non_finite_inputs() {
    let mut inputs = vec![50.0; 12];
    inputs[3] = f64::INFINITY;
    let run = RunConfig {
        inputs: Some(inputs),
        ..RunConfig::default()
    };
    let err = validate_run(&run).unwrap_err();
    assert!(err.to_string().contains("inputs[3]"));
}

#[test]
fn rejects_unknown_disturbance() {
    let run = RunConfig {
        disturbances: DisturbancesDef::Active(vec![3, 21]),
        ..RunConfig::default()
    };
    assert!(matches!(
        validate_run(&run),
        Err(ValidationError::UnknownDisturbance { number: 21, .. })
    ));
    assert!(run.disturbance_codes().is_err());
}

#[test]
fn rejects_short_code_vector() {
    let run = RunConfig {
        disturbances: DisturbancesDef::Codes(vec![1; 19]),
        ..RunConfig::default()
    };
    assert!(matches!(
        validate_run(&run),
        Err(ValidationError::Length { expected: 20, .. })
    ));
}

#[test]
fn rejects_bad_timing() {
    for run in [
        RunConfig {
            dt_hours: 0.0,
            ..RunConfig::default()
        },
        RunConfig {
            t_end_hours: f64::NAN,
            ..RunConfig::default()
        },
        RunConfig {
            record_every: 0,
            ..RunConfig::default()
        },
        RunConfig {
            seed: Some(0),
            ..RunConfig::default()
        },
    ] {
        assert!(validate_run(&run).is_err(), "{run:?}");
    }
}

#[test]
fn extra_disturbances_merge() {
    let mut run = RunConfig {
        disturbances: DisturbancesDef::Codes({
            let mut c = vec![0; 20];
            c[0] = 1;
            c
        }),
        ..RunConfig::default()
    };
    run.add_disturbances(&[8, 1]);
    assert_eq!(run.disturbances, DisturbancesDef::Active(vec![1, 8]));
}
