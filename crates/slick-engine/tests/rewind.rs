//! Integration test: a failed step poisons the model until rewound, and
//! a rewound run replays deterministically.

use slick_core::{ModelTime, StepError, SubstanceId, WeatheringError};
use slick_engine::{ModelConfig, WeatheringModel};
use slick_test_utils::{fixtures, FailingWeatherer, FixedFractionWeatherer, MockEnvironment};
use slick_weatherers::Dissolution;

fn model() -> WeatheringModel {
    WeatheringModel::new(ModelConfig {
        weatherers: vec![
            Box::new(Dissolution::new()),
            Box::new(FailingWeatherer::new("flaky", 3)),
        ],
        environment: Some(Box::new(MockEnvironment::steady())),
        substances: vec![fixtures::scenario_substance()],
        ..ModelConfig::default()
    })
    .unwrap()
}

#[test]
fn failure_surfaces_process_name_and_blocks_until_rewind() {
    let mut model = model();
    model.prepare_run();
    model
        .release(&fixtures::release(SubstanceId(0), 3, 30.0))
        .unwrap();

    let err = model.run_to_end().unwrap_err();
    match err {
        StepError::ProcessFailed { name, reason } => {
            assert_eq!(name, "flaky");
            assert!(matches!(reason, WeatheringError::ExecutionFailed { .. }));
        }
        other => panic!("expected ProcessFailed, got {other:?}"),
    }
    assert!(model.needs_rewind());
    assert_eq!(model.current_step().0, 3);
    assert_eq!(
        model.prepare_step(900.0, model.model_time()),
        Err(StepError::RewindRequired)
    );

    model.prepare_run();
    assert_eq!(model.store().num_elements(), 0);
    assert_eq!(model.model_time(), ModelTime::ZERO);
    assert_eq!(model.ledger().total_losses(), 0.0);
}

#[test]
fn rewound_run_replays_identically() {
    let build = || {
        WeatheringModel::new(ModelConfig {
            weatherers: vec![
                Box::new(FixedFractionWeatherer::new("sink", 0.05)),
                Box::new(Dissolution::new()),
            ],
            environment: Some(Box::new(MockEnvironment::steady())),
            substances: vec![fixtures::scenario_substance()],
            duration: 4.0 * 3600.0,
            ..ModelConfig::default()
        })
        .unwrap()
    };
    let mut model = build();

    let run = |model: &mut WeatheringModel| {
        model.prepare_run();
        model
            .release(&fixtures::release(SubstanceId(0), 4, 400.0))
            .unwrap();
        model.run_to_end().unwrap();
        (
            model.store().batch(SubstanceId(0)).cloned(),
            model.ledger().total_losses(),
        )
    };
    let first = run(&mut model);
    let second = run(&mut model);
    assert_eq!(first, second);
}
