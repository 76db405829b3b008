//! Integration test: under constant conditions dissolution removes mass
//! every step and its ledger entry never decreases.

use slick_core::{ModelTime, SubstanceId};
use slick_engine::{ModelConfig, WeatheringModel};
use slick_environment::water::Water;
use slick_environment::waves::Waves;
use slick_environment::wind::Wind;
use slick_environment::MarineConditions;
use slick_test_utils::fixtures;
use slick_weatherers::Dissolution;

#[test]
fn loss_is_monotonic_under_constant_conditions() {
    let sea = MarineConditions::new(
        "constant",
        Wind::constant(10.0).unwrap(),
        Waves::constant(1.5, 6.0).unwrap(),
        Water::default(),
    );
    let mut model = WeatheringModel::new(ModelConfig {
        weatherers: vec![Box::new(Dissolution::new())],
        environment: Some(Box::new(sea)),
        substances: vec![fixtures::scenario_substance()],
        time_step: 3600.0,
        duration: 48.0 * 3600.0,
        ..ModelConfig::default()
    })
    .unwrap();
    model.prepare_run();
    model
        .release(&fixtures::release(SubstanceId(0), 10, 1000.0))
        .unwrap();
    model.initialize_data().unwrap();

    let mut dissolved = 0.0;
    let mut floating = model.store().total_active_mass();
    let mut t = ModelTime::ZERO;
    while t < model.end_time() {
        model.prepare_step(3600.0, t).unwrap();
        let report = model.step().unwrap();
        assert!(report.deltas[Dissolution::NAME].total() > 0.0);

        let now_dissolved = model.ledger().process_total(Dissolution::NAME).unwrap();
        let now_floating = model.store().total_active_mass();
        assert!(now_dissolved > dissolved);
        assert!(now_floating < floating);
        dissolved = now_dissolved;
        floating = now_floating;
        t = t.advance(3600.0);
    }
}
