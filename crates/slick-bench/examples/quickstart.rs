//! End-to-end weathering run.
//!
//! Demonstrates: environment record → ModelConfig → WeatheringModel →
//! staggered releases → step → mass-balance report → rewind → replay.
//!
//! Run with `RUST_LOG=slick_engine=info,slick_weatherers=debug` for
//! per-substance detail.

use serde_json::json;
use slick_core::{Component, ComponentKind, ModelTime, SpillId, Substance, SubstanceId};
use slick_elements::Release;
use slick_engine::{ModelConfig, WeatheringModel};
use slick_environment::{EnvironmentKind, EnvironmentRecord, EnvironmentRegistry};
use slick_weatherers::Dissolution;
use tracing_subscriber::EnvFilter;

fn light_crude() -> Substance {
    Substance::new(
        "light crude",
        vec![
            Component::new(ComponentKind::Saturates, 240.0, 820.0, 0.55),
            Component::new(ComponentKind::Aromatics, 128.0, 1025.0, 0.05),
            Component::new(ComponentKind::Aromatics, 178.0, 1080.0, 0.15),
            Component::new(ComponentKind::Resins, 500.0, 950.0, 0.15),
            Component::new(ComponentKind::Asphaltenes, 800.0, 1050.0, 0.10),
        ],
    )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Slick Quickstart ===\n");

    let record = EnvironmentRecord {
        kind: EnvironmentKind::ConstantConditions,
        params: json!({ "name": "north sea", "wind_speed": 12.0 }),
    };
    let config = ModelConfig {
        weatherers: vec![Box::new(Dissolution::new())],
        substances: vec![light_crude()],
        time_step: 900.0,
        duration: 12.0 * 3600.0,
        ..ModelConfig::default()
    }
    .with_environment_record(&EnvironmentRegistry::with_defaults(), &record)
    .unwrap();
    let mut model = WeatheringModel::new(config).unwrap();

    for run in 1..=2 {
        println!("Run {run}: one release per hour for 4 hours, 12 hours total");
        model.prepare_run();
        let mut t = ModelTime::ZERO;
        while t < model.end_time() {
            model.prepare_step(model.time_step(), t).unwrap();
            if t.seconds() % 3600.0 == 0.0 && t.seconds() < 4.0 * 3600.0 {
                model
                    .release(&Release {
                        substance: SubstanceId(0),
                        spill: SpillId((t.seconds() / 3600.0) as u32),
                        num_elements: 250,
                        mass: 5_000.0,
                        droplet_diameter: 1e-4,
                        viscosity: 1e-5,
                    })
                    .unwrap();
            }
            model.initialize_data().unwrap();
            let report = model.step().unwrap();

            if report.step.0 % 8 == 7 {
                let balance = model.mass_balance();
                println!(
                    "  {}: floating={:>10.3} kg, dissolved={:>8.4} kg, degenerate={}, step={:>5}μs",
                    model.model_time(),
                    balance.floating(),
                    balance.process(Dissolution::NAME),
                    report.total_degenerate(),
                    report.metrics.total_us,
                );
            }
            t = model.model_time();
        }
        println!();
    }

    let balance = model.mass_balance();
    println!("Final mass balance:");
    println!("{}", serde_json::to_string_pretty(&balance).unwrap());
}
