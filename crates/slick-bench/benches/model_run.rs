//! Criterion benchmarks for full model steps and runs.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use slick_bench::{reference_profile, release_plan, stress_profile};
use slick_engine::WeatheringModel;

fn bench_step_10k(c: &mut Criterion) {
    let mut model = WeatheringModel::new(reference_profile(42)).unwrap();
    model.prepare_run();
    for r in release_plan(42, 3, 16, 10_000) {
        model.release(&r).unwrap();
    }
    model.initialize_data().unwrap();

    c.bench_function("step_10k", |b| {
        b.iter(|| {
            let t = model.model_time();
            model.prepare_step(900.0, t).unwrap();
            let report = model.step().unwrap();
            black_box(&report);
        });
    });
}

fn bench_step_100k(c: &mut Criterion) {
    let mut model = WeatheringModel::new(stress_profile(42)).unwrap();
    model.prepare_run();
    for r in release_plan(42, 8, 64, 100_000) {
        model.release(&r).unwrap();
    }
    model.initialize_data().unwrap();

    c.bench_function("step_100k", |b| {
        b.iter(|| {
            let t = model.model_time();
            model.prepare_step(900.0, t).unwrap();
            let report = model.step().unwrap();
            black_box(&report);
        });
    });
}

fn bench_day_run_10k(c: &mut Criterion) {
    let mut model = WeatheringModel::new(reference_profile(42)).unwrap();
    c.bench_function("day_run_10k", |b| {
        b.iter(|| {
            model.prepare_run();
            for r in release_plan(42, 3, 16, 10_000) {
                model.release(&r).unwrap();
            }
            black_box(model.run_to_end().unwrap());
        });
    });
}

criterion_group!(benches, bench_step_10k, bench_step_100k, bench_day_run_10k);
criterion_main!(benches);
