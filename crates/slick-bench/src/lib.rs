//! Benchmark profiles for the Slick weathering engine.
//!
//! Provides pre-built [`ModelConfig`] profiles and matching release
//! plans for benchmarks and examples:
//!
//! - [`reference_profile`]: 3 substances, 10K elements
//! - [`stress_profile`]: 8 substances, 100K elements
//! - [`release_plan`]: deterministic releases via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use slick_core::{SpillId, SubstanceId};
use slick_elements::Release;
use slick_engine::ModelConfig;
use slick_environment::water::Water;
use slick_environment::waves::Waves;
use slick_environment::wind::Wind;
use slick_environment::MarineConditions;
use slick_test_utils::random::{random_releases, random_substance};
use slick_weatherers::Dissolution;

/// Steady 10 m/s wind over a fully developed sea.
pub fn reference_sea() -> MarineConditions {
    MarineConditions::new(
        "reference sea",
        Wind::constant(10.0).expect("constant wind is valid"),
        Waves::FullyDeveloped,
        Water::default(),
    )
}

/// Build a reference benchmark profile: 3 random substances, dissolution
/// only, 15-minute steps over one day.
pub fn reference_profile(seed: u64) -> ModelConfig {
    profile(seed, 3)
}

/// Build a stress benchmark profile: 8 random substances.
///
/// Same pipeline as [`reference_profile`].
pub fn stress_profile(seed: u64) -> ModelConfig {
    profile(seed, 8)
}

fn profile(seed: u64, substances: u64) -> ModelConfig {
    ModelConfig {
        weatherers: vec![Box::new(Dissolution::new())],
        environment: Some(Box::new(reference_sea())),
        substances: (0..substances).map(|i| random_substance(seed + i)).collect(),
        time_step: 900.0,
        duration: 86_400.0,
        ..ModelConfig::default()
    }
}

/// Generate `spills` deterministic releases totalling roughly
/// `elements` elements, spread round-robin over `substances` substances.
pub fn release_plan(seed: u64, substances: u32, spills: usize, elements: usize) -> Vec<Release> {
    let per_spill = (elements / spills.max(1)).max(1);
    random_releases(seed, SubstanceId(0), spills)
        .into_iter()
        .enumerate()
        .map(|(i, r)| Release {
            substance: SubstanceId(i as u32 % substances.max(1)),
            spill: SpillId(i as u32),
            num_elements: per_spill,
            ..r
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use slick_engine::WeatheringModel;

    #[test]
    fn profiles_validate() {
        assert!(reference_profile(42).validate().is_ok());
        assert!(stress_profile(42).validate().is_ok());
    }

    #[test]
    fn release_plan_is_deterministic() {
        let a = release_plan(7, 3, 10, 10_000);
        let b = release_plan(7, 3, 10, 10_000);
        assert_eq!(a, b);
        assert_eq!(a.iter().map(|r| r.num_elements).sum::<usize>(), 10_000);
        assert_eq!(a[4].substance, SubstanceId(1));
    }

    #[test]
    fn reference_profile_steps() {
        let mut model = WeatheringModel::new(reference_profile(1)).unwrap();
        model.prepare_run();
        for r in release_plan(1, 3, 6, 600) {
            model.release(&r).unwrap();
        }
        model.prepare_step(900.0, model.model_time()).unwrap();
        assert_eq!(model.initialize_data().unwrap(), 600);
        let report = model.step().unwrap();
        assert_eq!(report.conservation.deficits, 0);
    }
}
