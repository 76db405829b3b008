//! Slick: an oil weathering and mass-balance engine.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Slick sub-crates. For most users, adding `slick` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use slick::prelude::*;
//!
//! let oil = Substance::new(
//!     "medium crude",
//!     vec![
//!         Component::new(ComponentKind::Aromatics, 178.0, 900.0, 0.5),
//!         Component::new(ComponentKind::Saturates, 300.0, 900.0, 0.5),
//!     ],
//! );
//! let sea = MarineConditions::new(
//!     "steady",
//!     Wind::constant(8.0).unwrap(),
//!     Waves::constant(1.2, 6.0).unwrap(),
//!     Water::default(),
//! );
//! let config = ModelConfig {
//!     weatherers: vec![Box::new(Dissolution::new())],
//!     environment: Some(Box::new(sea)),
//!     substances: vec![oil],
//!     ..ModelConfig::default()
//! };
//! let mut model = WeatheringModel::new(config).unwrap();
//! model.prepare_run();
//! model.prepare_step(900.0, ModelTime::ZERO).unwrap();
//! model
//!     .release(&Release {
//!         substance: SubstanceId(0),
//!         spill: SpillId(0),
//!         num_elements: 1,
//!         mass: 100.0,
//!         droplet_diameter: 5e-5,
//!         viscosity: 1e-5,
//!     })
//!     .unwrap();
//! model.initialize_data().unwrap();
//! let report = model.step().unwrap();
//! assert!(report.total_removed() > 0.0);
//! assert!(model.mass_balance().process("dissolution") > 0.0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `slick-core` | IDs, time, substances, the `Environment` trait, errors |
//! | [`physics`] | `slick-physics` | Partition, transfer-velocity and wave models |
//! | [`environment`] | `slick-environment` | Wind/wave/water providers and the record registry |
//! | [`elements`] | `slick-elements` | Per-substance element arrays and releases |
//! | [`weathering`] | `slick-weathering` | `Weatherer` trait, step context, ledger |
//! | [`weatherers`] | `slick-weatherers` | Dissolution |
//! | [`engine`] | `slick-engine` | `WeatheringModel` and its configuration |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`slick-core`).
pub use slick_core as types;

/// Empirical physical property models (`slick-physics`).
pub use slick_physics as physics;

/// Environment providers (`slick-environment`).
///
/// [`environment::MarineConditions`] is the reference provider; saved
/// environments are rebuilt through an [`environment::EnvironmentRegistry`].
pub use slick_environment as environment;

/// Element arrays and releases (`slick-elements`).
pub use slick_elements as elements;

/// Weatherer contract and mass-balance ledger (`slick-weathering`).
///
/// The [`weathering::Weatherer`] trait is the extension point for new
/// physical processes.
pub use slick_weathering as weathering;

/// Weathering process implementations (`slick-weatherers`).
pub use slick_weatherers as weatherers;

/// The weathering model (`slick-engine`).
pub use slick_engine as engine;

/// Common imports for typical Slick usage.
///
/// ```rust
/// use slick::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use slick_core::{
        Component, ComponentKind, Environment, ModelTime, SpillId, StepId, Substance,
        SubstanceId, TimeRange,
    };

    // Errors
    pub use slick_core::{ConsistencyError, Degeneracy, EnvironmentError, StepError, WeatheringError};

    // Environment
    pub use slick_environment::water::Water;
    pub use slick_environment::waves::Waves;
    pub use slick_environment::wind::Wind;
    pub use slick_environment::{
        EnvironmentKind, EnvironmentRecord, EnvironmentRegistry, MarineConditions,
    };

    // Elements
    pub use slick_elements::{ElementStore, Release};

    // Weathering
    pub use slick_weathering::{
        MassBalanceSnapshot, MassDelta, StepContext, Weatherer, WeathererConfig,
    };

    // Processes
    pub use slick_weatherers::Dissolution;

    // Engine
    pub use slick_engine::{ConfigError, ModelConfig, StepReport, WeatheringModel};
}
