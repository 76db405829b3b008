//! Weathering model orchestrating the Slick weatherer pipeline.
//!
//! Provides [`WeatheringModel`], the explicit simulation context for one
//! run: it owns the weatherers, the environment, the element store and
//! the mass-balance ledger, and is driven one step at a time by an
//! external stepping loop.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod metrics;
pub mod model;

pub use config::{ConfigError, ModelConfig, DEFAULT_TOLERANCE};
pub use metrics::{StepMetrics, StepReport};
pub use model::WeatheringModel;
