//! Environment providers for the Slick weathering engine.
//!
//! Implements the [`Environment`](slick_core::Environment) contract with
//! interpolated time series and provides tagged-variant reconstruction
//! of providers from serialized records.
//!
//! # Providers
//!
//! - [`Wind`]: wind speed time series
//! - [`Waves`]: observed wave height/period, or a fully developed sea
//!   derived from the wind
//! - [`Water`]: sea water properties
//! - [`MarineConditions`]: wind + waves + water, the provider the
//!   weathering processes consume
//!
//! # Reconstruction
//!
//! Saved environments are [`EnvironmentRecord`]s: an explicit
//! [`EnvironmentKind`] tag plus JSON parameters. An [`EnvironmentRegistry`]
//! maps each tag to a constructor.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod conditions;
pub mod error;
pub mod registry;
pub mod timeseries;
pub mod water;
pub mod waves;
pub mod wind;

#[cfg(test)]
pub(crate) mod compliance;

pub use conditions::MarineConditions;
pub use error::TimeseriesError;
pub use registry::{EnvironmentKind, EnvironmentRecord, EnvironmentRegistry, RegistryError};
pub use timeseries::Timeseries;
pub use water::Water;
pub use waves::Waves;
pub use wind::Wind;
