//! Weatherer trait, step context and mass-balance ledger for Slick.
//!
//! A [`Weatherer`] is one physical process (dissolution, evaporation,
//! dispersion, ...). Each step the driver hands it a [`StepContext`]
//! and folds the returned [`MassDelta`] into the [`MassBalance`] ledger.
//! [`validate_pipeline`] checks the process list once at startup, and
//! [`check_conservation`] enforces the ledger invariant after each step.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod balance;
pub mod config;
pub mod context;
pub mod delta;
pub mod guard;
pub mod pipeline;
pub mod weatherer;

pub use balance::{MassBalance, MassBalanceSnapshot, SubstanceBalance};
pub use config::WeathererConfig;
pub use context::StepContext;
pub use delta::MassDelta;
pub use guard::{check_conservation, ConservationReport};
pub use pipeline::{validate_pipeline, PipelineError};
pub use weatherer::Weatherer;
