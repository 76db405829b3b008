//! Core types and traits for the Slick weathering engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Slick workspace:
//! identifiers, simulated time, substance descriptors, the
//! [`Environment`] trait, and the error taxonomy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod substance;
pub mod time;
pub mod traits;

pub use error::{
    ConsistencyError, Degeneracy, EnvironmentError, StepError, WeatheringError,
};
pub use id::{SpillId, StepId, SubstanceId};
pub use substance::{Component, ComponentKind, Substance, SubstanceError};
pub use time::{ModelTime, TimeRange};
pub use traits::{Environment, Quantity};
