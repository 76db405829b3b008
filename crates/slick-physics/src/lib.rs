//! Empirical physical property models for oil weathering.
//!
//! Every function here is pure and stateless. Degenerate inputs return
//! a [`Degeneracy`](slick_core::Degeneracy) instead of a non-finite value
//! so callers can exclude the affected element and keep going.
//!
//! | Model | Function |
//! |-------|----------|
//! | Lee–Huibers partition coefficient | [`partition::partition_coeff`] |
//! | Stokes water-phase transfer velocity | [`transfer::water_phase_xfer_velocity`] |
//! | Delvigne–Sweeney breaking-wave fraction | [`waves::breaking_waves_frac`] |
//! | Ding–Farmer water-column time fraction | [`waves::water_column_time_fraction`] |
//! | Pierson–Moskowitz fully developed sea | [`waves::fully_developed_height`], [`waves::fully_developed_period`] |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod constants;
pub mod partition;
pub mod transfer;
pub mod waves;

pub use partition::{molar_partition_coeff, partition_coeff};
pub use transfer::water_phase_xfer_velocity;
pub use waves::{
    breaking_waves_frac, fully_developed_height, fully_developed_period,
    water_column_time_fraction,
};
