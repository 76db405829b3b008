//! Weathering process implementations for Slick.
//!
//! Each process implements [`Weatherer`](slick_weathering::Weatherer)
//! and can be placed in a model's pipeline.
//!
//! | Process | Removes mass by |
//! |---------|-----------------|
//! | [`Dissolution`] | aromatic components partitioning into the water column |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod dissolution;

pub use dissolution::Dissolution;
