//! Per-substance element storage for the Slick weathering engine.
//!
//! Elements (Lagrangian parcels of oil) are grouped by substance. Each
//! group is an [`ElementBatch`]: parallel arrays with one row per element,
//! grown append-only by [`ElementStore::release`] and mutated in place by
//! weathering processes.
//!
//! Processes borrow a batch's fields through [`BatchFieldsMut`], which
//! splits the arrays so several can be written in one pass.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod batch;
pub mod error;
pub mod release;
pub mod store;

pub use batch::{BatchFieldsMut, ElementBatch};
pub use error::StoreError;
pub use release::Release;
pub use store::{ElementStore, SubstanceView, SubstanceViewMut};
