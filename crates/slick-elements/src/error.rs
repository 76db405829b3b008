//! Errors from registering substances and releasing elements.

use slick_core::{SpillId, SubstanceError, SubstanceId};
use std::error::Error;
use std::fmt;

/// Failures mutating the [`ElementStore`](crate::ElementStore) layout.
///
/// These are configuration errors: they are raised before any element
/// is appended.
#[derive(Clone, Debug, PartialEq)]
pub enum StoreError {
    /// The substance failed validation.
    InvalidSubstance(SubstanceError),
    /// A release names a substance the store does not hold.
    UnknownSubstance {
        /// The missing substance.
        substance: SubstanceId,
        /// The spill that referenced it.
        spill: SpillId,
    },
    /// A release parameter is outside its physical range.
    InvalidRelease {
        /// The spill being released.
        spill: SpillId,
        /// Which parameter.
        property: &'static str,
        /// The offending value.
        value: f64,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSubstance(e) => write!(f, "invalid substance: {e}"),
            Self::UnknownSubstance { substance, spill } => {
                write!(f, "spill {spill} references unknown substance {substance}")
            }
            Self::InvalidRelease {
                spill,
                property,
                value,
            } => write!(f, "spill {spill}: invalid {property} {value}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidSubstance(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SubstanceError> for StoreError {
    fn from(e: SubstanceError) -> Self {
        Self::InvalidSubstance(e)
    }
}
