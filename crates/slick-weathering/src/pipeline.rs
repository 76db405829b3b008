//! Pipeline validation.
//!
//! [`validate_pipeline`] runs once at model construction to check the
//! weatherer list for structural errors before any step executes.

use indexmap::IndexSet;
use slick_core::TimeRange;

use crate::weatherer::Weatherer;

use std::error::Error;
use std::fmt;

// ── Errors ─────────────────────────────────────────────────────────

/// Errors from pipeline validation (startup-time, not per-step).
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// Two weatherers share a name, and therefore a ledger key.
    DuplicateName {
        /// The repeated name.
        name: String,
    },

    /// A weatherer's active window is empty, reversed or non-finite.
    InvalidWindow {
        /// Which weatherer.
        weatherer: String,
        /// The offending window.
        window: TimeRange,
    },

    /// The configured dt is not a valid time step (NaN, infinity, zero, or negative).
    InvalidDt {
        /// The invalid dt value.
        value: f64,
    },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName { name } => {
                write!(f, "weatherer name '{name}' is used more than once")
            }
            Self::InvalidWindow { weatherer, window } => {
                write!(
                    f,
                    "weatherer '{weatherer}' has invalid active window {window} \
                     (start must precede stop)"
                )
            }
            Self::InvalidDt { value } => {
                write!(f, "dt must be finite and positive, got {value}")
            }
        }
    }
}

impl Error for PipelineError {}

// ── Validation ─────────────────────────────────────────────────────

/// Validate a weatherer pipeline.
///
/// Checks performed (all at startup, not per-step):
///
/// 1. `dt` is finite and positive.
/// 2. Weatherer names are unique.
/// 3. Every active window is well formed.
///
/// An empty pipeline is valid: the model then only tracks releases.
pub fn validate_pipeline(weatherers: &[Box<dyn Weatherer>], dt: f64) -> Result<(), PipelineError> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(PipelineError::InvalidDt { value: dt });
    }

    let mut seen: IndexSet<&str> = IndexSet::new();
    for w in weatherers {
        if !seen.insert(w.name()) {
            return Err(PipelineError::DuplicateName {
                name: w.name().to_string(),
            });
        }
    }

    for w in weatherers {
        let window = w.config().active_range;
        if !window.is_valid() {
            return Err(PipelineError::InvalidWindow {
                weatherer: w.name().to_string(),
                window,
            });
        }
    }

    Ok(())
}
