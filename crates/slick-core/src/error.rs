//! Error types for the Slick weathering engine.
//!
//! Organized by severity: [`Degeneracy`] is absorbed per element,
//! everything else is fatal and propagates to the stepping loop.
//! Configuration errors live next to the configuration they validate
//! (`slick-engine`, `slick-weathering`, `slick-environment`).

use crate::id::SubstanceId;
use crate::time::{ModelTime, TimeRange};
use crate::traits::Quantity;
use std::error::Error;
use std::fmt;

// ── EnvironmentError ───────────────────────────────────────────────

/// Failures answering an environment query.
#[derive(Clone, Debug, PartialEq)]
pub enum EnvironmentError {
    /// The requested time lies outside the provider's valid range.
    OutOfRange {
        /// Name of the provider.
        provider: String,
        /// Which quantity was requested.
        quantity: Quantity,
        /// The requested time.
        time: ModelTime,
        /// The provider's valid range.
        valid: TimeRange,
    },
    /// The provider produced a NaN or infinite value.
    NonFinite {
        /// Name of the provider.
        provider: String,
        /// Which quantity was requested.
        quantity: Quantity,
        /// The requested time.
        time: ModelTime,
    },
}

impl fmt::Display for EnvironmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange {
                provider,
                quantity,
                time,
                valid,
            } => write!(
                f,
                "'{provider}' cannot answer {quantity} at {time}: outside valid range {valid}"
            ),
            Self::NonFinite {
                provider,
                quantity,
                time,
            } => write!(f, "'{provider}' produced a non-finite {quantity} at {time}"),
        }
    }
}

impl Error for EnvironmentError {}

// ── Degeneracy ─────────────────────────────────────────────────────

/// A local numerical degeneracy that excludes one element from one step.
///
/// Never fatal. Weathering processes count these and report them in
/// their step output instead of propagating non-finite values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Degeneracy {
    /// The element carries no mass.
    ZeroMass,
    /// Droplet diameter is zero, negative, or non-finite.
    NonPositiveDropletSize,
    /// Oil is at least as dense as water; no upward transfer velocity.
    NonPositiveDensityDifference,
    /// Partition coefficient is zero or negative (e.g. no aromatics).
    NonPositivePartitionCoeff,
    /// No non-aromatic volume to dissolve into.
    ZeroInertVolume,
    /// A physical input (molecular weight, density, period) is not positive.
    NonPositiveInput,
    /// An intermediate result was NaN or infinite.
    NonFinite,
}

impl Degeneracy {
    /// All variants, in reporting order.
    pub const ALL: [Degeneracy; 7] = [
        Self::ZeroMass,
        Self::NonPositiveDropletSize,
        Self::NonPositiveDensityDifference,
        Self::NonPositivePartitionCoeff,
        Self::ZeroInertVolume,
        Self::NonPositiveInput,
        Self::NonFinite,
    ];
}

impl fmt::Display for Degeneracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ZeroMass => "zero mass",
            Self::NonPositiveDropletSize => "non-positive droplet size",
            Self::NonPositiveDensityDifference => "oil not buoyant",
            Self::NonPositivePartitionCoeff => "non-positive partition coefficient",
            Self::ZeroInertVolume => "zero non-aromatic volume",
            Self::NonPositiveInput => "non-positive physical input",
            Self::NonFinite => "non-finite intermediate",
        };
        f.write_str(s)
    }
}

impl Error for Degeneracy {}

// ── ConsistencyError ───────────────────────────────────────────────

/// A broken internal invariant. Indicates a defect upstream; always fatal.
#[derive(Clone, Debug, PartialEq)]
pub enum ConsistencyError {
    /// An element's component masses do not sum to its total mass.
    ComponentSumMismatch {
        /// Substance of the element.
        substance: SubstanceId,
        /// Row index within the substance batch.
        element: usize,
        /// Recorded total mass.
        total: f64,
        /// Sum of the component masses.
        component_sum: f64,
    },
    /// Aromatic and non-aromatic volume do not add up to the total volume.
    VolumeMismatch {
        /// Substance of the element.
        substance: SubstanceId,
        /// Row index within the substance batch.
        element: usize,
        /// Total oil volume.
        total: f64,
        /// Aromatic plus non-aromatic volume.
        partitioned: f64,
    },
    /// The number of rows initialized differs from the number released.
    ReleaseCountMismatch {
        /// Count the caller claimed was released.
        expected: usize,
        /// Count of rows actually found awaiting initialization.
        initialized: usize,
    },
    /// Remaining plus accounted mass exceeds the released mass.
    ConservationViolated {
        /// Substance whose balance failed.
        substance: SubstanceId,
        /// Total mass ever released.
        released: f64,
        /// Active mass plus ledger losses.
        accounted: f64,
    },
    /// A batch field has a different row count from the others.
    RowCountMismatch {
        /// Substance of the batch.
        substance: SubstanceId,
        /// Name of the mismatched field.
        field: &'static str,
        /// Expected row count.
        expected: usize,
        /// Actual row count.
        actual: usize,
    },
}

impl fmt::Display for ConsistencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ComponentSumMismatch {
                substance,
                element,
                total,
                component_sum,
            } => write!(
                f,
                "substance {substance} element {element}: component masses sum to \
                 {component_sum}, total mass is {total}"
            ),
            Self::VolumeMismatch {
                substance,
                element,
                total,
                partitioned,
            } => write!(
                f,
                "substance {substance} element {element}: aromatic + inert volume \
                 {partitioned} differs from total volume {total}"
            ),
            Self::ReleaseCountMismatch {
                expected,
                initialized,
            } => write!(
                f,
                "released {expected} elements but found {initialized} awaiting initialization"
            ),
            Self::ConservationViolated {
                substance,
                released,
                accounted,
            } => write!(
                f,
                "substance {substance}: accounted mass {accounted} exceeds released mass {released}"
            ),
            Self::RowCountMismatch {
                substance,
                field,
                expected,
                actual,
            } => write!(
                f,
                "substance {substance}: field '{field}' has {actual} rows, expected {expected}"
            ),
        }
    }
}

impl Error for ConsistencyError {}

// ── WeatheringError ────────────────────────────────────────────────

/// Errors from an individual weathering process.
///
/// Returned by the process step and wrapped in
/// [`StepError::ProcessFailed`] by the pipeline driver.
#[derive(Clone, Debug, PartialEq)]
pub enum WeatheringError {
    /// An environment query failed.
    Environment(EnvironmentError),
    /// An internal invariant broke.
    Consistency(ConsistencyError),
    /// The process needs an environment but none was supplied.
    MissingEnvironment,
    /// The process failed for another reason.
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl fmt::Display for WeatheringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment(e) => write!(f, "environment: {e}"),
            Self::Consistency(e) => write!(f, "consistency: {e}"),
            Self::MissingEnvironment => write!(f, "no environment provider supplied"),
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
        }
    }
}

impl Error for WeatheringError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Environment(e) => Some(e),
            Self::Consistency(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EnvironmentError> for WeatheringError {
    fn from(e: EnvironmentError) -> Self {
        Self::Environment(e)
    }
}

impl From<ConsistencyError> for WeatheringError {
    fn from(e: ConsistencyError) -> Self {
        Self::Consistency(e)
    }
}

// ── StepError ──────────────────────────────────────────────────────

/// Errors from the pipeline driver during `step()` or `initialize_data()`.
///
/// Any of these aborts the run; the model refuses further steps until
/// it is rewound.
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// A weathering process returned an error.
    ProcessFailed {
        /// Name of the failing process.
        name: String,
        /// The underlying error.
        reason: WeatheringError,
    },
    /// A post-step invariant check failed.
    Consistency(ConsistencyError),
    /// Elements released this step have not been initialized yet.
    UninitializedRelease {
        /// Rows still awaiting `initialize_data`.
        pending: usize,
    },
    /// The step duration is NaN, infinite, zero, or negative.
    InvalidDt {
        /// The invalid value.
        value: f64,
    },
    /// `prepare_run()` has not been called.
    RunNotPrepared,
    /// `step()` was called without a preceding `prepare_step()`.
    StepNotPrepared,
    /// A previous step failed; the run must be rewound.
    RewindRequired,
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProcessFailed { name, reason } => {
                write!(f, "weathering process '{name}' failed: {reason}")
            }
            Self::Consistency(e) => write!(f, "consistency check failed: {e}"),
            Self::UninitializedRelease { pending } => {
                write!(f, "{pending} released elements were never initialized")
            }
            Self::InvalidDt { value } => {
                write!(f, "time step must be finite and positive, got {value}")
            }
            Self::RunNotPrepared => write!(f, "prepare_run() has not been called"),
            Self::StepNotPrepared => write!(f, "prepare_step() has not been called"),
            Self::RewindRequired => write!(f, "a previous step failed; rewind the run"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ProcessFailed { reason, .. } => Some(reason),
            Self::Consistency(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConsistencyError> for StepError {
    fn from(e: ConsistencyError) -> Self {
        Self::Consistency(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_failure_chains_source() {
        let inner = WeatheringError::ExecutionFailed {
            reason: "boom".into(),
        };
        let err = StepError::ProcessFailed {
            name: "dissolution".into(),
            reason: inner.clone(),
        };
        assert_eq!(
            err.to_string(),
            "weathering process 'dissolution' failed: execution failed: boom"
        );
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), inner.to_string());
    }

    #[test]
    fn environment_error_converts() {
        let env = EnvironmentError::OutOfRange {
            provider: "wind".into(),
            quantity: Quantity::WindSpeed,
            time: ModelTime(7200.0),
            valid: TimeRange::new(ModelTime(0.0), ModelTime(3600.0)),
        };
        let w: WeatheringError = env.clone().into();
        assert_eq!(w, WeatheringError::Environment(env));
        assert!(w.to_string().contains("outside valid range [0s, 3600s)"));
    }

    #[test]
    fn release_count_message() {
        let e = ConsistencyError::ReleaseCountMismatch {
            expected: 5,
            initialized: 3,
        };
        assert_eq!(
            e.to_string(),
            "released 5 elements but found 3 awaiting initialization"
        );
    }

    #[test]
    fn degeneracy_list_is_exhaustive() {
        assert_eq!(Degeneracy::ALL.len(), 7);
        for d in Degeneracy::ALL {
            assert!(!d.to_string().is_empty());
        }
    }
}
