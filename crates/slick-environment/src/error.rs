//! Error types for environment construction.

use std::fmt;

/// Errors arising from [`Timeseries`](crate::Timeseries) construction.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeseriesError {
    /// No records were supplied.
    Empty,
    /// A time or value is NaN or infinite.
    NonFinite {
        /// Index of the offending record.
        index: usize,
    },
    /// Times are not strictly increasing (duplicate or out of order).
    NotIncreasing {
        /// Index of the first record that is not after its predecessor.
        index: usize,
    },
    /// A value is outside the physically meaningful range.
    InvalidValue {
        /// Index of the offending record.
        index: usize,
        /// What went wrong.
        reason: String,
    },
}

impl fmt::Display for TimeseriesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "time series must have at least one record"),
            Self::NonFinite { index } => write!(f, "record {index} is not finite"),
            Self::NotIncreasing { index } => {
                write!(f, "record {index} is not after its predecessor")
            }
            Self::InvalidValue { index, reason } => {
                write!(f, "record {index} is invalid: {reason}")
            }
        }
    }
}

impl std::error::Error for TimeseriesError {}
