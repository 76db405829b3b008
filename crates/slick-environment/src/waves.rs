//! Wave height and period provider.

use crate::error::TimeseriesError;
use crate::timeseries::Timeseries;
use crate::wind::Wind;
use serde::{Deserialize, Serialize};
use slick_core::{ModelTime, TimeRange};
use slick_physics::{fully_developed_height, fully_developed_period};

/// Sea state over the spill.
///
/// Either observed (buoy or forecast records) or estimated from the
/// local wind as a fully developed sea.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Waves {
    /// Observed significant wave height (m) and peak period (s).
    Observed {
        /// Significant wave height series.
        height: Timeseries,
        /// Peak wave period series.
        period: Timeseries,
    },
    /// Pierson–Moskowitz estimate from the wind at the same time.
    FullyDeveloped,
}

impl Waves {
    /// Observed waves. Heights must be non-negative and periods positive.
    pub fn observed(height: Timeseries, period: Timeseries) -> Result<Self, TimeseriesError> {
        let height = height.ensure(|v| v >= 0.0, "wave height must be non-negative")?;
        let period = period.ensure(|v| v > 0.0, "wave period must be positive")?;
        Ok(Self::Observed { height, period })
    }

    /// Steady observed waves.
    pub fn constant(height: f64, period: f64) -> Result<Self, TimeseriesError> {
        Self::observed(Timeseries::constant(height)?, Timeseries::constant(period)?)
    }

    /// Significant wave height at `t`, or `None` outside the record.
    pub fn height_at(&self, t: ModelTime, wind: &Wind) -> Option<f64> {
        match self {
            Self::Observed { height, .. } => height.value_at(t),
            Self::FullyDeveloped => wind.speed_at(t).map(fully_developed_height),
        }
    }

    /// Peak wave period at `t`, or `None` outside the record.
    pub fn period_at(&self, t: ModelTime, wind: &Wind) -> Option<f64> {
        match self {
            Self::Observed { period, .. } => period.value_at(t),
            Self::FullyDeveloped => wind.speed_at(t).map(fully_developed_period),
        }
    }

    /// Times covered by the wave record itself. A fully developed sea
    /// is limited only by the wind.
    pub fn valid_range(&self) -> TimeRange {
        match self {
            Self::Observed { height, period } => height.valid_range().intersect(&period.valid_range()),
            Self::FullyDeveloped => TimeRange::ALWAYS,
        }
    }
}
