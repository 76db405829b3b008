//! Linearly interpolated scalar time series.

use crate::error::TimeseriesError;
use serde::{Deserialize, Serialize};
use slick_core::{ModelTime, TimeRange};

/// A scalar sampled at strictly increasing times.
///
/// Values between samples are linearly interpolated. A series with a
/// single record is constant over all time; otherwise it is only defined
/// on `[first, last]` and [`value_at`](Self::value_at) returns `None`
/// outside that range.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(ModelTime, f64)>", into = "Vec<(ModelTime, f64)>")]
pub struct Timeseries {
    records: Vec<(ModelTime, f64)>,
}

impl Timeseries {
    /// Build a series from `(time, value)` records.
    ///
    /// # Errors
    ///
    /// Rejects empty input, non-finite times or values, and times that
    /// are not strictly increasing.
    pub fn new(records: Vec<(ModelTime, f64)>) -> Result<Self, TimeseriesError> {
        if records.is_empty() {
            return Err(TimeseriesError::Empty);
        }
        for (index, &(t, v)) in records.iter().enumerate() {
            if !t.0.is_finite() || !v.is_finite() {
                return Err(TimeseriesError::NonFinite { index });
            }
            if index > 0 && t <= records[index - 1].0 {
                return Err(TimeseriesError::NotIncreasing { index });
            }
        }
        Ok(Self { records })
    }

    /// A series with the same value at every time.
    pub fn constant(value: f64) -> Result<Self, TimeseriesError> {
        Self::new(vec![(ModelTime::ZERO, value)])
    }

    /// Reject any value for which `ok` returns false.
    pub fn ensure(self, ok: impl Fn(f64) -> bool, reason: &str) -> Result<Self, TimeseriesError> {
        match self.records.iter().position(|&(_, v)| !ok(v)) {
            Some(index) => Err(TimeseriesError::InvalidValue {
                index,
                reason: reason.to_string(),
            }),
            None => Ok(self),
        }
    }

    /// The sampled records.
    pub fn records(&self) -> &[(ModelTime, f64)] {
        &self.records
    }

    /// Whether the series has one record and therefore never goes out of range.
    pub fn is_constant(&self) -> bool {
        self.records.len() == 1
    }

    /// Times for which [`value_at`](Self::value_at) answers. The end bound
    /// is the last sample and is itself valid.
    pub fn valid_range(&self) -> TimeRange {
        if self.is_constant() {
            return TimeRange::ALWAYS;
        }
        let first = self.records[0].0;
        let last = self.records[self.records.len() - 1].0;
        TimeRange::new(first, last)
    }

    /// Interpolated value at `t`, or `None` outside the valid range.
    pub fn value_at(&self, t: ModelTime) -> Option<f64> {
        if self.is_constant() {
            return Some(self.records[0].1);
        }
        if !self.valid_range().contains_inclusive(t) {
            return None;
        }
        // First record strictly after t; t lies in [records[i-1], records[i]).
        let i = self.records.partition_point(|&(rt, _)| rt <= t);
        if i == self.records.len() {
            return Some(self.records[i - 1].1);
        }
        let (t0, v0) = self.records[i - 1];
        let (t1, v1) = self.records[i];
        let w = (t.0 - t0.0) / (t1.0 - t0.0);
        Some(v0 + w * (v1 - v0))
    }
}

impl TryFrom<Vec<(ModelTime, f64)>> for Timeseries {
    type Error = TimeseriesError;

    fn try_from(records: Vec<(ModelTime, f64)>) -> Result<Self, Self::Error> {
        Self::new(records)
    }
}

impl From<Timeseries> for Vec<(ModelTime, f64)> {
    fn from(ts: Timeseries) -> Self {
        ts.records
    }
}
