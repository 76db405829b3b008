//! Wind speed provider.

use crate::error::TimeseriesError;
use crate::timeseries::Timeseries;
use serde::{Deserialize, Serialize};
use slick_core::{ModelTime, TimeRange};

/// Wind speed at 10 m over the spill, m/s.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WindRecord", into = "WindRecord")]
pub struct Wind {
    speed: Timeseries,
}

#[derive(Clone, Serialize, Deserialize)]
struct WindRecord {
    speed: Timeseries,
}

impl Wind {
    /// Wind from a speed series. Speeds must be non-negative.
    pub fn new(speed: Timeseries) -> Result<Self, TimeseriesError> {
        let speed = speed.ensure(|v| v >= 0.0, "wind speed must be non-negative")?;
        Ok(Self { speed })
    }

    /// A steady wind.
    pub fn constant(speed: f64) -> Result<Self, TimeseriesError> {
        Self::new(Timeseries::constant(speed)?)
    }

    /// Wind speed at `t`, or `None` outside the record.
    pub fn speed_at(&self, t: ModelTime) -> Option<f64> {
        self.speed.value_at(t)
    }

    /// Times covered by the record.
    pub fn valid_range(&self) -> TimeRange {
        self.speed.valid_range()
    }
}

impl TryFrom<WindRecord> for Wind {
    type Error = TimeseriesError;

    fn try_from(r: WindRecord) -> Result<Self, Self::Error> {
        Self::new(r.speed)
    }
}

impl From<Wind> for WindRecord {
    fn from(w: Wind) -> Self {
        Self { speed: w.speed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_speed_rejected() {
        let ts = Timeseries::new(vec![(ModelTime(0.0), 3.0), (ModelTime(60.0), -1.0)]).unwrap();
        assert!(matches!(
            Wind::new(ts),
            Err(TimeseriesError::InvalidValue { index: 1, .. })
        ));
    }

    #[test]
    fn constant_wind_everywhere() {
        let w = Wind::constant(8.0).unwrap();
        assert_eq!(w.speed_at(ModelTime(123456.0)), Some(8.0));
        assert_eq!(w.valid_range(), TimeRange::ALWAYS);
    }

    #[test]
    fn deserialize_validates() {
        let bad: Result<Wind, _> = serde_json::from_str(r#"{"speed": [[0.0, -2.0]]}"#);
        assert!(bad.is_err());
        let ok: Wind = serde_json::from_str(r#"{"speed": [[0.0, 2.0], [60.0, 4.0]]}"#).unwrap();
        assert_eq!(ok.speed_at(ModelTime(30.0)), Some(3.0));
    }
}
