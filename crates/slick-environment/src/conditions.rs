//! Combined marine conditions: the provider weathering processes consume.

use crate::water::Water;
use crate::waves::Waves;
use crate::wind::Wind;
use serde::{Deserialize, Serialize};
use slick_core::{Environment, EnvironmentError, ModelTime, Quantity, TimeRange};

/// Wind, waves and water over a spill.
///
/// The valid range is the overlap of the wind and wave records. Water
/// properties are time-invariant and never limit the range.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarineConditions {
    name: String,
    wind: Wind,
    waves: Waves,
    #[serde(default)]
    water: Water,
}

impl MarineConditions {
    /// Assemble conditions from their parts.
    pub fn new(name: impl Into<String>, wind: Wind, waves: Waves, water: Water) -> Self {
        Self {
            name: name.into(),
            wind,
            waves,
            water,
        }
    }

    /// The wind component.
    pub fn wind(&self) -> &Wind {
        &self.wind
    }

    /// The wave component.
    pub fn waves(&self) -> &Waves {
        &self.waves
    }

    /// The water component.
    pub fn water(&self) -> &Water {
        &self.water
    }

    fn answer(
        &self,
        quantity: Quantity,
        t: ModelTime,
        value: Option<f64>,
    ) -> Result<f64, EnvironmentError> {
        let valid = self.valid_range();
        let v = match value {
            Some(v) if valid.contains_inclusive(t) => v,
            _ => {
                return Err(EnvironmentError::OutOfRange {
                    provider: self.name.clone(),
                    quantity,
                    time: t,
                    valid,
                })
            }
        };
        if !v.is_finite() {
            return Err(EnvironmentError::NonFinite {
                provider: self.name.clone(),
                quantity,
                time: t,
            });
        }
        Ok(v)
    }
}

impl Environment for MarineConditions {
    fn name(&self) -> &str {
        &self.name
    }

    fn valid_range(&self) -> TimeRange {
        self.wind.valid_range().intersect(&self.waves.valid_range())
    }

    fn get_density(&self, t: ModelTime) -> Result<f64, EnvironmentError> {
        self.answer(Quantity::WaterDensity, t, Some(self.water.density))
    }

    fn get_wind_speed(&self, t: ModelTime) -> Result<f64, EnvironmentError> {
        self.answer(Quantity::WindSpeed, t, self.wind.speed_at(t))
    }

    fn get_wave_height(&self, t: ModelTime) -> Result<f64, EnvironmentError> {
        self.answer(Quantity::WaveHeight, t, self.waves.height_at(t, &self.wind))
    }

    fn get_peak_wave_period(&self, t: ModelTime) -> Result<f64, EnvironmentError> {
        self.answer(
            Quantity::PeakWavePeriod,
            t,
            self.waves.period_at(t, &self.wind),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use crate::timeseries::Timeseries;

    fn six_hour_wind() -> Wind {
        Wind::new(
            Timeseries::new(vec![(ModelTime(0.0), 5.0), (ModelTime(21600.0), 11.0)]).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn steady_conditions_comply() {
        let env = MarineConditions::new(
            "steady",
            Wind::constant(8.0).unwrap(),
            Waves::constant(1.0, 6.0).unwrap(),
            Water::default(),
        );
        compliance::run_full_compliance(&env, &[0.0, 3600.0, 1.0e7], &[]);
    }

    #[test]
    fn bounded_wind_complies() {
        let env = MarineConditions::new(
            "forecast",
            six_hour_wind(),
            Waves::FullyDeveloped,
            Water::default(),
        );
        compliance::run_full_compliance(&env, &[0.0, 10800.0, 21600.0], &[-1.0, 21601.0]);
    }

    #[test]
    fn range_is_overlap_of_wind_and_waves() {
        let waves = Waves::observed(
            Timeseries::new(vec![(ModelTime(3600.0), 1.0), (ModelTime(36000.0), 2.0)]).unwrap(),
            Timeseries::constant(5.0).unwrap(),
        )
        .unwrap();
        let env = MarineConditions::new("overlap", six_hour_wind(), waves, Water::default());
        assert_eq!(
            env.valid_range(),
            TimeRange::new(ModelTime(3600.0), ModelTime(21600.0))
        );
        assert!(env.get_density(ModelTime(0.0)).is_err());
    }

    #[test]
    fn out_of_range_names_provider_and_quantity() {
        let env = MarineConditions::new(
            "forecast",
            six_hour_wind(),
            Waves::FullyDeveloped,
            Water::default(),
        );
        match env.get_wave_height(ModelTime(90000.0)) {
            Err(EnvironmentError::OutOfRange {
                provider, quantity, ..
            }) => {
                assert_eq!(provider, "forecast");
                assert_eq!(quantity, Quantity::WaveHeight);
            }
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn interpolated_wind_reaches_waves() {
        let env = MarineConditions::new(
            "forecast",
            six_hour_wind(),
            Waves::FullyDeveloped,
            Water::default(),
        );
        let early = env.get_wave_height(ModelTime(0.0)).unwrap();
        let late = env.get_wave_height(ModelTime(21600.0)).unwrap();
        assert!(late > early);
        assert_eq!(env.get_wind_speed(ModelTime(10800.0)).unwrap(), 8.0);
    }

    #[test]
    fn json_round_trip_preserves_answers() {
        let env = MarineConditions::new(
            "forecast",
            six_hour_wind(),
            Waves::FullyDeveloped,
            Water::with_density(1020.0),
        );
        let json = serde_json::to_string(&env).unwrap();
        let back: MarineConditions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, env);
        assert_eq!(back.get_density(ModelTime(0.0)).unwrap(), 1020.0);
    }
}
