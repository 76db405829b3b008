//! Core traits: the environment contract consumed by weathering processes.

use crate::error::EnvironmentError;
use crate::time::{ModelTime, TimeRange};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A physical quantity an [`Environment`] can be asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantity {
    /// Sea water density, kg/m³.
    WaterDensity,
    /// Wind speed at 10 m, m/s.
    WindSpeed,
    /// Significant wave height, m.
    WaveHeight,
    /// Peak wave period, s.
    PeakWavePeriod,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::WaterDensity => "water density",
            Self::WindSpeed => "wind speed",
            Self::WaveHeight => "wave height",
            Self::PeakWavePeriod => "peak wave period",
        };
        f.write_str(s)
    }
}

/// Time-indexed physical conditions consumed by weathering processes.
///
/// # Contract
///
/// - Every getter MUST return a finite SI value for any `t` with
///   `valid_range().contains_inclusive(t)`.
/// - Any `t` outside the valid range MUST be rejected with
///   [`EnvironmentError::OutOfRange`]; implementations never extrapolate.
/// - Queries are synchronous in-memory lookups and must not block.
///
/// # Object safety
///
/// This trait is object-safe; the engine stores the environment as
/// `Box<dyn Environment>`.
pub trait Environment: Send + 'static {
    /// Human-readable name for error reporting.
    fn name(&self) -> &str;

    /// The times for which queries are answered.
    fn valid_range(&self) -> TimeRange;

    /// Sea water density at `t`, kg/m³.
    fn get_density(&self, t: ModelTime) -> Result<f64, EnvironmentError>;

    /// Wind speed at `t`, m/s.
    fn get_wind_speed(&self, t: ModelTime) -> Result<f64, EnvironmentError>;

    /// Significant wave height at `t`, m.
    fn get_wave_height(&self, t: ModelTime) -> Result<f64, EnvironmentError>;

    /// Peak wave period at `t`, s.
    fn get_peak_wave_period(&self, t: ModelTime) -> Result<f64, EnvironmentError>;

    /// Query a quantity by tag.
    fn get(&self, quantity: Quantity, t: ModelTime) -> Result<f64, EnvironmentError> {
        match quantity {
            Quantity::WaterDensity => self.get_density(t),
            Quantity::WindSpeed => self.get_wind_speed(t),
            Quantity::WaveHeight => self.get_wave_height(t),
            Quantity::PeakWavePeriod => self.get_peak_wave_period(t),
        }
    }
}
