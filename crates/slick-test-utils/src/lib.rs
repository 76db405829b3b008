//! Test utilities and mock types for Slick development.
//!
//! Provides a mock [`Environment`] that counts its queries, weatherer
//! fixtures, substance and store fixtures, and seeded random release
//! generators for stress scenarios.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod random;

pub use fixtures::{FailingWeatherer, FixedFractionWeatherer};

use slick_core::{Environment, EnvironmentError, ModelTime, Quantity, TimeRange};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock implementation of [`Environment`].
///
/// Answers constant values inside a configurable valid range and counts
/// every query, so tests can assert that a code path never consulted
/// the environment.
pub struct MockEnvironment {
    pub name: String,
    pub water_density: f64,
    pub wind_speed: f64,
    pub wave_height: f64,
    pub peak_wave_period: f64,
    pub valid: TimeRange,
    queries: AtomicUsize,
}

impl MockEnvironment {
    /// Water 1025 kg/m³, wind 8 m/s, waves 1.2 m at 6 s, valid for all time.
    pub fn steady() -> Self {
        Self {
            name: "mock".to_string(),
            water_density: 1025.0,
            wind_speed: 8.0,
            wave_height: 1.2,
            peak_wave_period: 6.0,
            valid: TimeRange::ALWAYS,
            queries: AtomicUsize::new(0),
        }
    }

    /// Restrict the valid range.
    pub fn with_range(mut self, valid: TimeRange) -> Self {
        self.valid = valid;
        self
    }

    /// Override the wind speed.
    pub fn with_wind(mut self, wind_speed: f64) -> Self {
        self.wind_speed = wind_speed;
        self
    }

    /// How many getter calls have been made.
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }

    /// Reset the query counter.
    pub fn reset(&self) {
        self.queries.store(0, Ordering::Relaxed);
    }

    fn answer(&self, quantity: Quantity, t: ModelTime, v: f64) -> Result<f64, EnvironmentError> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        if !self.valid.contains_inclusive(t) {
            return Err(EnvironmentError::OutOfRange {
                provider: self.name.clone(),
                quantity,
                time: t,
                valid: self.valid,
            });
        }
        Ok(v)
    }
}

impl Default for MockEnvironment {
    fn default() -> Self {
        Self::steady()
    }
}

impl Environment for MockEnvironment {
    fn name(&self) -> &str {
        &self.name
    }

    fn valid_range(&self) -> TimeRange {
        self.valid
    }

    fn get_density(&self, t: ModelTime) -> Result<f64, EnvironmentError> {
        self.answer(Quantity::WaterDensity, t, self.water_density)
    }

    fn get_wind_speed(&self, t: ModelTime) -> Result<f64, EnvironmentError> {
        self.answer(Quantity::WindSpeed, t, self.wind_speed)
    }

    fn get_wave_height(&self, t: ModelTime) -> Result<f64, EnvironmentError> {
        self.answer(Quantity::WaveHeight, t, self.wave_height)
    }

    fn get_peak_wave_period(&self, t: ModelTime) -> Result<f64, EnvironmentError> {
        self.answer(Quantity::PeakWavePeriod, t, self.peak_wave_period)
    }
}
