//! Model configuration, validation, and error types.
//!
//! [`ModelConfig`] is the builder-input for constructing a
//! [`WeatheringModel`](crate::WeatheringModel). [`validate()`](ModelConfig::validate)
//! checks every structural invariant at startup so that a model which
//! constructs successfully can only fail at step time on physics or
//! consistency grounds.

use std::error::Error;
use std::fmt;

use slick_core::{Environment, ModelTime, Substance, TimeRange};
use slick_elements::StoreError;
use slick_environment::{EnvironmentRecord, EnvironmentRegistry, RegistryError};
use slick_weathering::{validate_pipeline, PipelineError, Weatherer};

/// Default relative tolerance for conservation and component-sum checks.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`ModelConfig::validate()`] or model construction.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Weatherer pipeline validation failed.
    Pipeline(PipelineError),
    /// A configured substance was rejected by the element store.
    Store(StoreError),
    /// An environment record could not be rebuilt.
    Registry(RegistryError),
    /// An enabled weatherer needs an environment but none is configured.
    MissingEnvironment {
        /// The weatherer that needs it.
        weatherer: String,
    },
    /// The environment does not answer for the whole run.
    EnvironmentRange {
        /// Provider name.
        provider: String,
        /// Range the provider answers for.
        valid: TimeRange,
        /// Range the run needs.
        required: TimeRange,
    },
    /// `duration` is NaN, infinite, zero, or negative.
    InvalidDuration {
        /// The invalid value.
        value: f64,
    },
    /// `start_time` is not finite.
    InvalidStartTime {
        /// The invalid value.
        value: ModelTime,
    },
    /// `tolerance` is NaN, infinite, zero, negative, or at least 1.
    InvalidTolerance {
        /// The invalid value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pipeline(e) => write!(f, "pipeline: {e}"),
            Self::Store(e) => write!(f, "substance: {e}"),
            Self::Registry(e) => write!(f, "environment record: {e}"),
            Self::MissingEnvironment { weatherer } => {
                write!(f, "weatherer '{weatherer}' requires an environment provider")
            }
            Self::EnvironmentRange {
                provider,
                valid,
                required,
            } => write!(
                f,
                "environment '{provider}' is valid for {valid} but the run needs {required}"
            ),
            Self::InvalidDuration { value } => {
                write!(f, "duration must be finite and positive, got {value}")
            }
            Self::InvalidStartTime { value } => {
                write!(f, "start time must be finite, got {value}")
            }
            Self::InvalidTolerance { value } => {
                write!(f, "tolerance must be in (0, 1), got {value}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Pipeline(e) => Some(e),
            Self::Store(e) => Some(e),
            Self::Registry(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PipelineError> for ConfigError {
    fn from(e: PipelineError) -> Self {
        Self::Pipeline(e)
    }
}

impl From<StoreError> for ConfigError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<RegistryError> for ConfigError {
    fn from(e: RegistryError) -> Self {
        Self::Registry(e)
    }
}

// ── ModelConfig ────────────────────────────────────────────────────

/// Complete configuration for constructing a [`WeatheringModel`](crate::WeatheringModel).
///
/// Consumed by the model constructor, which calls
/// [`validate()`](Self::validate) first.
pub struct ModelConfig {
    /// Weatherers executed in pipeline order each step.
    pub weatherers: Vec<Box<dyn Weatherer>>,
    /// Environment provider shared by every weatherer.
    pub environment: Option<Box<dyn Environment>>,
    /// Substances registered with the element store, in ID order.
    pub substances: Vec<Substance>,
    /// Step duration in seconds. Default: 900.
    pub time_step: f64,
    /// Model time of the first step. Default: `t = 0`.
    pub start_time: ModelTime,
    /// Run length in seconds. Default: one day.
    pub duration: f64,
    /// Relative tolerance for the post-step invariant checks. Default: 1e-9.
    pub tolerance: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            weatherers: Vec::new(),
            environment: None,
            substances: Vec::new(),
            time_step: 900.0,
            start_time: ModelTime::ZERO,
            duration: 86_400.0,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl ModelConfig {
    /// Rebuild the environment from a serialized record.
    pub fn with_environment_record(
        mut self,
        registry: &EnvironmentRegistry,
        record: &EnvironmentRecord,
    ) -> Result<Self, ConfigError> {
        self.environment = Some(registry.build(record)?);
        Ok(self)
    }

    /// The simulated interval `[start_time, start_time + duration]`.
    pub fn run_range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.start_time.advance(self.duration))
    }

    /// Validate all structural invariants.
    ///
    /// Substances are validated by the element store during construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Pipeline structure and dt.
        validate_pipeline(&self.weatherers, self.time_step)?;

        // 2. Run interval.
        if !self.start_time.0.is_finite() {
            return Err(ConfigError::InvalidStartTime {
                value: self.start_time,
            });
        }
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(ConfigError::InvalidDuration {
                value: self.duration,
            });
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 || self.tolerance >= 1.0 {
            return Err(ConfigError::InvalidTolerance {
                value: self.tolerance,
            });
        }

        // 3. Environment requirements of enabled weatherers.
        let needs_environment = self
            .weatherers
            .iter()
            .find(|w| w.config().on && w.requires_environment());
        match (&self.environment, needs_environment) {
            (None, Some(w)) => {
                return Err(ConfigError::MissingEnvironment {
                    weatherer: w.name().to_string(),
                })
            }
            (Some(env), _) => {
                let required = self.run_range();
                let valid = env.valid_range();
                if !valid.covers(&required) {
                    return Err(ConfigError::EnvironmentRange {
                        provider: env.name().to_string(),
                        valid,
                        required,
                    });
                }
            }
            (None, None) => {}
        }

        Ok(())
    }
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.weatherers.iter().map(|w| w.name()).collect();
        f.debug_struct("ModelConfig")
            .field("weatherers", &names)
            .field(
                "environment",
                &self.environment.as_ref().map(|e| e.name().to_string()),
            )
            .field("substances", &self.substances.len())
            .field("time_step", &self.time_step)
            .field("start_time", &self.start_time)
            .field("duration", &self.duration)
            .field("tolerance", &self.tolerance)
            .finish()
    }
}
