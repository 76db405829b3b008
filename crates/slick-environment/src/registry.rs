//! Tagged-variant reconstruction of environment providers.
//!
//! A saved environment is an [`EnvironmentRecord`]: an explicit kind tag
//! and JSON parameters. The [`EnvironmentRegistry`] maps each tag to a
//! constructor function. Tags are a closed enum; there is no lookup by
//! arbitrary type name.

use crate::conditions::MarineConditions;
use crate::water::Water;
use crate::waves::Waves;
use crate::wind::Wind;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use slick_core::Environment;
use std::error::Error;
use std::fmt;

/// The provider kinds a record can name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentKind {
    /// Steady wind, waves and water from four scalars.
    ConstantConditions,
    /// Full [`MarineConditions`] with time series.
    MarineConditions,
}

impl fmt::Display for EnvironmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConstantConditions => f.write_str("constant_conditions"),
            Self::MarineConditions => f.write_str("marine_conditions"),
        }
    }
}

/// A serialized environment provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentRecord {
    /// Which constructor to use.
    pub kind: EnvironmentKind,
    /// Constructor parameters.
    pub params: serde_json::Value,
}

impl EnvironmentRecord {
    /// Record an existing [`MarineConditions`].
    pub fn marine(conditions: &MarineConditions) -> Result<Self, RegistryError> {
        let params = serde_json::to_value(conditions).map_err(|e| RegistryError::InvalidParams {
            kind: EnvironmentKind::MarineConditions,
            reason: e.to_string(),
        })?;
        Ok(Self {
            kind: EnvironmentKind::MarineConditions,
            params,
        })
    }
}

/// Errors reconstructing a provider from a record.
#[derive(Clone, Debug, PartialEq)]
pub enum RegistryError {
    /// No constructor is registered for the kind.
    UnknownKind {
        /// The unregistered kind.
        kind: EnvironmentKind,
    },
    /// The parameters did not describe a valid provider.
    InvalidParams {
        /// The kind being built.
        kind: EnvironmentKind,
        /// What went wrong.
        reason: String,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKind { kind } => {
                write!(f, "no constructor registered for environment kind '{kind}'")
            }
            Self::InvalidParams { kind, reason } => {
                write!(f, "invalid parameters for environment kind '{kind}': {reason}")
            }
        }
    }
}

impl Error for RegistryError {}

/// Constructor from JSON parameters to a boxed provider.
pub type EnvironmentCtor = fn(&serde_json::Value) -> Result<Box<dyn Environment>, String>;

/// Maps environment kinds to constructors.
pub struct EnvironmentRegistry {
    ctors: IndexMap<EnvironmentKind, EnvironmentCtor>,
}

impl EnvironmentRegistry {
    /// A registry with no constructors.
    pub fn empty() -> Self {
        Self {
            ctors: IndexMap::new(),
        }
    }

    /// A registry with every built-in kind registered.
    pub fn with_defaults() -> Self {
        let mut r = Self::empty();
        r.register(EnvironmentKind::ConstantConditions, build_constant);
        r.register(EnvironmentKind::MarineConditions, build_marine);
        r
    }

    /// Register (or replace) the constructor for `kind`.
    pub fn register(&mut self, kind: EnvironmentKind, ctor: EnvironmentCtor) {
        self.ctors.insert(kind, ctor);
    }

    /// Whether `kind` has a constructor.
    pub fn contains(&self, kind: EnvironmentKind) -> bool {
        self.ctors.contains_key(&kind)
    }

    /// Build the provider a record describes.
    pub fn build(&self, record: &EnvironmentRecord) -> Result<Box<dyn Environment>, RegistryError> {
        let ctor = self
            .ctors
            .get(&record.kind)
            .ok_or(RegistryError::UnknownKind { kind: record.kind })?;
        ctor(&record.params).map_err(|reason| RegistryError::InvalidParams {
            kind: record.kind,
            reason,
        })
    }
}

impl Default for EnvironmentRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[derive(Deserialize)]
struct ConstantParams {
    #[serde(default = "default_name")]
    name: String,
    wind_speed: f64,
    wave_height: Option<f64>,
    wave_period: Option<f64>,
    #[serde(default)]
    water: Water,
}

fn default_name() -> String {
    "constant".to_string()
}

fn build_constant(params: &serde_json::Value) -> Result<Box<dyn Environment>, String> {
    let p = ConstantParams::deserialize(params).map_err(|e| e.to_string())?;
    let wind = Wind::constant(p.wind_speed).map_err(|e| e.to_string())?;
    let waves = match (p.wave_height, p.wave_period) {
        (Some(h), Some(t)) => Waves::constant(h, t).map_err(|e| e.to_string())?,
        (None, None) => Waves::FullyDeveloped,
        _ => return Err("wave_height and wave_period must be given together".to_string()),
    };
    if !p.water.is_valid() {
        return Err(format!("water density {} must be positive", p.water.density));
    }
    Ok(Box::new(MarineConditions::new(p.name, wind, waves, p.water)))
}

fn build_marine(params: &serde_json::Value) -> Result<Box<dyn Environment>, String> {
    let c = MarineConditions::deserialize(params).map_err(|e| e.to_string())?;
    if !c.water().is_valid() {
        return Err(format!("water density {} must be positive", c.water().density));
    }
    Ok(Box::new(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeseries::Timeseries;
    use serde_json::json;
    use slick_core::ModelTime;

    #[test]
    fn constant_record_builds() {
        let rec = EnvironmentRecord {
            kind: EnvironmentKind::ConstantConditions,
            params: json!({"wind_speed": 10.0, "wave_height": 1.5, "wave_period": 6.0}),
        };
        let env = EnvironmentRegistry::with_defaults().build(&rec).unwrap();
        assert_eq!(env.name(), "constant");
        assert_eq!(env.get_wind_speed(ModelTime(0.0)).unwrap(), 10.0);
        assert_eq!(env.get_wave_height(ModelTime(0.0)).unwrap(), 1.5);
        assert_eq!(env.get_density(ModelTime(0.0)).unwrap(), 1025.0);
    }

    #[test]
    fn constant_without_waves_is_fully_developed() {
        let rec = EnvironmentRecord {
            kind: EnvironmentKind::ConstantConditions,
            params: json!({"wind_speed": 10.0}),
        };
        let env = EnvironmentRegistry::with_defaults().build(&rec).unwrap();
        assert!(env.get_wave_height(ModelTime(0.0)).unwrap() > 0.0);
    }

    #[test]
    fn half_specified_waves_rejected() {
        let rec = EnvironmentRecord {
            kind: EnvironmentKind::ConstantConditions,
            params: json!({"wind_speed": 10.0, "wave_height": 1.0}),
        };
        assert!(matches!(
            EnvironmentRegistry::with_defaults().build(&rec),
            Err(RegistryError::InvalidParams { .. })
        ));
    }

    #[test]
    fn unregistered_kind_rejected() {
        let rec = EnvironmentRecord {
            kind: EnvironmentKind::MarineConditions,
            params: json!({}),
        };
        match EnvironmentRegistry::empty().build(&rec) {
            Err(e) => assert_eq!(
                e,
                RegistryError::UnknownKind {
                    kind: EnvironmentKind::MarineConditions
                }
            ),
            Ok(_) => panic!("empty registry built a provider"),
        }
    }

    #[test]
    fn malformed_params_rejected() {
        let rec = EnvironmentRecord {
            kind: EnvironmentKind::ConstantConditions,
            params: json!({"wind_speed": "fast"}),
        };
        let err = match EnvironmentRegistry::with_defaults().build(&rec) {
            Err(e) => e,
            Ok(_) => panic!("malformed params accepted"),
        };
        assert!(err.to_string().starts_with("invalid parameters for environment kind 'constant_conditions'"));
    }

    #[test]
    fn marine_record_round_trips_through_json() {
        let wind = Wind::new(
            Timeseries::new(vec![(ModelTime(0.0), 4.0), (ModelTime(3600.0), 8.0)]).unwrap(),
        )
        .unwrap();
        let conditions =
            MarineConditions::new("buoy", wind, Waves::FullyDeveloped, Water::default());
        let rec = EnvironmentRecord::marine(&conditions).unwrap();
        let text = serde_json::to_string(&rec).unwrap();
        let back: EnvironmentRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(back.kind, EnvironmentKind::MarineConditions);
        let env = EnvironmentRegistry::default().build(&back).unwrap();
        assert_eq!(env.get_wind_speed(ModelTime(1800.0)).unwrap(), 6.0);
        assert!(env.get_wind_speed(ModelTime(3601.0)).is_err());
    }
}
