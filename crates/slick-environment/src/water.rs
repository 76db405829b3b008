//! Sea water properties.

use serde::{Deserialize, Serialize};
use slick_physics::constants::SEA_WATER_DENSITY;

/// Bulk properties of the receiving water body.
///
/// Time-invariant over a run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Water {
    /// Density, kg/m³.
    pub density: f64,
}

impl Water {
    /// Water with the given density.
    pub fn with_density(density: f64) -> Self {
        Self { density }
    }

    /// Whether the properties are physically meaningful.
    pub fn is_valid(&self) -> bool {
        self.density.is_finite() && self.density > 0.0
    }
}

impl Default for Water {
    fn default() -> Self {
        Self {
            density: SEA_WATER_DENSITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_sea_water() {
        assert_eq!(Water::default().density, 1025.0);
        assert!(Water::default().is_valid());
        assert!(!Water::with_density(0.0).is_valid());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let w: Water = serde_json::from_str("{}").unwrap();
        assert_eq!(w, Water::default());
    }
}
