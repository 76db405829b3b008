//! Element release descriptors.

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use slick_core::{SpillId, SubstanceId};

/// A batch of new elements entering the simulation.
///
/// The released mass is split evenly across `num_elements` elements and
/// across components in the substance's mass-fraction proportions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Release {
    /// Substance being released.
    pub substance: SubstanceId,
    /// Spill number stamped on every new element.
    pub spill: SpillId,
    /// Number of elements to create.
    pub num_elements: usize,
    /// Total mass released, kg.
    pub mass: f64,
    /// Initial droplet average diameter, m.
    pub droplet_diameter: f64,
    /// Initial kinematic viscosity, m²/s.
    #[serde(default)]
    pub viscosity: f64,
}

impl Release {
    /// Check the release parameters are physically meaningful.
    ///
    /// A zero droplet size is accepted: weathering processes treat such
    /// elements as degenerate rather than failing.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.num_elements == 0 {
            return Err(self.invalid("num_elements", 0.0));
        }
        let checks = [
            ("mass", self.mass),
            ("droplet_diameter", self.droplet_diameter),
            ("viscosity", self.viscosity),
        ];
        for (property, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(self.invalid(property, value));
            }
        }
        Ok(())
    }

    fn invalid(&self, property: &'static str, value: f64) -> StoreError {
        StoreError::InvalidRelease {
            spill: self.spill,
            property,
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release() -> Release {
        Release {
            substance: SubstanceId(0),
            spill: SpillId(2),
            num_elements: 10,
            mass: 1000.0,
            droplet_diameter: 5e-5,
            viscosity: 1e-5,
        }
    }

    #[test]
    fn valid_release_passes() {
        release().validate().unwrap();
    }

    #[test]
    fn zero_elements_rejected() {
        let r = Release {
            num_elements: 0,
            ..release()
        };
        assert!(matches!(
            r.validate(),
            Err(StoreError::InvalidRelease {
                property: "num_elements",
                ..
            })
        ));
    }

    #[test]
    fn negative_mass_rejected() {
        let r = Release {
            mass: -1.0,
            ..release()
        };
        assert_eq!(
            r.validate().unwrap_err().to_string(),
            "spill 2: invalid mass -1"
        );
    }

    #[test]
    fn viscosity_defaults_when_absent() {
        let r: Release = serde_json::from_str(
            r#"{"substance": 0, "spill": 1, "num_elements": 4, "mass": 10.0, "droplet_diameter": 1e-4}"#,
        )
        .unwrap();
        assert_eq!(r.viscosity, 0.0);
        r.validate().unwrap();
    }
}
