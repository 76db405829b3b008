//! Immutable physical-chemistry descriptors for released oils.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

/// SARA family of a pseudo-component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// Saturated hydrocarbons.
    Saturates,
    /// Aromatic hydrocarbons. The only family that dissolves.
    Aromatics,
    /// Resins.
    Resins,
    /// Asphaltenes.
    Asphaltenes,
}

impl ComponentKind {
    /// Whether the component counts as aromatic.
    pub fn is_aromatic(self) -> bool {
        matches!(self, Self::Aromatics)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Saturates => "saturates",
            Self::Aromatics => "aromatics",
            Self::Resins => "resins",
            Self::Asphaltenes => "asphaltenes",
        };
        f.write_str(s)
    }
}

/// One pseudo-component of a substance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// SARA family.
    pub kind: ComponentKind,
    /// Molecular weight in g/mol (equivalently kg/kmol).
    pub molecular_weight: f64,
    /// Density in kg/m³.
    pub density: f64,
    /// Fraction of the substance's mass carried by this component.
    pub mass_fraction: f64,
}

impl Component {
    /// Create a component.
    pub fn new(kind: ComponentKind, molecular_weight: f64, density: f64, mass_fraction: f64) -> Self {
        Self {
            kind,
            molecular_weight,
            density,
            mass_fraction,
        }
    }
}

/// Validation failures for a [`Substance`].
#[derive(Clone, Debug, PartialEq)]
pub enum SubstanceError {
    /// The substance has an empty name.
    EmptyName,
    /// The substance has no components.
    NoComponents {
        /// Substance name.
        name: String,
    },
    /// A component property is NaN, infinite, zero, or negative.
    InvalidComponent {
        /// Substance name.
        name: String,
        /// Component index.
        index: usize,
        /// Which property failed.
        property: &'static str,
        /// The offending value.
        value: f64,
    },
    /// Component mass fractions do not sum to one.
    MassFractionSum {
        /// Substance name.
        name: String,
        /// The actual sum.
        sum: f64,
    },
}

impl fmt::Display for SubstanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "substance name is empty"),
            Self::NoComponents { name } => write!(f, "substance '{name}' has no components"),
            Self::InvalidComponent {
                name,
                index,
                property,
                value,
            } => write!(
                f,
                "substance '{name}' component {index}: {property} must be finite and positive, got {value}"
            ),
            Self::MassFractionSum { name, sum } => {
                write!(f, "substance '{name}' mass fractions sum to {sum}, expected 1")
            }
        }
    }
}

impl Error for SubstanceError {}

/// An oil type and its pseudo-component breakdown.
///
/// Created at configuration time and shared read-only by every
/// weathering process for the duration of a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Substance {
    /// Human-readable name, e.g. `"ALASKA NORTH SLOPE"`.
    pub name: String,
    /// Pseudo-components, in a fixed order shared by every element's
    /// component-mass row.
    pub components: Vec<Component>,
}

impl Substance {
    /// Tolerance on the mass-fraction sum accepted by [`validate`](Self::validate).
    pub const MASS_FRACTION_TOLERANCE: f64 = 1e-6;

    /// Create a substance.
    pub fn new(name: impl Into<String>, components: Vec<Component>) -> Self {
        Self {
            name: name.into(),
            components,
        }
    }

    /// Number of pseudo-components.
    pub fn num_components(&self) -> usize {
        self.components.len()
    }

    /// Per-component aromatic mask, in component order.
    pub fn aromatic_mask(&self) -> Vec<bool> {
        self.components.iter().map(|c| c.kind.is_aromatic()).collect()
    }

    /// Per-component molecular weights.
    pub fn molecular_weights(&self) -> Vec<f64> {
        self.components.iter().map(|c| c.molecular_weight).collect()
    }

    /// Per-component densities.
    pub fn component_densities(&self) -> Vec<f64> {
        self.components.iter().map(|c| c.density).collect()
    }

    /// Mass-weighted average density of the fresh substance.
    pub fn bulk_density(&self) -> f64 {
        let total: f64 = self.components.iter().map(|c| c.mass_fraction).sum();
        if total <= 0.0 {
            return 0.0;
        }
        self.components
            .iter()
            .map(|c| c.mass_fraction / total * c.density)
            .sum()
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), SubstanceError> {
        if self.name.trim().is_empty() {
            return Err(SubstanceError::EmptyName);
        }
        if self.components.is_empty() {
            return Err(SubstanceError::NoComponents {
                name: self.name.clone(),
            });
        }
        for (index, c) in self.components.iter().enumerate() {
            let checks = [
                ("molecular_weight", c.molecular_weight, false),
                ("density", c.density, false),
                ("mass_fraction", c.mass_fraction, true),
            ];
            for (property, value, zero_ok) in checks {
                let ok = value.is_finite() && (value > 0.0 || (zero_ok && value == 0.0));
                if !ok {
                    return Err(SubstanceError::InvalidComponent {
                        name: self.name.clone(),
                        index,
                        property,
                        value,
                    });
                }
            }
        }
        let sum: f64 = self.components.iter().map(|c| c.mass_fraction).sum();
        if (sum - 1.0).abs() > Self::MASS_FRACTION_TOLERANCE {
            return Err(SubstanceError::MassFractionSum {
                name: self.name.clone(),
                sum,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_component() -> Substance {
        Substance::new(
            "test oil",
            vec![
                Component::new(ComponentKind::Aromatics, 178.0, 900.0, 0.5),
                Component::new(ComponentKind::Saturates, 300.0, 900.0, 0.5),
            ],
        )
    }

    #[test]
    fn valid_substance_passes() {
        assert_eq!(two_component().validate(), Ok(()));
    }

    #[test]
    fn aromatic_mask_follows_kind() {
        assert_eq!(two_component().aromatic_mask(), vec![true, false]);
    }

    #[test]
    fn bulk_density_is_mass_weighted() {
        let s = Substance::new(
            "mix",
            vec![
                Component::new(ComponentKind::Aromatics, 128.0, 1000.0, 0.25),
                Component::new(ComponentKind::Resins, 500.0, 800.0, 0.75),
            ],
        );
        assert!((s.bulk_density() - 850.0).abs() < 1e-12);
    }

    #[test]
    fn empty_name_rejected() {
        let mut s = two_component();
        s.name = "  ".into();
        assert_eq!(s.validate(), Err(SubstanceError::EmptyName));
    }

    #[test]
    fn no_components_rejected() {
        let s = Substance::new("bare", vec![]);
        assert!(matches!(s.validate(), Err(SubstanceError::NoComponents { .. })));
    }

    #[test]
    fn non_positive_molecular_weight_rejected() {
        let mut s = two_component();
        s.components[1].molecular_weight = 0.0;
        match s.validate() {
            Err(SubstanceError::InvalidComponent {
                index, property, ..
            }) => {
                assert_eq!(index, 1);
                assert_eq!(property, "molecular_weight");
            }
            other => panic!("expected InvalidComponent, got {other:?}"),
        }
    }

    #[test]
    fn zero_mass_fraction_allowed_but_sum_checked() {
        let mut s = two_component();
        s.components[0].mass_fraction = 0.0;
        assert!(matches!(
            s.validate(),
            Err(SubstanceError::MassFractionSum { .. })
        ));
        s.components[1].mass_fraction = 1.0;
        assert_eq!(s.validate(), Ok(()));
    }

    #[test]
    fn round_trips_through_json() {
        let s = two_component();
        let json = serde_json::to_string(&s).unwrap();
        let back: Substance = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
