//! Struct-of-arrays storage for the elements of one substance.

use slick_core::{ConsistencyError, SpillId, SubstanceId};

/// Parallel per-element arrays for one substance.
///
/// # Invariants
///
/// - Every field has [`len()`](Self::len) rows; `mass_components` has
///   `len() * num_components()` entries, row-major.
/// - Each row's component masses sum to its total mass (checked by
///   [`check_component_sums`](Self::check_component_sums)).
/// - Rows are appended, never removed.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementBatch {
    num_components: usize,
    mass: Vec<f64>,
    mass_components: Vec<f64>,
    density: Vec<f64>,
    viscosity: Vec<f64>,
    droplet_avg_size: Vec<f64>,
    partition_coeff: Vec<f64>,
    spill_num: Vec<SpillId>,
}

/// Split mutable borrow of every field of an [`ElementBatch`].
///
/// Row counts cannot change through this view.
pub struct BatchFieldsMut<'a> {
    /// Components per row.
    pub num_components: usize,
    /// Total mass per element, kg.
    pub mass: &'a mut [f64],
    /// Component masses, row-major, kg.
    pub mass_components: &'a mut [f64],
    /// Oil density per element, kg/m³.
    pub density: &'a mut [f64],
    /// Kinematic viscosity per element, m²/s.
    pub viscosity: &'a mut [f64],
    /// Droplet average diameter per element, m.
    pub droplet_avg_size: &'a mut [f64],
    /// Overall partition coefficient per element.
    pub partition_coeff: &'a mut [f64],
    /// Originating spill per element.
    pub spill_num: &'a [SpillId],
}

impl BatchFieldsMut<'_> {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.mass.len()
    }

    /// Whether there are no rows.
    pub fn is_empty(&self) -> bool {
        self.mass.is_empty()
    }

    /// Component masses of row `i`.
    pub fn components(&self, i: usize) -> &[f64] {
        let c = self.num_components;
        &self.mass_components[i * c..(i + 1) * c]
    }

    /// Mutable component masses of row `i`.
    pub fn components_mut(&mut self, i: usize) -> &mut [f64] {
        let c = self.num_components;
        &mut self.mass_components[i * c..(i + 1) * c]
    }

    /// Set row `i`'s total mass to the sum of its components.
    pub fn resync_mass(&mut self, i: usize) {
        let c = self.num_components;
        self.mass[i] = self.mass_components[i * c..(i + 1) * c].iter().sum();
    }
}

impl ElementBatch {
    /// Sentinel partition coefficient marking a row awaiting initialization.
    pub const UNINITIALIZED: f64 = 0.0;

    /// Partition coefficient written for rows whose coefficient is
    /// undefined (no aromatic mass). Distinct from [`UNINITIALIZED`](Self::UNINITIALIZED)
    /// so initialized rows never match the sentinel again.
    pub const PARTITION_COEFF_UNDEFINED: f64 = -1.0;

    /// An empty batch for a substance with `num_components` components.
    pub fn new(num_components: usize) -> Self {
        Self {
            num_components,
            mass: Vec::new(),
            mass_components: Vec::new(),
            density: Vec::new(),
            viscosity: Vec::new(),
            droplet_avg_size: Vec::new(),
            partition_coeff: Vec::new(),
            spill_num: Vec::new(),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.mass.len()
    }

    /// Whether the batch holds no elements.
    pub fn is_empty(&self) -> bool {
        self.mass.is_empty()
    }

    /// Components per row.
    pub fn num_components(&self) -> usize {
        self.num_components
    }

    /// Append one element. `components` must have `num_components()` entries.
    ///
    /// The row's total mass is the component sum and its partition
    /// coefficient is the [`UNINITIALIZED`](Self::UNINITIALIZED) sentinel.
    pub(crate) fn push(
        &mut self,
        components: &[f64],
        density: f64,
        viscosity: f64,
        droplet_avg_size: f64,
        spill: SpillId,
    ) {
        debug_assert_eq!(components.len(), self.num_components);
        self.mass.push(components.iter().sum());
        self.mass_components.extend_from_slice(components);
        self.density.push(density);
        self.viscosity.push(viscosity);
        self.droplet_avg_size.push(droplet_avg_size);
        self.partition_coeff.push(Self::UNINITIALIZED);
        self.spill_num.push(spill);
    }

    /// Total mass per element.
    pub fn mass(&self) -> &[f64] {
        &self.mass
    }

    /// All component masses, row-major.
    pub fn mass_components(&self) -> &[f64] {
        &self.mass_components
    }

    /// Component masses of row `i`.
    pub fn components(&self, i: usize) -> &[f64] {
        let c = self.num_components;
        &self.mass_components[i * c..(i + 1) * c]
    }

    /// Oil density per element.
    pub fn density(&self) -> &[f64] {
        &self.density
    }

    /// Viscosity per element.
    pub fn viscosity(&self) -> &[f64] {
        &self.viscosity
    }

    /// Droplet average diameter per element.
    pub fn droplet_avg_size(&self) -> &[f64] {
        &self.droplet_avg_size
    }

    /// Partition coefficient per element.
    pub fn partition_coeff(&self) -> &[f64] {
        &self.partition_coeff
    }

    /// Originating spill per element.
    pub fn spill_num(&self) -> &[SpillId] {
        &self.spill_num
    }

    /// Sum of element masses.
    pub fn total_mass(&self) -> f64 {
        self.mass.iter().sum()
    }

    /// Rows still carrying the [`UNINITIALIZED`](Self::UNINITIALIZED) sentinel.
    pub fn count_uninitialized(&self) -> usize {
        self.partition_coeff
            .iter()
            .filter(|&&k| k == Self::UNINITIALIZED)
            .count()
    }

    /// Split mutable borrow of every field.
    pub fn fields_mut(&mut self) -> BatchFieldsMut<'_> {
        BatchFieldsMut {
            num_components: self.num_components,
            mass: &mut self.mass,
            mass_components: &mut self.mass_components,
            density: &mut self.density,
            viscosity: &mut self.viscosity,
            droplet_avg_size: &mut self.droplet_avg_size,
            partition_coeff: &mut self.partition_coeff,
            spill_num: &self.spill_num,
        }
    }

    /// Verify every field has the same number of rows.
    pub fn check_row_counts(&self, substance: SubstanceId) -> Result<(), ConsistencyError> {
        let expected = self.len();
        let counts = [
            ("density", self.density.len()),
            ("viscosity", self.viscosity.len()),
            ("droplet_avg_size", self.droplet_avg_size.len()),
            ("partition_coeff", self.partition_coeff.len()),
            ("spill_num", self.spill_num.len()),
        ];
        for (field, actual) in counts {
            if actual != expected {
                return Err(ConsistencyError::RowCountMismatch {
                    substance,
                    field,
                    expected,
                    actual,
                });
            }
        }
        if self.mass_components.len() != expected * self.num_components {
            return Err(ConsistencyError::RowCountMismatch {
                substance,
                field: "mass_components",
                expected: expected * self.num_components,
                actual: self.mass_components.len(),
            });
        }
        Ok(())
    }

    /// Verify each row's component masses sum to its total within
    /// relative tolerance `rel_tol`.
    pub fn check_component_sums(
        &self,
        substance: SubstanceId,
        rel_tol: f64,
    ) -> Result<(), ConsistencyError> {
        for (element, &total) in self.mass.iter().enumerate() {
            let component_sum: f64 = self.components(element).iter().sum();
            if !within_relative(total, component_sum, rel_tol) {
                return Err(ConsistencyError::ComponentSumMismatch {
                    substance,
                    element,
                    total,
                    component_sum,
                });
            }
        }
        Ok(())
    }
}

/// Whether `a` and `b` agree to within `rel_tol` of the larger magnitude.
pub(crate) fn within_relative(a: f64, b: f64, rel_tol: f64) -> bool {
    (a - b).abs() <= rel_tol * a.abs().max(b.abs())
}
