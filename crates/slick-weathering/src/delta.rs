//! Per-step output of one weathering process.

use indexmap::IndexMap;
use slick_core::{Degeneracy, SubstanceId};

/// Mass removed by one process in one step, with diagnostics.
///
/// Mass is broken down by substance so the ledger can check
/// conservation per substance. Degenerate elements and clamp events are
/// counted, never fatal.
#[derive(Clone, Debug, Default, PartialEq)]
#[must_use]
pub struct MassDelta {
    per_substance: IndexMap<SubstanceId, f64>,
    degeneracies: IndexMap<Degeneracy, usize>,
    clamped: usize,
}

impl MassDelta {
    /// An empty delta: no mass moved.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `mass` (kg) removed from `substance`.
    pub fn add(&mut self, substance: SubstanceId, mass: f64) {
        *self.per_substance.entry(substance).or_insert(0.0) += mass;
    }

    /// Count one element excluded from this step.
    pub fn record_degeneracy(&mut self, d: Degeneracy) {
        *self.degeneracies.entry(d).or_insert(0) += 1;
    }

    /// Count one substance whose loss was clamped to its remaining mass.
    pub fn record_clamp(&mut self) {
        self.clamped += 1;
    }

    /// Mass removed from `substance`.
    pub fn substance(&self, substance: SubstanceId) -> f64 {
        self.per_substance.get(&substance).copied().unwrap_or(0.0)
    }

    /// `(substance, mass)` pairs in first-touched order.
    pub fn per_substance(&self) -> impl Iterator<Item = (SubstanceId, f64)> + '_ {
        self.per_substance.iter().map(|(&id, &m)| (id, m))
    }

    /// Mass removed across all substances.
    pub fn total(&self) -> f64 {
        self.per_substance.values().sum()
    }

    /// Elements excluded for reason `d`.
    pub fn degeneracy_count(&self, d: Degeneracy) -> usize {
        self.degeneracies.get(&d).copied().unwrap_or(0)
    }

    /// Elements excluded for any reason.
    pub fn total_degenerate(&self) -> usize {
        self.degeneracies.values().sum()
    }

    /// Substances whose loss hit the 100% clamp.
    pub fn clamped(&self) -> usize {
        self.clamped
    }

    /// Whether no mass moved.
    pub fn is_zero(&self) -> bool {
        self.per_substance.values().all(|&m| m == 0.0)
    }
}
