//! The mass-balance ledger.

use crate::delta::MassDelta;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use slick_core::SubstanceId;
use slick_elements::ElementStore;

/// Cumulative mass moved into each process's sink, per substance.
///
/// Keyed by process name in pipeline order. Reset at the start of a run
/// and updated once per step per active process.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MassBalance {
    processes: IndexMap<String, IndexMap<SubstanceId, f64>>,
}

impl MassBalance {
    /// An empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every entry and start a zero entry for each name.
    pub fn reset<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        self.processes.clear();
        for name in names {
            self.processes.insert(name.to_string(), IndexMap::new());
        }
    }

    /// Fold one step's delta into `process`'s entry.
    pub fn accrue(&mut self, process: &str, delta: &MassDelta) {
        let entry = self.processes.entry(process.to_string()).or_default();
        for (substance, mass) in delta.per_substance() {
            *entry.entry(substance).or_insert(0.0) += mass;
        }
    }

    /// Process names with an entry, in pipeline order.
    pub fn processes(&self) -> impl Iterator<Item = &str> {
        self.processes.keys().map(String::as_str)
    }

    /// Total mass `process` has removed, or `None` if it has no entry.
    pub fn process_total(&self, process: &str) -> Option<f64> {
        self.processes.get(process).map(|m| m.values().sum())
    }

    /// Mass `process` has removed from `substance`.
    pub fn process_substance(&self, process: &str, substance: SubstanceId) -> f64 {
        self.processes
            .get(process)
            .and_then(|m| m.get(&substance))
            .copied()
            .unwrap_or(0.0)
    }

    /// Mass all processes have removed from `substance`.
    pub fn substance_losses(&self, substance: SubstanceId) -> f64 {
        self.processes
            .values()
            .filter_map(|m| m.get(&substance))
            .sum()
    }

    /// Mass all processes have removed, all substances.
    pub fn total_losses(&self) -> f64 {
        self.processes.values().flat_map(|m| m.values()).sum()
    }

    /// Serializable report of the ledger against the store's releases.
    pub fn snapshot(&self, store: &ElementStore) -> MassBalanceSnapshot {
        let processes = self
            .processes
            .iter()
            .map(|(name, m)| (name.clone(), m.values().sum()))
            .collect();
        let substances = store
            .iter()
            .map(|view| SubstanceBalance {
                id: view.id,
                name: view.substance.name.clone(),
                released: store.released_mass(view.id),
                floating: view.batch.total_mass(),
                losses: self
                    .processes
                    .iter()
                    .map(|(name, m)| (name.clone(), m.get(&view.id).copied().unwrap_or(0.0)))
                    .collect(),
            })
            .collect();
        MassBalanceSnapshot {
            processes,
            substances,
        }
    }
}

/// Point-in-time mass-balance report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MassBalanceSnapshot {
    /// Cumulative mass removed per process, kg.
    pub processes: IndexMap<String, f64>,
    /// Per-substance breakdown.
    pub substances: Vec<SubstanceBalance>,
}

impl MassBalanceSnapshot {
    /// Cumulative mass released, all substances.
    pub fn released(&self) -> f64 {
        self.substances.iter().map(|s| s.released).sum()
    }

    /// Mass still floating, all substances.
    pub fn floating(&self) -> f64 {
        self.substances.iter().map(|s| s.floating).sum()
    }

    /// Mass removed by `process`, or 0 if it has no entry.
    pub fn process(&self, process: &str) -> f64 {
        self.processes.get(process).copied().unwrap_or(0.0)
    }
}

/// One substance's line in a [`MassBalanceSnapshot`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubstanceBalance {
    /// Substance ID.
    pub id: SubstanceId,
    /// Substance name.
    pub name: String,
    /// Cumulative mass released, kg.
    pub released: f64,
    /// Mass still carried by elements, kg.
    pub floating: f64,
    /// Cumulative mass removed per process, kg.
    pub losses: IndexMap<String, f64>,
}

impl SubstanceBalance {
    /// Sum of per-process losses.
    pub fn total_losses(&self) -> f64 {
        self.losses.values().sum()
    }
}
