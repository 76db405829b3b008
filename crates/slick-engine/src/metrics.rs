//! Per-step report and timing metrics for the weathering model.
//!
//! [`StepReport`] is returned by every successful
//! [`WeatheringModel::step()`](crate::WeatheringModel::step). It carries
//! the per-process mass deltas, the conservation totals, and
//! [`StepMetrics`] timing data.

use indexmap::IndexMap;
use slick_core::{Degeneracy, ModelTime, StepId};
use slick_weathering::{ConservationReport, MassDelta};

/// Timing metrics collected during a single step.
///
/// All durations are in microseconds.
#[derive(Clone, Debug, Default)]
pub struct StepMetrics {
    /// Wall-clock time for the entire step, in microseconds.
    pub total_us: u64,
    /// Per-weatherer execution times: `(name, microseconds)`.
    pub weatherer_us: Vec<(String, u64)>,
    /// Time spent in the post-step invariant checks, in microseconds.
    pub check_us: u64,
}

/// Outcome of one successful step.
#[derive(Clone, Debug)]
pub struct StepReport {
    /// Which step this was.
    pub step: StepId,
    /// Model time at the start of the step.
    pub model_time: ModelTime,
    /// Step duration, seconds.
    pub dt: f64,
    /// Mass delta of every weatherer that ran, in pipeline order.
    pub deltas: IndexMap<String, MassDelta>,
    /// Weatherers that were off or outside their window this step.
    pub skipped: Vec<String>,
    /// Totals from the conservation check.
    pub conservation: ConservationReport,
    /// Timing data.
    pub metrics: StepMetrics,
}

impl StepReport {
    /// Mass removed this step by all weatherers, kg.
    pub fn total_removed(&self) -> f64 {
        self.deltas.values().map(MassDelta::total).sum()
    }

    /// Elements excluded for `reason`, summed over weatherers.
    pub fn degeneracy_count(&self, reason: Degeneracy) -> usize {
        self.deltas
            .values()
            .map(|d| d.degeneracy_count(reason))
            .sum()
    }

    /// Elements excluded for any reason, summed over weatherers.
    pub fn total_degenerate(&self) -> usize {
        self.deltas.values().map(MassDelta::total_degenerate).sum()
    }

    /// Substances whose loss was clamped to their remaining mass.
    pub fn clamp_events(&self) -> usize {
        self.deltas.values().map(MassDelta::clamped).sum()
    }
}
