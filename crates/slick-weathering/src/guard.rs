//! Post-step conservation check.
//!
//! For every substance, mass still floating plus mass in the ledger must
//! not exceed mass released. Excess is a fatal [`ConsistencyError`];
//! an unaccounted deficit is logged.

use crate::balance::MassBalance;
use slick_core::{ConsistencyError, SubstanceId};
use slick_elements::ElementStore;

/// Totals from a passing conservation check.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConservationReport {
    /// Mass released, all substances.
    pub released: f64,
    /// Mass still floating, all substances.
    pub floating: f64,
    /// Mass in the ledger, all substances.
    pub losses: f64,
    /// Substances with an unaccounted deficit above tolerance.
    pub deficits: usize,
}

impl ConservationReport {
    /// `released - floating - losses`; zero when the books balance.
    pub fn unaccounted(&self) -> f64 {
        self.released - self.floating - self.losses
    }
}

/// Check `floating + losses <= released` per substance within relative
/// tolerance `rel_tol`.
pub fn check_conservation(
    store: &ElementStore,
    ledger: &MassBalance,
    rel_tol: f64,
) -> Result<ConservationReport, ConsistencyError> {
    let mut report = ConservationReport::default();
    for view in store.iter() {
        let released = store.released_mass(view.id);
        let floating = view.batch.total_mass();
        let losses = ledger.substance_losses(view.id);
        let accounted = floating + losses;
        let slack = rel_tol * released.max(accounted);

        if accounted - released > slack {
            return Err(ConsistencyError::ConservationViolated {
                substance: view.id,
                released,
                accounted,
            });
        }
        if released - accounted > slack {
            report.deficits += 1;
            warn_deficit(view.id, released, accounted);
        }

        report.released += released;
        report.floating += floating;
        report.losses += losses;
    }
    Ok(report)
}

fn warn_deficit(substance: SubstanceId, released: f64, accounted: f64) {
    tracing::warn!(
        substance = %substance,
        released,
        accounted,
        missing = released - accounted,
        "mass unaccounted for after step"
    );
}
