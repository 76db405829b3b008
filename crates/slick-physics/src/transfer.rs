//! Water-phase transfer velocity of oil droplets.

use crate::constants::{GRAVITY, WATER_DYNAMIC_VISCOSITY};
use slick_core::Degeneracy;

/// Stokes rise velocity of a droplet, m/s.
///
/// ```text
/// k_w = g · Δρ · d² / (18 · μ_w)
/// ```
///
/// `density_diff` is water density minus oil density (kg/m³) and
/// `droplet_diameter` is in metres.
///
/// # Errors
///
/// - [`Degeneracy::NonPositiveDropletSize`] if the diameter is not a
///   positive finite number.
/// - [`Degeneracy::NonPositiveDensityDifference`] if the oil is not
///   lighter than the water.
pub fn water_phase_xfer_velocity(density_diff: f64, droplet_diameter: f64) -> Result<f64, Degeneracy> {
    if !(droplet_diameter.is_finite() && droplet_diameter > 0.0) {
        return Err(Degeneracy::NonPositiveDropletSize);
    }
    if !(density_diff.is_finite() && density_diff > 0.0) {
        return Err(Degeneracy::NonPositiveDensityDifference);
    }
    Ok(GRAVITY * density_diff * droplet_diameter * droplet_diameter
        / (18.0 * WATER_DYNAMIC_VISCOSITY))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fifty_micron_droplet() {
        let k_w = water_phase_xfer_velocity(125.0, 5.0e-5).unwrap();
        // 9.80665 * 125 * 2.5e-9 / 0.0216
        let expected = 9.80665 * 125.0 * 2.5e-9 / 0.0216;
        assert!((k_w - expected).abs() < 1e-15);
        assert!(k_w > 1.0e-4 && k_w < 2.0e-4);
    }

    #[test]
    fn zero_droplet_rejected() {
        assert_eq!(
            water_phase_xfer_velocity(125.0, 0.0),
            Err(Degeneracy::NonPositiveDropletSize)
        );
        assert_eq!(
            water_phase_xfer_velocity(125.0, -1.0e-5),
            Err(Degeneracy::NonPositiveDropletSize)
        );
    }

    #[test]
    fn sinking_oil_rejected() {
        assert_eq!(
            water_phase_xfer_velocity(-10.0, 5.0e-5),
            Err(Degeneracy::NonPositiveDensityDifference)
        );
        assert_eq!(
            water_phase_xfer_velocity(0.0, 5.0e-5),
            Err(Degeneracy::NonPositiveDensityDifference)
        );
    }

    proptest! {
        #[test]
        fn grows_with_droplet_size(dr in 1.0f64..300.0, d in 1.0e-6f64..1.0e-3, scale in 1.01f64..10.0) {
            let small = water_phase_xfer_velocity(dr, d).unwrap();
            let large = water_phase_xfer_velocity(dr, d * scale).unwrap();
            prop_assert!(large > small);
            prop_assert!(small > 0.0);
        }
    }
}
