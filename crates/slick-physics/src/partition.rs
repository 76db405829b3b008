//! Octanol/water partition coefficients.

use crate::constants::{KOW_INTERCEPT, KOW_MAX_LOG10, KOW_SLOPE};
use slick_core::Degeneracy;

/// Partition coefficient of a single aromatic component.
///
/// Log-linear in molar volume (Lee–Huibers form):
/// ```text
/// V_m      = MW / ρ · 1000          (cm³/mol)
/// log10 K  = min(KOW_INTERCEPT + KOW_SLOPE · V_m, KOW_MAX_LOG10)
/// ```
///
/// `molecular_weight` is in g/mol, `density` in kg/m³.
pub fn partition_coeff(molecular_weight: f64, density: f64) -> Result<f64, Degeneracy> {
    if !(molecular_weight > 0.0 && density > 0.0) {
        return Err(Degeneracy::NonPositiveInput);
    }
    let molar_volume = molecular_weight / density * 1000.0;
    let log_k = (KOW_INTERCEPT + KOW_SLOPE * molar_volume).min(KOW_MAX_LOG10);
    let k = 10f64.powf(log_k);
    if k.is_finite() {
        Ok(k)
    } else {
        Err(Degeneracy::NonFinite)
    }
}

/// Molar-averaged partition coefficient of one element.
///
/// ```text
/// K_ow = Σ (m_c · K_c / MW_c) / Σ (m_c / MW_c)
/// ```
///
/// `component_coeffs` must already be zero for non-aromatic components.
/// Returns `Ok(0.0)` when the element has mass but no aromatic content.
///
/// # Errors
///
/// [`Degeneracy::ZeroMass`] when the element carries no moles at all.
pub fn molar_partition_coeff(
    masses: &[f64],
    component_coeffs: &[f64],
    molecular_weights: &[f64],
) -> Result<f64, Degeneracy> {
    debug_assert_eq!(masses.len(), component_coeffs.len());
    debug_assert_eq!(masses.len(), molecular_weights.len());

    let mut weighted = 0.0;
    let mut moles = 0.0;
    for ((&m, &k), &mw) in masses.iter().zip(component_coeffs).zip(molecular_weights) {
        if mw <= 0.0 {
            return Err(Degeneracy::NonPositiveInput);
        }
        weighted += m * k / mw;
        moles += m / mw;
    }
    if moles <= 0.0 {
        return Err(Degeneracy::ZeroMass);
    }
    let k_ow = weighted / moles;
    if k_ow.is_finite() {
        Ok(k_ow)
    } else {
        Err(Degeneracy::NonFinite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn phenanthrene_like_component_is_large() {
        let k = partition_coeff(178.0, 900.0).unwrap();
        assert!(k > 1.0e4, "K_ow {k} should be large for a 3-ring aromatic");
        assert!(k.is_finite());
    }

    #[test]
    fn heavy_component_is_capped() {
        // V_m ≈ 900 cm³/mol would extrapolate to log10 K ≈ 25.
        let cap = 10f64.powf(KOW_MAX_LOG10);
        assert_eq!(partition_coeff(780.0, 860.0).unwrap(), cap);
        assert!(partition_coeff(128.0, 1025.0).unwrap() < cap);
    }

    #[test]
    fn non_positive_inputs_rejected() {
        assert_eq!(partition_coeff(0.0, 900.0), Err(Degeneracy::NonPositiveInput));
        assert_eq!(partition_coeff(178.0, -1.0), Err(Degeneracy::NonPositiveInput));
        assert_eq!(partition_coeff(f64::NAN, 900.0), Err(Degeneracy::NonPositiveInput));
    }

    #[test]
    fn non_aromatics_do_not_contribute() {
        let k_arom = partition_coeff(178.0, 900.0).unwrap();
        let masses = [50.0, 50.0];
        let coeffs = [k_arom, 0.0];
        let mw = [178.0, 300.0];
        let k = molar_partition_coeff(&masses, &coeffs, &mw).unwrap();

        let moles_arom = 50.0 / 178.0;
        let moles_total = moles_arom + 50.0 / 300.0;
        let expected = k_arom * moles_arom / moles_total;
        assert!((k - expected).abs() <= 1e-9 * expected);
        assert!(k < k_arom);
    }

    #[test]
    fn no_aromatics_gives_zero() {
        let k = molar_partition_coeff(&[10.0], &[0.0], &[300.0]).unwrap();
        assert_eq!(k, 0.0);
    }

    #[test]
    fn zero_mass_is_degenerate() {
        assert_eq!(
            molar_partition_coeff(&[0.0, 0.0], &[1.0e5, 0.0], &[178.0, 300.0]),
            Err(Degeneracy::ZeroMass)
        );
    }

    proptest! {
        #[test]
        fn grows_with_molar_volume(mw in 50.0f64..400.0, rho in 700.0f64..1200.0, extra in 1.0f64..100.0) {
            let a = partition_coeff(mw, rho).unwrap();
            let b = partition_coeff(mw + extra, rho).unwrap();
            prop_assert!(b > a || b == 10f64.powf(KOW_MAX_LOG10));
            prop_assert!(b <= 10f64.powf(KOW_MAX_LOG10));
        }

        #[test]
        fn molar_average_bounded_by_components(
            m1 in 0.1f64..100.0,
            m2 in 0.1f64..100.0,
            k1 in 1.0f64..1.0e6,
            k2 in 1.0f64..1.0e6,
        ) {
            let k = molar_partition_coeff(&[m1, m2], &[k1, k2], &[150.0, 250.0]).unwrap();
            let lo = k1.min(k2);
            let hi = k1.max(k2);
            prop_assert!(k >= lo * (1.0 - 1e-12) && k <= hi * (1.0 + 1e-12));
        }
    }
}
