//! Wave statistics: breaking-wave fraction, water-column residence, and
//! fully developed sea estimates.

use crate::constants::{
    BREAKING_WAVE_COEFF, BREAKING_WAVE_THRESHOLD, GRAVITY, PENETRATION_DEPTH_FACTOR,
    PM_HEIGHT_COEFF, PM_PERIOD_COEFF,
};
use slick_core::Degeneracy;

/// Fraction of waves breaking per wave period (Delvigne–Sweeney).
///
/// ```text
/// f_bw = 0.032 · (U − 5) / T        for U > 5 m/s, else 0
/// ```
///
/// Clamped to `[0, 1]`.
pub fn breaking_waves_frac(wind_speed: f64, peak_wave_period: f64) -> Result<f64, Degeneracy> {
    if !(peak_wave_period.is_finite() && peak_wave_period > 0.0) || !wind_speed.is_finite() {
        return Err(Degeneracy::NonPositiveInput);
    }
    if wind_speed <= BREAKING_WAVE_THRESHOLD {
        return Ok(0.0);
    }
    let f = BREAKING_WAVE_COEFF * (wind_speed - BREAKING_WAVE_THRESHOLD) / peak_wave_period;
    Ok(f.clamp(0.0, 1.0))
}

/// Fraction of time a droplet spends suspended in the water column
/// (Ding–Farmer).
///
/// Between breaking events the sea is calm for `T / f_bw`; a droplet
/// driven down to `1.5 · H` takes `1.5 · H / k_w` to refloat:
/// ```text
/// f_wc = t_refloat / (t_calm + t_refloat)
/// ```
///
/// Returns 0 when no waves break.
pub fn water_column_time_fraction(
    breaking_waves_frac: f64,
    peak_wave_period: f64,
    wave_height: f64,
    water_phase_xfer_velocity: f64,
) -> Result<f64, Degeneracy> {
    if !(peak_wave_period.is_finite() && peak_wave_period > 0.0) {
        return Err(Degeneracy::NonPositiveInput);
    }
    if !(water_phase_xfer_velocity.is_finite() && water_phase_xfer_velocity > 0.0) {
        return Err(Degeneracy::NonPositiveInput);
    }
    if !breaking_waves_frac.is_finite() || !wave_height.is_finite() {
        return Err(Degeneracy::NonFinite);
    }
    if breaking_waves_frac <= 0.0 || wave_height <= 0.0 {
        return Ok(0.0);
    }
    let t_calm = peak_wave_period / breaking_waves_frac.min(1.0);
    let t_refloat = PENETRATION_DEPTH_FACTOR * wave_height / water_phase_xfer_velocity;
    let f = t_refloat / (t_calm + t_refloat);
    if f.is_finite() {
        Ok(f.clamp(0.0, 1.0))
    } else {
        Err(Degeneracy::NonFinite)
    }
}

/// Significant wave height of a fully developed sea, m (Pierson–Moskowitz).
pub fn fully_developed_height(wind_speed: f64) -> f64 {
    PM_HEIGHT_COEFF * wind_speed * wind_speed / GRAVITY
}

/// Peak wave period of a fully developed sea, s (Pierson–Moskowitz).
///
/// Calm air still has a residual swell period of one second so that
/// downstream fractions stay defined.
pub fn fully_developed_period(wind_speed: f64) -> f64 {
    (PM_PERIOD_COEFF * wind_speed / GRAVITY).max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn calm_wind_breaks_nothing() {
        assert_eq!(breaking_waves_frac(3.0, 6.0), Ok(0.0));
        assert_eq!(breaking_waves_frac(5.0, 6.0), Ok(0.0));
    }

    #[test]
    fn moderate_wind() {
        let f = breaking_waves_frac(8.0, 6.0).unwrap();
        assert!((f - 0.016).abs() < 1e-12);
    }

    #[test]
    fn zero_period_rejected() {
        assert_eq!(breaking_waves_frac(8.0, 0.0), Err(Degeneracy::NonPositiveInput));
    }

    #[test]
    fn no_breaking_means_no_suspension() {
        assert_eq!(water_column_time_fraction(0.0, 6.0, 1.2, 1.0e-4), Ok(0.0));
    }

    #[test]
    fn slow_droplets_stay_down() {
        let fast = water_column_time_fraction(0.016, 6.0, 1.2, 1.0e-2).unwrap();
        let slow = water_column_time_fraction(0.016, 6.0, 1.2, 1.0e-5).unwrap();
        assert!(slow > fast);
        assert!(slow < 1.0);
    }

    #[test]
    fn fully_developed_sea_at_ten_knots() {
        let h = fully_developed_height(5.0);
        let t = fully_developed_period(5.0);
        assert!((h - 0.22 * 25.0 / GRAVITY).abs() < 1e-12);
        assert!(t > 3.0 && t < 4.0);
        assert_eq!(fully_developed_period(0.0), 1.0);
    }

    proptest! {
        #[test]
        fn breaking_fraction_in_unit_interval(u in 0.0f64..60.0, t in 0.1f64..20.0) {
            let f = breaking_waves_frac(u, t).unwrap();
            prop_assert!((0.0..=1.0).contains(&f));
        }

        #[test]
        fn water_column_fraction_in_unit_interval(
            f_bw in 0.0f64..1.0,
            t in 0.5f64..20.0,
            h in 0.0f64..15.0,
            k_w in 1.0e-8f64..1.0,
        ) {
            let f = water_column_time_fraction(f_bw, t, h, k_w).unwrap();
            prop_assert!((0.0..=1.0).contains(&f));
        }
    }
}
