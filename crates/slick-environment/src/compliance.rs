//! Environment trait compliance test helpers.
//!
//! These functions verify that an Environment implementation satisfies
//! the invariants required by the trait contract. Reused across all
//! provider test modules.

use slick_core::{Environment, EnvironmentError, ModelTime, Quantity};

const ALL_QUANTITIES: [Quantity; 4] = [
    Quantity::WaterDensity,
    Quantity::WindSpeed,
    Quantity::WaveHeight,
    Quantity::PeakWavePeriod,
];

/// Assert every quantity is finite at every in-range time.
pub fn assert_in_range_finite(env: &dyn Environment, times: &[f64]) {
    for &t in times {
        let t = ModelTime(t);
        assert!(
            env.valid_range().contains_inclusive(t),
            "{t} should be inside {}",
            env.valid_range()
        );
        for q in ALL_QUANTITIES {
            match env.get(q, t) {
                Ok(v) => assert!(v.is_finite(), "{q} at {t} = {v}, expected finite"),
                Err(e) => panic!("{q} at {t} failed: {e}"),
            }
        }
    }
}

/// Assert every quantity is rejected with `OutOfRange` at out-of-range times.
pub fn assert_out_of_range_rejected(env: &dyn Environment, times: &[f64]) {
    for &t in times {
        let t = ModelTime(t);
        for q in ALL_QUANTITIES {
            match env.get(q, t) {
                Err(EnvironmentError::OutOfRange { quantity, time, .. }) => {
                    assert_eq!(quantity, q);
                    assert_eq!(time, t);
                }
                other => panic!("{q} at {t}: expected OutOfRange, got {other:?}"),
            }
        }
    }
}

/// Assert tagged dispatch agrees with the named getters.
pub fn assert_get_matches_getters(env: &dyn Environment, times: &[f64]) {
    for &t in times {
        let t = ModelTime(t);
        assert_eq!(env.get(Quantity::WaterDensity, t), env.get_density(t));
        assert_eq!(env.get(Quantity::WindSpeed, t), env.get_wind_speed(t));
        assert_eq!(env.get(Quantity::WaveHeight, t), env.get_wave_height(t));
        assert_eq!(
            env.get(Quantity::PeakWavePeriod, t),
            env.get_peak_wave_period(t)
        );
    }
}

/// Assert repeated queries return identical values.
pub fn assert_deterministic(env: &dyn Environment, times: &[f64]) {
    for &t in times {
        let t = ModelTime(t);
        for q in ALL_QUANTITIES {
            assert_eq!(env.get(q, t), env.get(q, t), "{q} at {t} not deterministic");
        }
    }
}

/// Run all compliance checks.
pub fn run_full_compliance(env: &dyn Environment, in_range: &[f64], out_of_range: &[f64]) {
    assert_in_range_finite(env, in_range);
    assert_out_of_range_rejected(env, out_of_range);
    assert_get_matches_getters(env, in_range);
    assert_get_matches_getters(env, out_of_range);
    assert_deterministic(env, in_range);
}
