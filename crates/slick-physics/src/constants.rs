//! Physical constants and empirical fit parameters.

/// Gravitational acceleration, m/s².
pub const GRAVITY: f64 = 9.80665;

/// Dynamic viscosity of sea water at ~15 °C, Pa·s.
pub const WATER_DYNAMIC_VISCOSITY: f64 = 1.2e-3;

/// Default sea water density, kg/m³.
pub const SEA_WATER_DENSITY: f64 = 1025.0;

/// Intercept of the log-linear partition coefficient fit.
pub const KOW_INTERCEPT: f64 = -0.3;

/// Slope of the log-linear partition coefficient fit, per cm³/mol.
pub const KOW_SLOPE: f64 = 0.0286;

/// Upper bound on `log10 K_ow`.
///
/// The linear fit is only calibrated for light aromatics; heavy
/// components extrapolate to coefficients far beyond measured values
/// (the most hydrophobic PAHs sit near 10^8).
pub const KOW_MAX_LOG10: f64 = 8.0;

/// Empirical prefactor of the mass-transfer-rate coefficient.
pub const BETA_PREFACTOR: f64 = 4.84;

/// Delvigne–Sweeney breaking-wave coefficient.
pub const BREAKING_WAVE_COEFF: f64 = 0.032;

/// Wind speed below which waves do not break, m/s.
pub const BREAKING_WAVE_THRESHOLD: f64 = 5.0;

/// Depth of droplet penetration after a breaking wave, in wave heights.
pub const PENETRATION_DEPTH_FACTOR: f64 = 1.5;

/// Pierson–Moskowitz significant wave height coefficient.
pub const PM_HEIGHT_COEFF: f64 = 0.22;

/// Pierson–Moskowitz peak period coefficient.
pub const PM_PERIOD_COEFF: f64 = 7.16;
