//! Dissolution of aromatic components into the water column.
//!
//! Droplets entrained by breaking waves lose their soluble (aromatic)
//! fraction while submerged. Per element and step:
//!
//! ```text
//! K_ow   = Σ(m·K/MW) / Σ(m/MW)              aromatics only
//! k_w    = g·(ρ_w − ρ_oil)·d² / (18·μ_w)     Stokes rise velocity
//! X      = V_aromatic / V_inert
//! β      = 4.84 · k_w / K_ow · V_inert^(2/3)
//! rate   = β · X / (X + 1)^(1/3)
//! Δm     = rate · f_wc · dt
//! ```
//!
//! Element losses are summed per substance and applied as one fractional
//! loss to every element of that substance that took part, clamped at
//! 100%. Degenerate elements keep their mass for the step.

use slick_core::{
    ConsistencyError, Degeneracy, Environment, ModelTime, Substance, SubstanceId, WeatheringError,
};
use slick_elements::{ElementBatch, ElementStore};
use slick_physics::constants::BETA_PREFACTOR;
use slick_physics::{
    breaking_waves_frac, molar_partition_coeff, partition_coeff, water_column_time_fraction,
    water_phase_xfer_velocity,
};
use slick_weathering::{MassDelta, StepContext, Weatherer, WeathererConfig};
use smallvec::SmallVec;

/// Relative tolerance on `V_aromatic + V_inert == V_total`.
const VOLUME_TOLERANCE: f64 = 1e-9;

type ComponentVec<T> = SmallVec<[T; 8]>;

/// The dissolution weathering process.
///
/// Requires an environment provider for water density, wind and waves.
/// Maintains each element's `partition_coeff` and `density` fields.
#[derive(Clone, Debug, Default)]
pub struct Dissolution {
    config: WeathererConfig,
}

impl Dissolution {
    /// Ledger key.
    pub const NAME: &'static str = "dissolution";

    /// An enabled process, active for all time.
    pub fn new() -> Self {
        Self::default()
    }

    /// A process with the given activation settings.
    pub fn with_config(config: WeathererConfig) -> Self {
        Self { config }
    }
}

// ── Per-substance constants ────────────────────────────────────────

struct SubstanceConstants {
    aromatic: ComponentVec<bool>,
    molecular_weight: ComponentVec<f64>,
    density: ComponentVec<f64>,
    /// Zero for non-aromatics.
    component_coeff: ComponentVec<f64>,
    /// First failure computing an aromatic component's coefficient.
    coeff_degeneracy: Option<Degeneracy>,
}

impl SubstanceConstants {
    fn new(substance: &Substance) -> Self {
        let mut coeff_degeneracy = None;
        let component_coeff = substance
            .components
            .iter()
            .map(|c| {
                if !c.kind.is_aromatic() {
                    return 0.0;
                }
                match partition_coeff(c.molecular_weight, c.density) {
                    Ok(k) => k,
                    Err(d) => {
                        coeff_degeneracy.get_or_insert(d);
                        0.0
                    }
                }
            })
            .collect();
        Self {
            aromatic: substance.components.iter().map(|c| c.kind.is_aromatic()).collect(),
            molecular_weight: substance.components.iter().map(|c| c.molecular_weight).collect(),
            density: substance.components.iter().map(|c| c.density).collect(),
            component_coeff,
            coeff_degeneracy,
        }
    }

    fn element_partition_coeff(&self, masses: &[f64]) -> Result<f64, Degeneracy> {
        if let Some(d) = self.coeff_degeneracy {
            return Err(d);
        }
        let k = molar_partition_coeff(masses, &self.component_coeff, &self.molecular_weight)?;
        if k > 0.0 {
            Ok(k)
        } else {
            Err(Degeneracy::NonPositivePartitionCoeff)
        }
    }

    fn oil_density(&self, masses: &[f64], total: f64) -> f64 {
        masses
            .iter()
            .zip(&self.density)
            .map(|(&m, &rho)| m / total * rho)
            .sum()
    }
}

/// Environment values for one substance at one time.
struct Conditions {
    water_density: f64,
    peak_wave_period: f64,
    wave_height: f64,
    breaking_waves_frac: Result<f64, Degeneracy>,
}

impl Conditions {
    fn query(env: &dyn Environment, t: ModelTime) -> Result<Self, WeatheringError> {
        let water_density = env.get_density(t)?;
        let wind_speed = env.get_wind_speed(t)?;
        let wave_height = env.get_wave_height(t)?;
        let peak_wave_period = env.get_peak_wave_period(t)?;
        Ok(Self {
            water_density,
            peak_wave_period,
            wave_height,
            breaking_waves_frac: breaking_waves_frac(wind_speed, peak_wave_period),
        })
    }
}

enum ElementError {
    Degenerate(Degeneracy),
    Inconsistent(ConsistencyError),
}

impl From<Degeneracy> for ElementError {
    fn from(d: Degeneracy) -> Self {
        Self::Degenerate(d)
    }
}

fn non_finite_as(value: f64, d: Degeneracy) -> Result<f64, Degeneracy> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(d)
    }
}

// ── Per-element flux ───────────────────────────────────────────────

struct ElementInput<'a> {
    substance: SubstanceId,
    element: usize,
    masses: &'a [f64],
    k_ow: Result<f64, Degeneracy>,
    oil_density: f64,
    droplet_diameter: f64,
}

/// Mass dissolved from one element over `dt`, kg.
fn dissolved_mass(
    consts: &SubstanceConstants,
    cond: &Conditions,
    input: &ElementInput<'_>,
    dt: f64,
) -> Result<f64, ElementError> {
    let k_ow = input.k_ow?;
    let k_w = water_phase_xfer_velocity(
        cond.water_density - input.oil_density,
        input.droplet_diameter,
    )?;

    let mut total_volume = 0.0;
    let mut aromatic_volume = 0.0;
    let mut inert_volume = 0.0;
    for ((&m, &rho), &aromatic) in input.masses.iter().zip(&consts.density).zip(&consts.aromatic) {
        let v = m / rho;
        total_volume += v;
        if aromatic {
            aromatic_volume += v;
        } else {
            inert_volume += v;
        }
    }
    let partitioned = aromatic_volume + inert_volume;
    if (partitioned - total_volume).abs() > VOLUME_TOLERANCE * total_volume.abs() {
        return Err(ElementError::Inconsistent(ConsistencyError::VolumeMismatch {
            substance: input.substance,
            element: input.element,
            total: total_volume,
            partitioned,
        }));
    }
    if inert_volume <= 0.0 {
        return Err(Degeneracy::ZeroInertVolume.into());
    }

    let x = aromatic_volume / inert_volume;
    let beta = non_finite_as(
        BETA_PREFACTOR * k_w / k_ow * inert_volume.powf(2.0 / 3.0),
        Degeneracy::NonFinite,
    )?;
    let rate = beta * x / (x + 1.0).cbrt();
    let f_wc = water_column_time_fraction(
        cond.breaking_waves_frac?,
        cond.peak_wave_period,
        cond.wave_height,
        k_w,
    )?;
    let mass = non_finite_as(rate * f_wc * dt, Degeneracy::NonFinite)?;

    tracing::trace!(
        substance = %input.substance,
        element = input.element,
        k_ow,
        oil_density = input.oil_density,
        k_w,
        aromatic_volume,
        inert_volume,
        x,
        beta,
        rate,
        f_wc,
        mass,
        "dissolution element flux"
    );
    Ok(mass.max(0.0))
}

// ── Weatherer impl ─────────────────────────────────────────────────

impl Weatherer for Dissolution {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn config(&self) -> &WeathererConfig {
        &self.config
    }

    fn requires_environment(&self) -> bool {
        true
    }

    /// Compute the partition coefficient of every row still carrying the
    /// uninitialized sentinel. The number of such rows must equal
    /// `num_released`.
    fn initialize_data(
        &self,
        store: &mut ElementStore,
        num_released: usize,
    ) -> Result<(), WeatheringError> {
        if !self.config.on {
            return Ok(());
        }
        let mut initialized = 0;
        for view in store.iter_active_mut() {
            let consts = SubstanceConstants::new(view.substance);
            let mut f = view.batch.fields_mut();
            for i in 0..f.len() {
                if f.partition_coeff[i] != ElementBatch::UNINITIALIZED {
                    continue;
                }
                f.partition_coeff[i] = consts
                    .element_partition_coeff(f.components(i))
                    .unwrap_or(ElementBatch::PARTITION_COEFF_UNDEFINED);
                initialized += 1;
            }
        }
        if initialized != num_released {
            return Err(ConsistencyError::ReleaseCountMismatch {
                expected: num_released,
                initialized,
            }
            .into());
        }
        Ok(())
    }

    fn weather_elements(&self, ctx: &mut StepContext<'_>) -> Result<MassDelta, WeatheringError> {
        let t = ctx.model_time();
        let dt = ctx.dt();
        // Unwrapped per substance so a store with no elements never needs a provider.
        let env = ctx.environment();
        let mut delta = MassDelta::new();

        for view in ctx.store_mut().iter_active_mut() {
            let cond = Conditions::query(env.clone()?, t)?;
            let consts = SubstanceConstants::new(view.substance);
            let substance = view.id;
            let mut f = view.batch.fields_mut();
            let n = f.len();
            // Rows that took part this step; excluded rows are left untouched.
            let mut weathered = Vec::with_capacity(n);
            let mut mass_before = 0.0;
            let mut dissolved = 0.0;

            for i in 0..n {
                let total = f.mass[i];
                if !(total > 0.0) {
                    exclude(&mut delta, substance, i, Degeneracy::ZeroMass);
                    continue;
                }
                let k_ow = consts.element_partition_coeff(f.components(i));
                f.partition_coeff[i] = k_ow.unwrap_or(ElementBatch::PARTITION_COEFF_UNDEFINED);
                let oil_density = consts.oil_density(f.components(i), total);
                f.density[i] = oil_density;

                let input = ElementInput {
                    substance,
                    element: i,
                    masses: f.components(i),
                    k_ow,
                    oil_density,
                    droplet_diameter: f.droplet_avg_size[i],
                };
                match dissolved_mass(&consts, &cond, &input, dt) {
                    Ok(m) => {
                        dissolved += m;
                        mass_before += total;
                        weathered.push(i);
                    }
                    Err(ElementError::Degenerate(d)) => exclude(&mut delta, substance, i, d),
                    Err(ElementError::Inconsistent(e)) => return Err(e.into()),
                }
            }

            let mut fraction = if mass_before > 0.0 {
                dissolved / mass_before
            } else {
                0.0
            };
            if fraction > 1.0 {
                tracing::warn!(
                    substance = %substance,
                    dissolved,
                    mass = mass_before,
                    "dissolution loss clamped to remaining mass"
                );
                delta.record_clamp();
                fraction = 1.0;
            }
            let mut removed = 0.0;
            if fraction > 0.0 {
                for &i in &weathered {
                    let before = f.mass[i];
                    for c in f.components_mut(i) {
                        *c *= 1.0 - fraction;
                    }
                    f.resync_mass(i);
                    removed += before - f.mass[i];
                }
            }
            delta.add(substance, removed);

            tracing::debug!(
                substance = %substance,
                name = %view.substance.name,
                elements = n,
                weathered = weathered.len(),
                dissolved,
                removed,
                fraction,
                "dissolution step"
            );
        }
        Ok(delta)
    }
}

fn exclude(delta: &mut MassDelta, substance: SubstanceId, element: usize, reason: Degeneracy) {
    tracing::debug!(
        substance = %substance,
        element,
        reason = %reason,
        "element excluded from dissolution"
    );
    delta.record_degeneracy(reason);
}
