//! Reusable substance, store and weatherer fixtures.
//!
//! - [`scenario_substance`]: two-component oil (one aromatic, one saturate).
//! - [`single_element_store`]: one 100 kg element of that oil.
//! - [`FixedFractionWeatherer`]: removes a fixed fraction of every element's mass.
//! - [`FailingWeatherer`]: fails deterministically after N calls.

use slick_core::{
    Component, ComponentKind, SpillId, Substance, SubstanceId, WeatheringError,
};
use slick_elements::{ElementStore, Release};
use slick_weathering::{MassDelta, StepContext, Weatherer, WeathererConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Aromatic MW 178 and saturate MW 300, both 900 kg/m³, equal mass fractions.
pub fn scenario_substance() -> Substance {
    Substance::new(
        "scenario oil",
        vec![
            Component::new(ComponentKind::Aromatics, 178.0, 900.0, 0.5),
            Component::new(ComponentKind::Saturates, 300.0, 900.0, 0.5),
        ],
    )
}

/// A substance with no aromatic components.
pub fn non_aromatic_substance() -> Substance {
    Substance::new(
        "white oil",
        vec![
            Component::new(ComponentKind::Saturates, 250.0, 850.0, 0.7),
            Component::new(ComponentKind::Resins, 600.0, 1000.0, 0.3),
        ],
    )
}

/// `n` elements sharing `mass` kg, 50 µm droplets.
pub fn release(substance: SubstanceId, n: usize, mass: f64) -> Release {
    Release {
        substance,
        spill: SpillId(0),
        num_elements: n,
        mass,
        droplet_diameter: 5e-5,
        viscosity: 1e-5,
    }
}

/// A store with [`scenario_substance`] registered and `n` elements released.
pub fn store_with_release(n: usize, mass: f64) -> (ElementStore, SubstanceId) {
    let mut store = ElementStore::new();
    let id = store
        .add_substance(scenario_substance())
        .expect("fixture substance is valid");
    store
        .release(&release(id, n, mass))
        .expect("fixture release is valid");
    (store, id)
}

/// One 100 kg element of [`scenario_substance`] (50 kg per component).
pub fn single_element_store() -> (ElementStore, SubstanceId) {
    store_with_release(1, 100.0)
}

/// Removes `fraction` of every element's mass each step.
///
/// Useful for testing ledger accrual and conservation without physics.
/// The shared call counter survives boxing into the pipeline.
pub struct FixedFractionWeatherer {
    pub name: String,
    pub fraction: f64,
    pub config: WeathererConfig,
    pub needs_environment: bool,
    calls: Arc<AtomicUsize>,
}

impl FixedFractionWeatherer {
    pub fn new(name: impl Into<String>, fraction: f64) -> Self {
        Self {
            name: name.into(),
            fraction,
            config: WeathererConfig::default(),
            needs_environment: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Replace the activation settings.
    pub fn with_config(mut self, config: WeathererConfig) -> Self {
        self.config = config;
        self
    }

    /// Declare an environment requirement.
    pub fn requiring_environment(mut self) -> Self {
        self.needs_environment = true;
        self
    }

    /// Handle to the `weather_elements()` call counter.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl Weatherer for FixedFractionWeatherer {
    fn name(&self) -> &str {
        &self.name
    }

    fn config(&self) -> &WeathererConfig {
        &self.config
    }

    fn requires_environment(&self) -> bool {
        self.needs_environment
    }

    fn initialize_data(&self, _: &mut ElementStore, _: usize) -> Result<(), WeatheringError> {
        Ok(())
    }

    fn weather_elements(&self, ctx: &mut StepContext<'_>) -> Result<MassDelta, WeatheringError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if self.needs_environment {
            ctx.environment()?.get_wind_speed(ctx.model_time())?;
        }
        let mut delta = MassDelta::new();
        for view in ctx.store_mut().iter_active_mut() {
            let before = view.batch.total_mass();
            let mut f = view.batch.fields_mut();
            for i in 0..f.len() {
                for c in f.components_mut(i) {
                    *c *= 1.0 - self.fraction;
                }
                f.resync_mass(i);
            }
            delta.add(view.id, before - view.batch.total_mass());
        }
        Ok(delta)
    }
}

/// Fails deterministically after a configurable number of successful calls.
///
/// Useful for testing rewind and error propagation in the model.
/// Uses `AtomicUsize` for the call counter so it satisfies `Send`.
pub struct FailingWeatherer {
    pub name: String,
    pub succeed_count: usize,
    pub config: WeathererConfig,
    call_count: AtomicUsize,
}

impl FailingWeatherer {
    /// Create a weatherer that succeeds `succeed_count` times then fails.
    pub fn new(name: impl Into<String>, succeed_count: usize) -> Self {
        Self {
            name: name.into(),
            succeed_count,
            config: WeathererConfig::default(),
            call_count: AtomicUsize::new(0),
        }
    }

    /// How many times `weather_elements()` has been called.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Reset the call counter.
    pub fn reset(&self) {
        self.call_count.store(0, Ordering::Relaxed);
    }
}

impl Weatherer for FailingWeatherer {
    fn name(&self) -> &str {
        &self.name
    }

    fn config(&self) -> &WeathererConfig {
        &self.config
    }

    fn initialize_data(&self, _: &mut ElementStore, _: usize) -> Result<(), WeatheringError> {
        Ok(())
    }

    fn weather_elements(&self, _ctx: &mut StepContext<'_>) -> Result<MassDelta, WeatheringError> {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            return Err(WeatheringError::ExecutionFailed {
                reason: format!(
                    "deliberate failure after {} successful calls",
                    self.succeed_count
                ),
            });
        }
        Ok(MassDelta::new())
    }
}
