//! The [`Weatherer`] trait.
//!
//! Weatherers are stateful process objects executed in pipeline order
//! each step. They initialize their own per-element fields when elements
//! are released and report the mass they remove so the driver can keep
//! the mass-balance ledger.

use crate::config::WeathererConfig;
use crate::context::StepContext;
use crate::delta::MassDelta;
use slick_core::{ModelTime, WeatheringError};
use slick_elements::ElementStore;

/// One weathering process in the per-step pipeline.
///
/// # Contract
///
/// - `weather_elements()` MUST be deterministic: same inputs produce
///   identical outputs.
/// - It MUST keep every element's component masses summing to its total
///   mass, and the returned [`MassDelta`] MUST equal the mass it removed.
/// - The driver only calls `weather_elements()` while
///   [`config().is_active_at(t)`](WeathererConfig::is_active_at) holds;
///   implementations need not re-check the window.
/// - `name()` is the ledger key and must be unique in a pipeline.
///
/// # Object safety
///
/// This trait is object-safe; the engine stores weatherers as
/// `Vec<Box<dyn Weatherer>>`.
///
/// # Examples
///
/// A process that removes nothing:
///
/// ```
/// use slick_core::WeatheringError;
/// use slick_elements::ElementStore;
/// use slick_weathering::{MassDelta, StepContext, Weatherer, WeathererConfig};
///
/// struct Inert {
///     config: WeathererConfig,
/// }
///
/// impl Weatherer for Inert {
///     fn name(&self) -> &str { "inert" }
///
///     fn config(&self) -> &WeathererConfig { &self.config }
///
///     fn initialize_data(
///         &self,
///         _store: &mut ElementStore,
///         _num_released: usize,
///     ) -> Result<(), WeatheringError> {
///         Ok(())
///     }
///
///     fn weather_elements(&self, _ctx: &mut StepContext<'_>) -> Result<MassDelta, WeatheringError> {
///         Ok(MassDelta::new())
///     }
/// }
///
/// let w = Inert { config: WeathererConfig::default() };
/// assert_eq!(w.name(), "inert");
/// ```
pub trait Weatherer: Send + 'static {
    /// Ledger key and name used in errors and logs.
    fn name(&self) -> &str;

    /// On/off switch and active window.
    fn config(&self) -> &WeathererConfig;

    /// Whether the process queries the environment.
    ///
    /// Checked at configuration time: an enabled process returning
    /// `true` needs an environment provider covering the run.
    fn requires_environment(&self) -> bool {
        false
    }

    /// Reset per-run state. Called once by `prepare_run`.
    fn prepare_for_run(&mut self) {}

    /// Refresh per-step caches. Called once per step for enabled
    /// processes, before initialization and stepping.
    fn prepare_for_step(&mut self, _dt: f64, _model_time: ModelTime) {}

    /// Initialize this process's per-element fields for the
    /// `num_released` elements released since the last step.
    ///
    /// Called for enabled processes regardless of the active window.
    fn initialize_data(
        &self,
        store: &mut ElementStore,
        num_released: usize,
    ) -> Result<(), WeatheringError>;

    /// Apply one step of the process and report the mass removed.
    fn weather_elements(&self, ctx: &mut StepContext<'_>) -> Result<MassDelta, WeatheringError>;
}
