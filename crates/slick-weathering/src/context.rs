//! Execution context passed to weatherers during a step.

use slick_core::{Environment, ModelTime, StepId, WeatheringError};
use slick_elements::ElementStore;

/// Execution context passed to each weatherer's
/// [`weather_elements()`](crate::Weatherer::weather_elements) call.
///
/// Holds the exclusive borrow of the element store for the duration of
/// one process. The environment is a shared borrow with the same
/// lifetime, so a process can hold it while iterating the store mutably.
pub struct StepContext<'a> {
    store: &'a mut ElementStore,
    environment: Option<&'a dyn Environment>,
    step_id: StepId,
    dt: f64,
    model_time: ModelTime,
}

impl<'a> StepContext<'a> {
    /// Construct a new step context.
    ///
    /// Typically called by the engine. Tests construct one directly
    /// around a fixture store and a mock environment.
    pub fn new(
        store: &'a mut ElementStore,
        environment: Option<&'a dyn Environment>,
        step_id: StepId,
        dt: f64,
        model_time: ModelTime,
    ) -> Self {
        Self {
            store,
            environment,
            step_id,
            dt,
            model_time,
        }
    }

    /// The element store.
    pub fn store(&self) -> &ElementStore {
        self.store
    }

    /// Mutable element store.
    pub fn store_mut(&mut self) -> &mut ElementStore {
        self.store
    }

    /// The environment provider.
    ///
    /// # Errors
    ///
    /// [`WeatheringError::MissingEnvironment`] if the run has none.
    pub fn environment(&self) -> Result<&'a dyn Environment, WeatheringError> {
        self.environment.ok_or(WeatheringError::MissingEnvironment)
    }

    /// Current step ID.
    pub fn step_id(&self) -> StepId {
        self.step_id
    }

    /// Step duration in seconds.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Simulated time at the start of the step.
    pub fn model_time(&self) -> ModelTime {
        self.model_time
    }
}
