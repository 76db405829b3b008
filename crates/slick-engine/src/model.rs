//! The weathering model: explicit simulation context for one run.
//!
//! [`WeatheringModel`] owns the weatherer pipeline, the environment, the
//! element store and the mass-balance ledger. An external stepping loop
//! drives it:
//!
//! ```text
//! prepare_run()                       once per run (also the rewind)
//! loop {
//!     prepare_step(dt, t)             activity + per-step caches
//!     release(..)                     zero or more new elements
//!     initialize_data()               weatherer fields of new elements
//!     step()                          pipeline, ledger, invariant checks
//! }
//! ```
//!
//! # Failure
//!
//! Any step error other than a call-order mistake leaves the model
//! failed: arrays may be half-weathered. Every further call returns
//! [`StepError::RewindRequired`] until [`prepare_run()`](WeatheringModel::prepare_run)
//! rewinds the run.

use std::ops::Range;
use std::time::Instant;

use indexmap::IndexMap;
use slick_core::{Environment, ModelTime, StepError, StepId, SubstanceId, WeatheringError};
use slick_elements::{ElementStore, Release, StoreError};
use slick_weathering::{
    check_conservation, ConservationReport, MassBalance, MassBalanceSnapshot, StepContext,
    Weatherer,
};

use crate::config::{ConfigError, ModelConfig};
use crate::metrics::{StepMetrics, StepReport};

// Compile-time assertion: WeatheringModel is Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<WeatheringModel>();
    }
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RunState {
    Unprepared,
    Running,
    Failed,
}

/// Step parameters fixed by `prepare_step`.
#[derive(Clone, Copy, Debug)]
struct PreparedStep {
    dt: f64,
    model_time: ModelTime,
}

// ── WeatheringModel ─────────────────────────────────────────────────

/// Single-threaded weathering model for one run.
///
/// Created from a [`ModelConfig`] via [`new()`](Self::new); torn down
/// by drop.
///
/// # Example
///
/// ```ignore
/// let mut model = WeatheringModel::new(config)?;
/// model.prepare_run();
/// model.prepare_step(900.0, ModelTime::ZERO)?;
/// model.release(&release)?;
/// model.initialize_data()?;
/// let report = model.step()?;
/// println!("{}", serde_json::to_string(&model.mass_balance())?);
/// ```
pub struct WeatheringModel {
    weatherers: Vec<Box<dyn Weatherer>>,
    environment: Option<Box<dyn Environment>>,
    store: ElementStore,
    ledger: MassBalance,
    time_step: f64,
    start_time: ModelTime,
    end_time: ModelTime,
    tolerance: f64,
    model_time: ModelTime,
    current_step: StepId,
    state: RunState,
    prepared: Option<PreparedStep>,
    /// Per weatherer: active for the prepared step.
    active: Vec<bool>,
    last_metrics: StepMetrics,
}

impl WeatheringModel {
    /// Create a model from a [`ModelConfig`].
    ///
    /// Validates the configuration and registers its substances, in
    /// order, with a fresh element store. Consumes the config.
    pub fn new(config: ModelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let end_time = config.start_time.advance(config.duration);

        let mut store = ElementStore::new();
        for substance in config.substances {
            store.add_substance(substance)?;
        }

        let active = vec![false; config.weatherers.len()];
        Ok(Self {
            weatherers: config.weatherers,
            environment: config.environment,
            store,
            ledger: MassBalance::new(),
            time_step: config.time_step,
            start_time: config.start_time,
            end_time,
            tolerance: config.tolerance,
            model_time: config.start_time,
            current_step: StepId(0),
            state: RunState::Unprepared,
            prepared: None,
            active,
            last_metrics: StepMetrics::default(),
        })
    }

    // ── Run lifecycle ───────────────────────────────────────────────

    /// Start (or rewind) the run.
    ///
    /// Drops every element, resets the ledger to a zero entry per
    /// enabled weatherer, rewinds the clock to the start time and
    /// clears a failed state. Registered substances are kept.
    pub fn prepare_run(&mut self) {
        self.store.clear_elements();
        self.ledger.reset(
            self.weatherers
                .iter()
                .filter(|w| w.config().on)
                .map(|w| w.name()),
        );
        for w in &mut self.weatherers {
            w.prepare_for_run();
        }
        self.model_time = self.start_time;
        self.current_step = StepId(0);
        self.prepared = None;
        self.active.iter_mut().for_each(|a| *a = false);
        self.last_metrics = StepMetrics::default();
        self.state = RunState::Running;

        tracing::info!(
            weatherers = self.weatherers.len(),
            enabled = self.ledger.processes().count(),
            substances = self.store.num_substances(),
            start = %self.start_time,
            end = %self.end_time,
            dt = self.time_step,
            "weathering run prepared"
        );
    }

    /// Fix the duration and start time of the next step.
    ///
    /// Resets the per-step release counters, evaluates each weatherer's
    /// activity at `model_time`, and lets every enabled weatherer
    /// refresh its per-step caches.
    pub fn prepare_step(&mut self, dt: f64, model_time: ModelTime) -> Result<(), StepError> {
        self.check_running()?;
        if !dt.is_finite() || dt <= 0.0 {
            return Err(StepError::InvalidDt { value: dt });
        }
        self.store.begin_step();
        for (w, active) in self.weatherers.iter_mut().zip(&mut self.active) {
            *active = w.config().is_active_at(model_time);
            if w.config().on {
                w.prepare_for_step(dt, model_time);
            }
        }
        self.prepared = Some(PreparedStep { dt, model_time });
        Ok(())
    }

    /// Release new elements into the store.
    ///
    /// The new rows must pass through [`initialize_data()`](Self::initialize_data)
    /// before the next [`step()`](Self::step).
    pub fn release(&mut self, release: &Release) -> Result<Range<usize>, StoreError> {
        self.store.release(release)
    }

    /// Initialize every enabled weatherer's fields for elements released
    /// since the last initialization. Returns how many were initialized.
    pub fn initialize_data(&mut self) -> Result<usize, StepError> {
        self.check_running()?;
        let num_released = self.store.pending_initialization();
        if num_released == 0 {
            return Ok(0);
        }
        for w in &self.weatherers {
            if !w.config().on {
                continue;
            }
            if let Err(reason) = w.initialize_data(&mut self.store, num_released) {
                self.state = RunState::Failed;
                return Err(process_failed(w.name(), reason));
            }
        }
        self.store.mark_initialized();
        tracing::debug!(elements = num_released, "released elements initialized");
        Ok(num_released)
    }

    /// Run one step of the pipeline.
    ///
    /// Calls every active weatherer in pipeline order, folds each
    /// returned delta into the ledger, then checks mass conservation
    /// and the element-store invariants.
    ///
    /// # Errors
    ///
    /// [`StepError::StepNotPrepared`] and [`StepError::UninitializedRelease`]
    /// leave the model untouched. A weatherer failure or a failed
    /// invariant check leaves the model failed until rewound.
    pub fn step(&mut self) -> Result<StepReport, StepError> {
        let step_start = Instant::now();
        self.check_running()?;
        let prepared = self.prepared.ok_or(StepError::StepNotPrepared)?;
        let pending = self.store.pending_initialization();
        if pending > 0 {
            return Err(StepError::UninitializedRelease { pending });
        }
        self.prepared = None;

        let step_id = self.current_step;
        let mut deltas = IndexMap::new();
        let mut skipped = Vec::new();
        let mut weatherer_us = Vec::with_capacity(self.weatherers.len());

        for (w, &active) in self.weatherers.iter().zip(&self.active) {
            if !active {
                skipped.push(w.name().to_string());
                continue;
            }
            let w_start = Instant::now();
            let mut ctx = StepContext::new(
                &mut self.store,
                self.environment.as_deref(),
                step_id,
                prepared.dt,
                prepared.model_time,
            );
            let delta = match w.weather_elements(&mut ctx) {
                Ok(delta) => delta,
                Err(reason) => {
                    self.state = RunState::Failed;
                    return Err(process_failed(w.name(), reason));
                }
            };
            self.ledger.accrue(w.name(), &delta);
            tracing::debug!(
                step = %step_id,
                weatherer = w.name(),
                removed = delta.total(),
                degenerate = delta.total_degenerate(),
                "weatherer applied"
            );
            weatherer_us.push((w.name().to_string(), w_start.elapsed().as_micros() as u64));
            deltas.insert(w.name().to_string(), delta);
        }

        let check_start = Instant::now();
        let conservation = match self.check_invariants() {
            Ok(report) => report,
            Err(e) => {
                self.state = RunState::Failed;
                tracing::error!(step = %step_id, error = %e, "post-step check failed");
                return Err(e);
            }
        };
        let check_us = check_start.elapsed().as_micros() as u64;

        self.model_time = prepared.model_time.advance(prepared.dt);
        self.current_step = StepId(step_id.0 + 1);

        let metrics = StepMetrics {
            total_us: step_start.elapsed().as_micros() as u64,
            weatherer_us,
            check_us,
        };
        self.last_metrics = metrics.clone();

        Ok(StepReport {
            step: step_id,
            model_time: prepared.model_time,
            dt: prepared.dt,
            deltas,
            skipped,
            conservation,
            metrics,
        })
    }

    /// Step with the configured time step until the end of the run.
    ///
    /// Returns the number of steps taken. Intended for runs whose
    /// elements were all released before the first step.
    pub fn run_to_end(&mut self) -> Result<usize, StepError> {
        let mut steps = 0;
        while self.model_time < self.end_time {
            self.prepare_step(self.time_step, self.model_time)?;
            self.initialize_data()?;
            self.step()?;
            steps += 1;
        }
        tracing::info!(steps, end = %self.model_time, "weathering run complete");
        Ok(steps)
    }

    fn check_running(&self) -> Result<(), StepError> {
        match self.state {
            RunState::Running => Ok(()),
            RunState::Unprepared => Err(StepError::RunNotPrepared),
            RunState::Failed => Err(StepError::RewindRequired),
        }
    }

    fn check_invariants(&self) -> Result<ConservationReport, StepError> {
        let report = check_conservation(&self.store, &self.ledger, self.tolerance)?;
        self.store.check_consistency(self.tolerance)?;
        Ok(report)
    }

    // ── Accessors ───────────────────────────────────────────────────

    /// The element store.
    pub fn store(&self) -> &ElementStore {
        &self.store
    }

    /// The mass-balance ledger.
    pub fn ledger(&self) -> &MassBalance {
        &self.ledger
    }

    /// Serializable mass-balance summary of the run so far.
    pub fn mass_balance(&self) -> MassBalanceSnapshot {
        self.ledger.snapshot(&self.store)
    }

    /// Mass `process` has removed from `substance` this run, kg.
    pub fn process_loss(&self, process: &str, substance: SubstanceId) -> f64 {
        self.ledger.process_substance(process, substance)
    }

    /// Start time of the next step.
    pub fn model_time(&self) -> ModelTime {
        self.model_time
    }

    /// ID of the next step.
    pub fn current_step(&self) -> StepId {
        self.current_step
    }

    /// Configured step duration, seconds.
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// End of the configured run.
    pub fn end_time(&self) -> ModelTime {
        self.end_time
    }

    /// Weatherer names in pipeline order.
    pub fn weatherer_names(&self) -> impl Iterator<Item = &str> {
        self.weatherers.iter().map(|w| w.name())
    }

    /// The environment provider, if one is configured.
    pub fn environment(&self) -> Option<&dyn Environment> {
        self.environment.as_deref()
    }

    /// Whether a failed step is waiting for a rewind.
    pub fn needs_rewind(&self) -> bool {
        self.state == RunState::Failed
    }

    /// Metrics from the most recent successful step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }
}

fn process_failed(name: &str, reason: WeatheringError) -> StepError {
    tracing::error!(weatherer = name, error = %reason, "weatherer failed");
    StepError::ProcessFailed {
        name: name.to_string(),
        reason,
    }
}
