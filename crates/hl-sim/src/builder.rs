//! Fluent builder for constructing a [`Simulation`].

use hl_actors::Field;
use hl_clock::EventClock;
use hl_core::{HarvestConfig, HlError};
use tracing::debug;

use crate::sim::FrameSampler;
use crate::{SimResult, Simulation};

/// Fluent builder for [`Simulation`].
///
/// # Optional inputs
///
/// | Method                 | Default            |
/// |------------------------|--------------------|
/// | `.frame_interval(dt)`  | No frame sampling  |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(HarvestConfig::default())
///     .frame_interval(0.5)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:         HarvestConfig,
    frame_interval: Option<f64>,
}

impl SimBuilder {
    pub fn new(config: HarvestConfig) -> Self {
        Self { config, frame_interval: None }
    }

    /// Emit a [`Frame`][crate::Frame] to the observer every `dt` units of
    /// virtual time, starting at 0.
    pub fn frame_interval(mut self, dt: f64) -> Self {
        self.frame_interval = Some(dt);
        self
    }

    /// Validate, lay out the field, and register every actor at time 0.
    ///
    /// Nothing has run yet when this returns; the first `step`/`run` call
    /// processes the time-0 wakes.
    pub fn build(self) -> SimResult<Simulation> {
        self.config.validate()?;
        if let Some(dt) = self.frame_interval.filter(|dt| !(dt.is_finite() && *dt > 0.0)) {
            return Err(HlError::InvalidConfiguration(format!(
                "frame_interval must be positive and finite, got {dt}"
            ))
            .into());
        }

        let field = Field::new(self.config);
        let mut clock = EventClock::new();
        field.seed(&mut clock)?;
        debug!(
            workers = field.workers().len(),
            drones  = field.drones().len(),
            policy  = %field.config().wake_policy,
            "simulation built"
        );

        Ok(Simulation::new(clock, field, self.frame_interval.map(FrameSampler::new)))
    }
}
