//! Simulation configuration.
//!
//! `HarvestConfig` is the whole configuration surface of a run: actor
//! counts, the fatigue threshold, the deadline, the drone wake policy, the
//! service-time parameters, and the field layout.  It is a plain value; the
//! application crate fills it (from CLI flags, a file, …) and hands it to
//! `hl_sim::SimBuilder`, which calls [`HarvestConfig::validate`] before any
//! simulation state is created.

use std::fmt;
use std::str::FromStr;

use crate::{HlError, HlResult, Location, TravelTime};

// ── WakePolicy ────────────────────────────────────────────────────────────────

/// Discipline governing when an idle drone resumes work.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WakePolicy {
    /// Re-check the queue every `poll_interval`; fly to the queue when it is
    /// non-empty and take a box on arrival.  The check and the take are
    /// separate steps, so another drone can drain the queue in between.
    #[default]
    Polling,
    /// Idle passively as a queue waiter; the next `put` hands the box over
    /// directly.  Dispatch is FIFO and no poll ticks are wasted.
    Signal,
}

impl WakePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            WakePolicy::Polling => "polling",
            WakePolicy::Signal  => "signal",
        }
    }
}

impl fmt::Display for WakePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WakePolicy {
    type Err = HlError;

    fn from_str(s: &str) -> HlResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "polling" | "poll" => Ok(WakePolicy::Polling),
            "signal"           => Ok(WakePolicy::Signal),
            other => Err(HlError::InvalidConfiguration(format!(
                "unknown wake policy {other:?} (expected \"polling\" or \"signal\")"
            ))),
        }
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

/// Where things sit in the field.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Layout {
    /// Drop-off point for every box.  Drones start here.
    pub collection_point: Location,
    /// Where the shared queue of full boxes is kept; drones fly here to pick up.
    pub queue_site: Location,
    /// Position of worker 0.
    pub worker_origin: Location,
    /// Workers are placed in a row along x, this far apart.
    pub worker_spacing: f64,
}

impl Layout {
    /// Position of the `i`th worker.
    #[inline]
    pub fn worker_location(&self, i: usize) -> Location {
        self.worker_origin.offset(i as f64 * self.worker_spacing, 0.0)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            collection_point: Location::new(18.0, 6.0),
            queue_site:       Location::new(4.0, 6.0),
            worker_origin:    Location::new(2.0, 2.0),
            worker_spacing:   1.5,
        }
    }
}

// ── HarvestConfig ─────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HarvestConfig {
    /// Number of field workers.  Zero is allowed (nothing is ever produced).
    pub num_workers: usize,

    /// Number of drones.  Zero is allowed (the queue only grows).
    pub num_drones: usize,

    /// A worker self-delivers while `fatigue < fatigue_threshold`.  Must be
    /// at least 1.
    pub fatigue_threshold: u32,

    /// Deadline used by `Simulation::run`, in virtual time units.
    pub sim_time: f64,

    /// Drone wake discipline.
    pub wake_policy: WakePolicy,

    /// Harvest time of a fresh worker.  Default: 10.
    pub base_harvest_time: f64,

    /// Extra harvest time per fatigue point (linear, unbounded).  Default: 0.5.
    pub fatigue_penalty: f64,

    /// Upper bound of a uniform random extra harvest time drawn per box.
    /// Default: 0 (no randomness).
    pub harvest_jitter: f64,

    /// Worker self-delivery leg, worker → collection point.  Default: fixed 12.
    pub worker_transport: TravelTime,

    /// Drone leg to the queue site.  Default: fixed 3.
    pub drone_arrival: TravelTime,

    /// Drone leg queue site → collection point.  Default: fixed 5.
    pub drone_transport: TravelTime,

    /// Re-check interval of polling drones.  Default: 1.
    pub poll_interval: f64,

    /// Master seed for per-worker RNGs.
    pub seed: u64,

    pub layout: Layout,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            num_workers:       5,
            num_drones:        2,
            fatigue_threshold: 3,
            sim_time:          60.0,
            wake_policy:       WakePolicy::Polling,
            base_harvest_time: 10.0,
            fatigue_penalty:   0.5,
            harvest_jitter:    0.0,
            worker_transport:  TravelTime::Fixed(12.0),
            drone_arrival:     TravelTime::Fixed(3.0),
            drone_transport:   TravelTime::Fixed(5.0),
            poll_interval:     1.0,
            seed:              42,
            layout:            Layout::default(),
        }
    }
}

impl HarvestConfig {
    /// Check every field; the first violation is reported as
    /// [`HlError::InvalidConfiguration`].
    pub fn validate(&self) -> HlResult<()> {
        fn bad(msg: impl Into<String>) -> HlResult<()> {
            Err(HlError::InvalidConfiguration(msg.into()))
        }

        if self.fatigue_threshold == 0 {
            return bad("fatigue_threshold must be >= 1");
        }
        if !self.sim_time.is_finite() || self.sim_time <= 0.0 {
            return bad(format!("sim_time must be finite and > 0, got {}", self.sim_time));
        }
        if !self.base_harvest_time.is_finite() || self.base_harvest_time <= 0.0 {
            return bad(format!(
                "base_harvest_time must be finite and > 0, got {}",
                self.base_harvest_time
            ));
        }
        if !self.fatigue_penalty.is_finite() || self.fatigue_penalty < 0.0 {
            return bad(format!(
                "fatigue_penalty must be finite and >= 0, got {}",
                self.fatigue_penalty
            ));
        }
        if !self.harvest_jitter.is_finite() || self.harvest_jitter < 0.0 {
            return bad(format!(
                "harvest_jitter must be finite and >= 0, got {}",
                self.harvest_jitter
            ));
        }
        if !self.poll_interval.is_finite() || self.poll_interval <= 0.0 {
            return bad(format!(
                "poll_interval must be finite and > 0, got {}",
                self.poll_interval
            ));
        }
        for (name, travel) in [
            ("worker_transport", self.worker_transport),
            ("drone_arrival",    self.drone_arrival),
            ("drone_transport",  self.drone_transport),
        ] {
            if let Some(reason) = travel.problem() {
                return bad(format!("{name}: {reason}, got {travel}"));
            }
        }
        let l = &self.layout;
        if !(l.collection_point.is_finite()
            && l.queue_site.is_finite()
            && l.worker_origin.is_finite()
            && l.worker_spacing.is_finite())
        {
            return bad("layout coordinates must be finite");
        }
        Ok(())
    }

    /// Harvest time (before jitter) for a worker at `fatigue`.
    #[inline]
    pub fn harvest_time(&self, fatigue: u32) -> f64 {
        self.base_harvest_time + fatigue as f64 * self.fatigue_penalty
    }
}
