//! Read-only views of a running simulation.

use hl_actors::Field;
use hl_core::{Location, SimTime, WakePolicy};

/// Aggregate state at one instant: the minimal interface a dashboard polls.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Snapshot {
    pub time:            f64,
    pub queue_length:    usize,
    pub delivered_count: usize,
}

impl Snapshot {
    pub(crate) fn of(field: &Field, now: SimTime) -> Self {
        Self {
            time:            now.as_f64(),
            queue_length:    field.queue().len(),
            delivered_count: field.collection_point().delivered_count(),
        }
    }

    /// Same counters, ignoring time.  Used to suppress duplicate rows.
    #[inline]
    pub fn same_counts(&self, other: &Snapshot) -> bool {
        self.queue_length == other.queue_length && self.delivered_count == other.delivered_count
    }
}

/// Actor positions at one instant, for rendering.
///
/// Drone positions are interpolated along the leg in progress; workers and
/// collection points never move.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Frame {
    pub time:              f64,
    pub workers:           Vec<Location>,
    pub drones:            Vec<Location>,
    pub collection_points: Vec<Location>,
}

impl Frame {
    pub(crate) fn of(field: &Field, at: SimTime) -> Self {
        Self {
            time:              at.as_f64(),
            workers:           field.workers().iter().map(|w| w.location()).collect(),
            drones:            field.drones().iter().map(|d| d.position_at(at)).collect(),
            collection_points: vec![field.collection_point().location()],
        }
    }
}

/// End-of-run statistics, one row of a parameter sweep.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RunSummary {
    pub snapshot:          Snapshot,
    pub num_workers:       usize,
    pub num_drones:        usize,
    pub fatigue_threshold: u32,
    pub wake_policy:       WakePolicy,
    pub boxes_created:     u64,
    pub self_delivered:    usize,
    pub drone_delivered:   usize,
    /// Drones suspended in the queue when the run stopped.
    pub waiting_drones:    usize,
    pub events_processed:  u64,
    /// Mean filled-to-delivered time, `None` before the first delivery.
    pub mean_lead_time:    Option<f64>,
}

impl RunSummary {
    pub(crate) fn of(field: &Field, now: SimTime, events_processed: u64) -> Self {
        let config = field.config();
        let cp = field.collection_point();
        let history = cp.history();
        let mean_lead_time = (!history.is_empty())
            .then(|| history.iter().map(|d| d.lead_time()).sum::<f64>() / history.len() as f64);

        Self {
            snapshot:          Snapshot::of(field, now),
            num_workers:       config.num_workers,
            num_drones:        config.num_drones,
            fatigue_threshold: config.fatigue_threshold,
            wake_policy:       config.wake_policy,
            boxes_created:     field.boxes_created(),
            self_delivered:    cp.delivered_by_workers(),
            drone_delivered:   cp.delivered_by_drones(),
            waiting_drones:    field.queue().waiting().len(),
            events_processed,
            mean_lead_time,
        }
    }

    /// Boxes filled but not yet delivered: queued, in a drone, or being
    /// carried by a worker.
    pub fn in_flight(&self) -> u64 {
        self.boxes_created - self.snapshot.delivered_count as u64
    }
}
