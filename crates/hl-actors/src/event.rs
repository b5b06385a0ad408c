//! Trace records emitted by actor steps.
//!
//! Every state change an external observer may care about produces exactly
//! one `SimEvent`.  Two runs with the same configuration produce identical
//! event sequences, which is what the determinism tests compare.

use hl_core::{BoxId, DroneId, SimTime, WorkerId};
use hl_logistics::DeliveredBox;

#[derive(Clone, Debug, PartialEq)]
pub enum SimEvent {
    /// A worker finished filling a box.  `fatigue` is the value before the
    /// post-box increment.
    BoxFilled { time: SimTime, worker: WorkerId, box_id: BoxId, fatigue: u32 },

    /// The worker is carrying the box to the collection point itself.
    SelfDeliveryStarted { time: SimTime, worker: WorkerId, box_id: BoxId },

    /// The box went into the shared queue; `queue_len` includes it.
    BoxQueued { time: SimTime, worker: WorkerId, box_id: BoxId, queue_len: usize },

    /// The box went straight to a drone blocked in the queue.
    BoxHandedOff { time: SimTime, worker: WorkerId, box_id: BoxId, drone: DroneId },

    /// A polling drone found the queue empty and will check again later.
    DronePolled { time: SimTime, drone: DroneId },

    /// A polling drone saw a non-empty queue and took off towards it.
    DroneDispatched { time: SimTime, drone: DroneId },

    /// A drone is suspended inside the queue's `get`.
    DroneBlocked { time: SimTime, drone: DroneId },

    /// A drone took ownership of a box (from the queue or a hand-off).
    BoxClaimed { time: SimTime, drone: DroneId, box_id: BoxId },

    BoxDelivered(DeliveredBox),
}

impl SimEvent {
    /// Virtual time at which the event happened.
    pub fn time(&self) -> SimTime {
        match self {
            SimEvent::BoxFilled { time, .. }
            | SimEvent::SelfDeliveryStarted { time, .. }
            | SimEvent::BoxQueued { time, .. }
            | SimEvent::BoxHandedOff { time, .. }
            | SimEvent::DronePolled { time, .. }
            | SimEvent::DroneDispatched { time, .. }
            | SimEvent::DroneBlocked { time, .. }
            | SimEvent::BoxClaimed { time, .. } => *time,
            SimEvent::BoxDelivered(d) => d.delivered_at,
        }
    }
}
