//! Plain data row types written by output backends.

use hl_logistics::DeliveredBox;
use hl_sim::Snapshot;
use serde::Serialize;

/// Aggregate state at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SnapshotRow {
    pub time:            f64,
    pub queue_length:    u64,
    pub delivered_count: u64,
}

impl From<&Snapshot> for SnapshotRow {
    fn from(s: &Snapshot) -> Self {
        Self {
            time:            s.time,
            queue_length:    s.queue_length as u64,
            delivered_count: s.delivered_count as u64,
        }
    }
}

/// One box as recorded by the collection point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeliveryRow {
    pub box_id:       u64,
    /// Worker that filled the box.
    pub creator:      u32,
    pub created_at:   f64,
    pub delivered_at: f64,
    /// `"worker"` or `"drone"`.
    pub courier:      &'static str,
    pub courier_id:   u32,
}

impl From<&DeliveredBox> for DeliveryRow {
    fn from(d: &DeliveredBox) -> Self {
        Self {
            box_id:       d.id.0,
            creator:      d.creator.0,
            created_at:   d.created_at.as_f64(),
            delivered_at: d.delivered_at.as_f64(),
            courier:      d.delivered_by.kind(),
            courier_id:   d.delivered_by.raw_id(),
        }
    }
}
