//! Box records.

use std::fmt;

use hl_core::{BoxId, DroneId, SimTime, WorkerId};

/// Who carried a box to the collection point.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "id", rename_all = "snake_case"))]
pub enum Courier {
    Worker(WorkerId),
    Drone(DroneId),
}

impl Courier {
    #[inline]
    pub fn is_drone(self) -> bool {
        matches!(self, Courier::Drone(_))
    }

    /// `"worker"` or `"drone"`, for CSV columns.
    pub fn kind(self) -> &'static str {
        match self {
            Courier::Worker(_) => "worker",
            Courier::Drone(_)  => "drone",
        }
    }

    /// Numeric id of the courier within its kind.
    pub fn raw_id(self) -> u32 {
        match self {
            Courier::Worker(w) => w.0,
            Courier::Drone(d)  => d.0,
        }
    }
}

impl fmt::Display for Courier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Courier::Worker(w) => w.fmt(f),
            Courier::Drone(d)  => d.fmt(f),
        }
    }
}

/// A filled box that has not reached the collection point yet.
///
/// Not `Clone`: the value is the box.
#[derive(Debug, PartialEq)]
pub struct HarvestBox {
    pub id:         BoxId,
    pub creator:    WorkerId,
    pub created_at: SimTime,
}

impl HarvestBox {
    pub fn new(id: BoxId, creator: WorkerId, created_at: SimTime) -> Self {
        Self { id, creator, created_at }
    }

    /// Consume the box, stamping the delivery.
    ///
    /// Delivery can never precede creation: every path from creation to
    /// delivery goes through the event clock, whose time never decreases.
    pub fn deliver(self, at: SimTime, by: Courier) -> DeliveredBox {
        debug_assert!(at >= self.created_at, "{} delivered before it was filled", self.id);
        DeliveredBox {
            id:           self.id,
            creator:      self.creator,
            created_at:   self.created_at,
            delivered_at: at,
            delivered_by: by,
        }
    }
}

/// An immutable record in the collection point's history.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeliveredBox {
    pub id:           BoxId,
    pub creator:      WorkerId,
    pub created_at:   SimTime,
    pub delivered_at: SimTime,
    pub delivered_by: Courier,
}

impl DeliveredBox {
    /// Virtual time from filling to drop-off.
    #[inline]
    pub fn lead_time(&self) -> f64 {
        self.delivered_at.since(self.created_at)
    }
}

impl fmt::Display for DeliveredBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (by {}, filled {}, delivered {} by {})",
            self.id, self.creator, self.created_at, self.delivered_at, self.delivered_by
        )
    }
}
