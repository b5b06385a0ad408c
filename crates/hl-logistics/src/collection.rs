//! The collection point and its delivery history.

use hl_core::Location;
use tracing::debug;

use crate::DeliveredBox;

/// Fixed drop-off location with an append-only history.
///
/// History order is delivery-completion order, not creation order.
#[derive(Debug)]
pub struct CollectionPoint {
    location:  Location,
    history:   Vec<DeliveredBox>,
    by_drones: usize,
}

impl CollectionPoint {
    pub fn new(location: Location) -> Self {
        Self { location, history: Vec::new(), by_drones: 0 }
    }

    #[inline]
    pub fn location(&self) -> Location {
        self.location
    }

    /// Append a delivered box.  The only mutation.
    pub fn receive(&mut self, delivered: DeliveredBox) {
        debug!(box_id = %delivered.id, by = %delivered.delivered_by, at = %delivered.delivered_at, "delivered");
        if delivered.delivered_by.is_drone() {
            self.by_drones += 1;
        }
        self.history.push(delivered);
    }

    /// Everything delivered so far, oldest delivery first.
    #[inline]
    pub fn history(&self) -> &[DeliveredBox] {
        &self.history
    }

    #[inline]
    pub fn delivered_count(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn delivered_by_drones(&self) -> usize {
        self.by_drones
    }

    #[inline]
    pub fn delivered_by_workers(&self) -> usize {
        self.history.len() - self.by_drones
    }

    /// Most recent delivery, if any.
    #[inline]
    pub fn last(&self) -> Option<&DeliveredBox> {
        self.history.last()
    }
}
