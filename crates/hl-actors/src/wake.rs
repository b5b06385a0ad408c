//! The clock's event payload.

use hl_core::{DroneId, WorkerId};
use hl_logistics::HarvestBox;

/// Which suspended process to resume, and with what.
///
/// A timed wait resumes with nothing; a drone blocked in the queue is resumed
/// with the box a worker's `put` handed it.
#[derive(Debug, PartialEq)]
pub enum Wake {
    Worker(WorkerId),
    Drone(DroneId),
    Handoff { drone: DroneId, harvest_box: HarvestBox },
}
