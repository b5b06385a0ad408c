//! One straight-line travel leg.

use hl_core::{Location, SimTime};

/// A leg recorded when an actor departs, so a renderer sampling any instant
/// between the departure and arrival events can place it on the line.
///
/// The simulation itself only uses the endpoints: the actor's location jumps
/// to `to` when its arrival wake is processed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Travel {
    pub from:   Location,
    pub to:     Location,
    pub depart: SimTime,
    pub arrive: SimTime,
}

impl Travel {
    /// Fraction of the leg completed at `now`, in `[0.0, 1.0]`.
    ///
    /// Zero-length legs (in time) count as complete.
    pub fn progress(&self, now: SimTime) -> f64 {
        let total = self.arrive.since(self.depart);
        if total <= 0.0 {
            return 1.0;
        }
        (now.since(self.depart) / total).clamp(0.0, 1.0)
    }

    /// Interpolated position at `now`.
    #[inline]
    pub fn position_at(&self, now: SimTime) -> Location {
        self.from.lerp(self.to, self.progress(now))
    }
}
