//! `SharedBoxQueue`: the FIFO of full boxes and its waiting consumers.
//!
//! # Contract
//!
//! The queue is two FIFOs that are never both non-empty:
//!
//! - `items`: boxes nobody has claimed yet,
//! - `waiters`: drones that called `get` on an empty queue and are suspended.
//!
//! `put` serves the oldest waiter directly and never leaves a served box in
//! `items`; `get` pops the oldest box or registers the caller as a waiter.
//! Resuming a served waiter is the caller's job (it owns the clock): the
//! returned [`PutOutcome::HandedOff`] carries the box to resume it with.
//!
//! There is no non-blocking pop.  Taking from an empty queue is
//! only expressible as "become a waiter".

use std::collections::VecDeque;

use hl_core::DroneId;
use tracing::trace;

use crate::HarvestBox;

/// Result of [`SharedBoxQueue::put`].
#[derive(Debug, PartialEq)]
#[must_use = "a handed-off box must be delivered to the waiting drone"]
pub enum PutOutcome {
    /// No one was waiting; the box is now at the back of the queue.
    Queued { len: usize },
    /// The oldest waiter was removed from the registry and must be resumed
    /// now, holding `harvest_box`.
    HandedOff { drone: DroneId, harvest_box: HarvestBox },
}

#[derive(Debug, Default)]
pub struct SharedBoxQueue {
    items:   VecDeque<HarvestBox>,
    waiters: VecDeque<DroneId>,
}

impl SharedBoxQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a box.  O(1); never blocks.
    pub fn put(&mut self, harvest_box: HarvestBox) -> PutOutcome {
        match self.waiters.pop_front() {
            Some(drone) => {
                debug_assert!(self.items.is_empty(), "waiters registered on a non-empty queue");
                trace!(box_id = %harvest_box.id, %drone, "handed off to waiter");
                PutOutcome::HandedOff { drone, harvest_box }
            }
            None => {
                self.items.push_back(harvest_box);
                PutOutcome::Queued { len: self.items.len() }
            }
        }
    }

    /// Take the oldest box, or register `waiter` to be served by a later
    /// `put` and return `None`.
    ///
    /// A waiter that gets `None` must suspend without rescheduling itself;
    /// it will be resumed exactly once, with a box, by the caller of `put`.
    pub fn get(&mut self, waiter: DroneId) -> Option<HarvestBox> {
        let taken = self.items.pop_front();
        if taken.is_none() {
            debug_assert!(!self.waiters.contains(&waiter), "{waiter} registered twice");
            trace!(%waiter, waiting = self.waiters.len() + 1, "registered waiter");
            self.waiters.push_back(waiter);
        }
        taken
    }

    /// Number of boxes waiting for a drone.  Observability only: deciding
    /// to act on this value in a later step is racy.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drones currently suspended in `get`, oldest first.
    pub fn waiting(&self) -> impl ExactSizeIterator<Item = DroneId> + '_ {
        self.waiters.iter().copied()
    }

    /// Boxes in the queue, front (next to be taken) first.
    pub fn boxes(&self) -> impl ExactSizeIterator<Item = &HarvestBox> + '_ {
        self.items.iter()
    }
}
