//! `EventClock`: virtual-time priority scheduler.
//!
//! # Ordering
//!
//! Pending events live in a `BTreeMap<SimTime, VecDeque<E>>`.  The map gives
//! the earliest time in O(log T) where T is the number of distinct pending
//! times; the per-time `VecDeque` gives the stable tie-break for free: events
//! scheduled for the same instant come out in the order they were scheduled.
//! That stability is what makes runs reproducible.
//!
//! A zero delay appends to the bucket at `now`, behind everything already
//! waiting there, so the scheduling process is never re-entered within its
//! own step.

use std::collections::{BTreeMap, VecDeque};

use hl_core::SimTime;
use tracing::trace;

use crate::{ClockError, ClockResult};

/// Why [`EventClock::run_until`] stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Events remain, but all of them lie after the deadline.
    DeadlineReached,
    /// Nothing is pending at all.  Not an error: a run with no actors (or
    /// whose actors all block forever) ends this way.
    Quiescent,
}

/// Virtual clock plus the set of pending `(time, event)` pairs.
pub struct EventClock<E> {
    now:       SimTime,
    pending:   BTreeMap<SimTime, VecDeque<E>>,
    /// Cached total event count for O(1) `len()`.
    total:     usize,
    /// Events handed out by `advance` so far.
    processed: u64,
}

impl<E> Default for EventClock<E> {
    fn default() -> Self {
        Self {
            now:       SimTime::ZERO,
            pending:   BTreeMap::new(),
            total:     0,
            processed: 0,
        }
    }
}

impl<E> EventClock<E> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Resume `event` at `now + delay`.  Returns the resume time.
    pub fn schedule_after(&mut self, delay: f64, event: E) -> ClockResult<SimTime> {
        let at = self
            .now
            .checked_add(delay)
            .ok_or(ClockError::InvalidDelay(delay))?;
        self.push(at, event);
        Ok(at)
    }

    /// Resume `event` at the absolute time `at`, which must not be in the past.
    pub fn schedule_at(&mut self, at: SimTime, event: E) -> ClockResult<SimTime> {
        if at < self.now {
            return Err(ClockError::InPast { at, now: self.now });
        }
        self.push(at, event);
        Ok(at)
    }

    fn push(&mut self, at: SimTime, event: E) {
        self.pending.entry(at).or_default().push_back(event);
        self.total += 1;
        trace!(now = %self.now, at = %at, pending = self.total, "scheduled");
    }

    /// Pop the earliest pending event, move `now` to its time, and return it
    /// for the caller to resume.
    ///
    /// Returns `None` (and leaves `now` untouched) if nothing is pending.
    pub fn advance(&mut self) -> Option<E> {
        let mut bucket = self.pending.first_entry()?;
        let at = *bucket.key();
        let event = bucket.get_mut().pop_front();
        if bucket.get().is_empty() {
            bucket.remove();
        }
        let event = event?;

        self.now = at;
        self.total -= 1;
        self.processed += 1;
        trace!(now = %at, remaining = self.total, "advanced");
        Some(event)
    }

    /// Repeatedly advance and hand each event to `resume` while the next
    /// pending time is `<= deadline`.
    ///
    /// `resume` receives the clock so it can schedule follow-up events.  Any
    /// error it returns stops the run immediately and is passed through.
    ///
    /// On a normal return `now` is moved forward to `deadline` (if it was
    /// earlier), so a snapshot taken afterwards reports the deadline.
    pub fn run_until<F, Er>(&mut self, deadline: SimTime, mut resume: F) -> Result<RunOutcome, Er>
    where
        F: FnMut(&mut Self, E) -> Result<(), Er>,
    {
        while self.peek_time().is_some_and(|t| t <= deadline) {
            if let Some(event) = self.advance() {
                resume(self, event)?;
            }
        }

        if deadline > self.now {
            self.now = deadline;
        }
        Ok(if self.is_empty() {
            RunOutcome::Quiescent
        } else {
            RunOutcome::DeadlineReached
        })
    }

    /// Time of the earliest pending event, or `None` if empty.
    #[inline]
    pub fn peek_time(&self) -> Option<SimTime> {
        self.pending.keys().next().copied()
    }

    /// Total number of pending events.
    #[inline]
    pub fn len(&self) -> usize {
        self.total
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of events advanced past since construction.
    #[inline]
    pub fn processed(&self) -> u64 {
        self.processed
    }
}
