//! The `Simulation` struct and its event loop.

use hl_actors::{Field, SimEvent, Wake};
use hl_clock::{EventClock, RunOutcome};
use hl_core::SimTime;
use tracing::info;

use crate::{Frame, RunSummary, SimObserver, SimResult, Snapshot};

// ── Frame sampling ────────────────────────────────────────────────────────────

/// Fixed grid of frame times `k * interval`, k = 0, 1, 2, …
///
/// Times are computed from the index rather than accumulated, so the grid
/// does not drift over long runs.
pub(crate) struct FrameSampler {
    interval: f64,
    emitted:  u64,
}

impl FrameSampler {
    pub(crate) fn new(interval: f64) -> Self {
        Self { interval, emitted: 0 }
    }

    /// Emit every grid frame before `upto` (or up to and including it when
    /// `inclusive`), sampling `field` as it is now.
    fn emit_until<O: SimObserver>(
        &mut self,
        field:     &Field,
        upto:      SimTime,
        inclusive: bool,
        observer:  &mut O,
    ) {
        loop {
            let t = self.emitted as f64 * self.interval;
            let due = if inclusive { t <= upto.as_f64() } else { t < upto.as_f64() };
            if !due {
                break;
            }
            if let Ok(at) = SimTime::new(t) {
                observer.on_frame(&Frame::of(field, at));
            }
            self.emitted += 1;
        }
    }
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Owns the event clock and the [`Field`].  Each clock event resumes exactly
/// one actor; the actor's emitted [`SimEvent`]s are forwarded to the observer
/// before the next event is taken, followed by a [`Snapshot`].
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Simulation {
    clock:  EventClock<Wake>,
    field:  Field,
    frames: Option<FrameSampler>,
    /// Scratch buffer reused across steps.
    events: Vec<SimEvent>,
}

impl Simulation {
    pub(crate) fn new(clock: EventClock<Wake>, field: Field, frames: Option<FrameSampler>) -> Self {
        Self { clock, field, frames, events: Vec::new() }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run to `config.sim_time`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunOutcome> {
        let deadline = self.field.config().sim_time;
        self.run_to(deadline, observer)
    }

    /// Process every event at or before `deadline`, then move the clock to
    /// `deadline`.
    ///
    /// May be called repeatedly with increasing deadlines to continue a run.
    /// A deadline before the current time processes nothing.
    pub fn run_to<O: SimObserver>(&mut self, deadline: f64, observer: &mut O) -> SimResult<RunOutcome> {
        let deadline = SimTime::new(deadline)?;
        info!(from = %self.clock.now(), to = %deadline, pending = self.clock.len(), "run started");

        // Explicit field borrows so the borrow checker sees disjoint access.
        let Simulation { clock, field, frames, events } = self;
        let outcome = clock.run_until(deadline, |clock, wake| {
            Self::process(clock, field, frames, events, wake, observer)
        })?;
        if let Some(sampler) = frames.as_mut() {
            sampler.emit_until(field, deadline, true, observer);
        }

        let snapshot = self.snapshot();
        info!(
            at        = %self.clock.now(),
            delivered = snapshot.delivered_count,
            queued    = snapshot.queue_length,
            processed = self.clock.processed(),
            ?outcome,
            "run finished"
        );
        observer.on_run_end(&snapshot, outcome);
        Ok(outcome)
    }

    /// Advance exactly one clock event.  Returns `false` if nothing was
    /// pending (the clock is untouched).
    ///
    /// Does not call `on_run_end`.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<bool> {
        let Simulation { clock, field, frames, events } = self;
        let Some(wake) = clock.advance() else {
            return Ok(false);
        };
        Self::process(clock, field, frames, events, wake, observer)?;
        Ok(true)
    }

    /// Resume one actor at the clock's current time and report what it did.
    fn process<O: SimObserver>(
        clock:    &mut EventClock<Wake>,
        field:    &mut Field,
        frames:   &mut Option<FrameSampler>,
        events:   &mut Vec<SimEvent>,
        wake:     Wake,
        observer: &mut O,
    ) -> SimResult<()> {
        let now = clock.now();
        // Frames strictly before `now` see the state left by earlier events.
        if let Some(sampler) = frames.as_mut() {
            sampler.emit_until(field, now, false, observer);
        }

        if let Err(err) = field.resume(clock, wake, events) {
            // Nothing from a failed step reaches the observer.
            events.clear();
            return Err(err.into());
        }
        for event in events.drain(..) {
            observer.on_event(&event);
        }
        observer.on_step_end(&Snapshot::of(field, clock.now()));
        Ok(())
    }

    // ── Read access ───────────────────────────────────────────────────────

    /// Queue length and delivered count at the current virtual time.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.field, self.clock.now())
    }

    /// Actor positions at the current virtual time.
    pub fn frame(&self) -> Frame {
        Frame::of(&self.field, self.clock.now())
    }

    /// Actor positions at `at`, interpolating legs in progress.
    ///
    /// Only meaningful for `at` between the last processed event and the next
    /// pending one; outside that window drones are clamped to their leg ends.
    pub fn frame_at(&self, at: SimTime) -> Frame {
        Frame::of(&self.field, at)
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary::of(&self.field, self.clock.now(), self.clock.processed())
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    /// Time of the next pending event.
    #[inline]
    pub fn next_event_time(&self) -> Option<SimTime> {
        self.clock.peek_time()
    }

    #[inline]
    pub fn pending_events(&self) -> usize {
        self.clock.len()
    }

    #[inline]
    pub fn field(&self) -> &Field {
        &self.field
    }
}
