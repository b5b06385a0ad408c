//! Simulation observer trait for progress reporting and data collection.

use hl_actors::SimEvent;
use hl_clock::RunOutcome;

use crate::{Frame, Snapshot};

/// Callbacks invoked by [`Simulation`][crate::Simulation] as it advances.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: delivery printer
///
/// ```rust,ignore
/// struct DeliveryPrinter;
///
/// impl SimObserver for DeliveryPrinter {
///     fn on_event(&mut self, event: &SimEvent) {
///         if let SimEvent::BoxDelivered(d) = event {
///             println!("{d}");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called for every event an actor step emitted, in emission order.
    fn on_event(&mut self, _event: &SimEvent) {}

    /// Called after each clock event has been fully processed.
    fn on_step_end(&mut self, _snapshot: &Snapshot) {}

    /// Called on the frame grid (every `frame_interval` of virtual time), if
    /// frame sampling was enabled on the builder.
    ///
    /// A frame at time `t` reflects every event scheduled at `t`.
    fn on_frame(&mut self, _frame: &Frame) {}

    /// Called once when `run`/`run_to` returns normally.
    fn on_run_end(&mut self, _snapshot: &Snapshot, _outcome: RunOutcome) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Keeps everything it is shown.  Handy in tests and for post-hoc analysis
/// of short runs.
#[derive(Debug, Default)]
pub struct TraceRecorder {
    pub events:    Vec<SimEvent>,
    pub snapshots: Vec<Snapshot>,
    pub frames:    Vec<Frame>,
    pub outcome:   Option<RunOutcome>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SimObserver for TraceRecorder {
    fn on_event(&mut self, event: &SimEvent) {
        self.events.push(event.clone());
    }

    fn on_step_end(&mut self, snapshot: &Snapshot) {
        self.snapshots.push(*snapshot);
    }

    fn on_frame(&mut self, frame: &Frame) {
        self.frames.push(frame.clone());
    }

    fn on_run_end(&mut self, snapshot: &Snapshot, outcome: RunOutcome) {
        self.snapshots.push(*snapshot);
        self.outcome = Some(outcome);
    }
}
