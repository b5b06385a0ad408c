//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use hl_actors::SimEvent;
use hl_sim::{Frame, RunOutcome, SimObserver, Snapshot};

use crate::row::{DeliveryRow, SnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes deliveries, snapshots and frames to any
/// [`OutputWriter`] backend.
///
/// A step snapshot is written only when the queue length or delivered count
/// changed since the last written row; the end-of-run snapshot is written
/// unless it repeats the last row exactly.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:        W,
    last_snapshot: Option<Snapshot>,
    last_error:    Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            last_snapshot: None,
            last_error:    None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn write_snapshot(&mut self, snapshot: &Snapshot) {
        let result = self.writer.write_snapshot(&SnapshotRow::from(snapshot));
        self.store_err(result);
        self.last_snapshot = Some(*snapshot);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_event(&mut self, event: &SimEvent) {
        if let SimEvent::BoxDelivered(delivered) = event {
            let result = self.writer.write_delivery(&DeliveryRow::from(delivered));
            self.store_err(result);
        }
    }

    fn on_step_end(&mut self, snapshot: &Snapshot) {
        if self.last_snapshot.is_none_or(|last| !last.same_counts(snapshot)) {
            self.write_snapshot(snapshot);
        }
    }

    fn on_frame(&mut self, frame: &Frame) {
        let result = self.writer.write_frame(frame);
        self.store_err(result);
    }

    fn on_run_end(&mut self, snapshot: &Snapshot, _outcome: RunOutcome) {
        if self.last_snapshot.as_ref() != Some(snapshot) {
            self.write_snapshot(snapshot);
        }
        let result = self.writer.finish();
        self.store_err(result);
    }
}
