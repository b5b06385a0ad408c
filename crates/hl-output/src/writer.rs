//! The `OutputWriter` trait implemented by all backend writers.

use hl_sim::Frame;

use crate::{DeliveryRow, OutputResult, SnapshotRow};

/// Trait implemented by the CSV and JSON Lines writers.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    fn write_snapshot(&mut self, row: &SnapshotRow) -> OutputResult<()>;

    fn write_delivery(&mut self, row: &DeliveryRow) -> OutputResult<()>;

    /// Write one position frame.  Backends without a place for frames keep
    /// the default, which drops it.
    fn write_frame(&mut self, _frame: &Frame) -> OutputResult<()> {
        Ok(())
    }

    /// Flush and close all underlying handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
