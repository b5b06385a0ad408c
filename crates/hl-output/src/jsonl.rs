//! JSON Lines output backend.
//!
//! One object per line, tagged with `kind`:
//!
//! ```text
//! {"kind":"snapshot","time":22.0,"queue_length":0,"delivered_count":1}
//! {"kind":"delivery","box_id":0,"creator":0,"created_at":10.0,"delivered_at":22.0,"courier":"worker","courier_id":0}
//! {"kind":"frame","time":0.5,"workers":[{"x":2.0,"y":2.0}],"drones":[...],"collection_points":[...]}
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use hl_sim::Frame;
use serde::Serialize;

use crate::writer::OutputWriter;
use crate::{DeliveryRow, OutputResult, SnapshotRow};

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Record<'a> {
    Snapshot(&'a SnapshotRow),
    Delivery(&'a DeliveryRow),
    Frame(&'a Frame),
}

/// Streams every record, frames included, to one writer.
pub struct JsonLinesWriter<W: Write> {
    out:      W,
    finished: bool,
}

impl JsonLinesWriter<BufWriter<File>> {
    /// Create (or truncate) `path`.
    pub fn create(path: &Path) -> OutputResult<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> JsonLinesWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, finished: false }
    }

    /// Unwrap the inner writer (e.g. to inspect an in-memory buffer).
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_record(&mut self, record: &Record<'_>) -> OutputResult<()> {
        serde_json::to_writer(&mut self.out, record)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for JsonLinesWriter<W> {
    fn write_snapshot(&mut self, row: &SnapshotRow) -> OutputResult<()> {
        self.write_record(&Record::Snapshot(row))
    }

    fn write_delivery(&mut self, row: &DeliveryRow) -> OutputResult<()> {
        self.write_record(&Record::Delivery(row))
    }

    fn write_frame(&mut self, frame: &Frame) -> OutputResult<()> {
        self.write_record(&Record::Frame(frame))
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}
