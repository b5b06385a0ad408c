//! `hl-output`: simulation output writers for the harvest-logistics model.
//!
//! | Backend    | Files created                     | Frames  |
//! |------------|-----------------------------------|---------|
//! | CSV        | `snapshots.csv`, `deliveries.csv` | dropped |
//! | JSON Lines | any `Write` (one object per line) | written |
//!
//! Both backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `hl_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hl_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod jsonl;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use jsonl::JsonLinesWriter;
pub use observer::SimOutputObserver;
pub use row::{DeliveryRow, SnapshotRow};
pub use writer::OutputWriter;
