//! `hl-sim`: event loop controller for the harvest-logistics simulation.
//!
//! # Event loop
//!
//! ```text
//! while next pending time <= deadline:
//!   ① Advance: pop the earliest Wake, move virtual time to it.
//!   ② Frames: emit grid frames strictly before the new time.
//!   ③ Resume: run that one actor to its next suspension point; it may
//!              schedule further Wakes (timed waits, hand-offs).
//!   ④ Report: forward the step's SimEvents, then a Snapshot.
//! then: frames up to and including the deadline, on_run_end.
//! ```
//!
//! # Modules
//!
//! | Module       | Contents                                       |
//! |--------------|------------------------------------------------|
//! | [`builder`]  | `SimBuilder`                                   |
//! | [`sim`]      | `Simulation`: run/step and read access         |
//! | [`snapshot`] | `Snapshot`, `Frame`, `RunSummary`              |
//! | [`observer`] | `SimObserver`, `NoopObserver`, `TraceRecorder` |
//! | [`sweep`]    | `run_sweep`, `grid`                            |
//! | [`error`]    | `SimError`, `SimResult<T>`                     |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                             |
//! |------------|----------------------------------------------------|
//! | `parallel` | Runs sweep configurations on Rayon's thread pool.  |
//! | `serde`    | `Serialize` for `Snapshot`, `Frame`, `RunSummary`. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use hl_core::HarvestConfig;
//! use hl_sim::{SimBuilder, TraceRecorder};
//!
//! let mut sim = SimBuilder::new(HarvestConfig::default()).build()?;
//! let mut trace = TraceRecorder::new();
//! sim.run(&mut trace)?;
//! println!("{:?}", sim.snapshot());
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod snapshot;
pub mod sweep;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use hl_clock::RunOutcome;
pub use observer::{NoopObserver, SimObserver, TraceRecorder};
pub use sim::Simulation;
pub use snapshot::{Frame, RunSummary, Snapshot};
pub use sweep::run_sweep;
