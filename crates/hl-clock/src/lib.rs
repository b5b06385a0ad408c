//! `hl-clock`: the virtual-time scheduler every actor suspends through.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                         |
//! |-----------|------------------------------------------------------------------|
//! | [`clock`] | `EventClock<E>` (`BTreeMap<SimTime, VecDeque<E>>`), `RunOutcome` |
//! | [`error`] | `ClockError`, `ClockResult<T>`                                   |
//!
//! # Model (summary)
//!
//! ```text
//! schedule_after(d, e)   pending[now + d].push_back(e)
//! advance()              pop front of the earliest time bucket; now = that time
//! run_until(deadline, f) while next time <= deadline: f(clock, advance())
//! ```
//!
//! The clock is generic over the event payload `E`; it never interprets
//! events, it only orders them.  A suspended process is represented by the
//! event that will resume it.

pub mod clock;
pub mod error;


pub use clock::{EventClock, RunOutcome};
pub use error::{ClockError, ClockResult};
