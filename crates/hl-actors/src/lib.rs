//! `hl-actors`: the two kinds of suspended process and the field they share.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`wake`]   | `Wake`: the clock's event payload (which actor to resume)    |
//! | [`event`]  | `SimEvent`: trace records emitted by actor steps             |
//! | [`travel`] | `Travel`: one straight-line leg, interpolable at any instant |
//! | [`worker`] | `Worker`, `WorkerPhase`                                      |
//! | [`drone`]  | `Drone`, `DronePhase`, `DroneStatus`                         |
//! | [`field`]  | `Field` (actors + queue + collection point), `ActorContext`  |
//! | [`error`]  | `ActorError`, `ActorResult<T>`                               |
//!
//! # Design notes
//!
//! Each actor is an explicit state machine.  Its phase records what it is
//! suspended in; `resume` runs the actor from that suspension point up to the
//! next one and schedules the `Wake` that will resume it again.  Instant
//! steps (deciding, enqueuing, re-checking after a delivery) happen inside a
//! single `resume`; only timed waits and a blocked `get` suspend.
//!
//! Because exactly one `resume` runs between clock advances, no step ever
//! observes another actor half-way through a transition.

pub mod drone;
pub mod error;
pub mod event;
pub mod field;
pub mod travel;
pub mod wake;
pub mod worker;


pub use drone::{Drone, DronePhase, DroneStatus};
pub use error::{ActorError, ActorResult};
pub use event::SimEvent;
pub use field::{ActorContext, Field};
pub use travel::Travel;
pub use wake::Wake;
pub use worker::{Worker, WorkerPhase};
