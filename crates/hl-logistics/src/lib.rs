//! `hl-logistics`: the passive records and the one shared resource.
//!
//! # Crate layout
//!
//! | Module          | Contents                                            |
//! |-----------------|-----------------------------------------------------|
//! | [`harvest_box`] | `HarvestBox` (in flight), `DeliveredBox`, `Courier` |
//! | [`collection`]  | `CollectionPoint`: append-only delivery history     |
//! | [`queue`]       | `SharedBoxQueue`, `PutOutcome`                      |
//!
//! # Ownership of a box
//!
//! A `HarvestBox` is a move-only value: at any instant it sits in exactly one
//! place (a worker's hand, the queue, a pending hand-off, a drone's hand).
//! Delivery consumes it and yields a `DeliveredBox`, so "delivered exactly
//! once" is enforced by the type system rather than checked at runtime.

pub mod collection;
pub mod harvest_box;
pub mod queue;

#[cfg(test)]
mod tests;

pub use collection::CollectionPoint;
pub use harvest_box::{Courier, DeliveredBox, HarvestBox};
pub use queue::{PutOutcome, SharedBoxQueue};
