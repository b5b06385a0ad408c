//! `hl-core`: foundational types for the harvest-logistics simulation.
//!
//! This crate is a dependency of every other `hl-*` crate.  It has no `hl-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                            |
//! |------------|-----------------------------------------------------|
//! | [`ids`]    | `WorkerId`, `DroneId`, `BoxId`                      |
//! | [`geo`]    | `Location`, Euclidean distance, interpolation       |
//! | [`time`]   | `SimTime`: totally ordered virtual time             |
//! | [`travel`] | `TravelTime`: fixed or speed-based leg durations    |
//! | [`config`] | `HarvestConfig`, `WakePolicy`, `Layout`, validation |
//! | [`rng`]    | `ActorRng` (per-actor, deterministic)               |
//! | [`error`]  | `HlError`, `HlResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types. |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;
pub mod travel;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{HarvestConfig, Layout, WakePolicy};
pub use error::{HlError, HlResult};
pub use geo::Location;
pub use ids::{BoxId, DroneId, WorkerId};
pub use rng::ActorRng;
pub use time::SimTime;
pub use travel::TravelTime;
