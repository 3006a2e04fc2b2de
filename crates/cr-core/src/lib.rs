//! `cr-core` — foundational types for the `cityroute` routing engine.
//!
//! This crate is a dependency of every other `cr-*` crate.  It intentionally
//! has no `cr-*` dependencies and minimal external ones (only `rand`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module   | Contents                                  |
//! |----------|-------------------------------------------|
//! | [`ids`]  | `NodeId`, `EdgeId`                        |
//! | [`geo`]  | `GeoPoint`, haversine distance            |
//! | [`time`] | `Tick`                                    |
//! | [`rng`]  | `SimRng` (seeded, reproducible)           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                  |
//! |---------|---------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.     |

pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::GeoPoint;
pub use ids::{EdgeId, NodeId};
pub use rng::SimRng;
pub use time::Tick;
