//! `cr-routing` — path computation over [`cr_graph::GraphSnapshot`]s.
//!
//! # Crate layout
//!
//! | Module           | Contents                                            |
//! |------------------|-----------------------------------------------------|
//! | [`dijkstra`]     | `shortest_path`, `traced_shortest_path`, `Route`    |
//! | [`alternatives`] | `find_alternatives`, `CandidateRoute`               |
//! | [`error`]        | `RoutingError`, `RoutingResult<T>`                  |
//!
//! # Result model
//!
//! An unreachable destination is a **normal result** (`Ok(None)`), not an
//! error — callers must be able to tell "no path under current weights"
//! apart from "you asked about a node that does not exist"
//! ([`RoutingError::UnknownNode`]).
//!
//! All functions are pure over the snapshot they are given: nothing here
//! mutates graph state, so a traffic tick landing between two computations
//! can never corrupt one.

pub mod alternatives;
pub mod dijkstra;
pub mod error;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use alternatives::{find_alternatives, CandidateRoute, MAX_ALTERNATIVES};
pub use dijkstra::{shortest_path, traced_shortest_path, Route, RouteResult};
pub use error::{RoutingError, RoutingResult};
