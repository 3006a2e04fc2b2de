//! `cr-engine` — the facade the rendering/UI layer talks to.
//!
//! # Crate layout
//!
//! | Module      | Contents                                             |
//! |-------------|------------------------------------------------------|
//! | [`engine`]  | `RoutingEngine` — load, route, alternatives, traffic |
//! | [`config`]  | `EngineConfig`                                       |
//! | [`history`] | `RouteHistory`, `HistoryEntry` (bounded, in-memory)  |
//! | [`error`]   | `EngineError`, `EngineResult<T>`                     |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cr_engine::{GraphDocument, RoutingEngine};
//!
//! let mut engine = RoutingEngine::new();
//! engine.load_graph_json(include_str!("graph.json"))?;
//!
//! if let Some(route) = engine.compute_route("A", "J")? {
//!     println!("{} ({} min)", route.path.join(" → "), route.total);
//! }
//!
//! engine.start_traffic_simulation(|tick, changes: &[_]| {
//!     println!("{tick}: {} roads changed", changes.len());
//! });
//! engine.advance(10); // pump the cooperative clock
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod history;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::EngineConfig;
pub use engine::RoutingEngine;
pub use error::{EngineError, EngineResult};
pub use history::{HistoryEntry, RouteHistory, DEFAULT_HISTORY_CAPACITY};

// Everything that appears in the facade's signatures, so UI callers need a
// single dependency.
pub use cr_core::{GeoPoint, Tick};
pub use cr_graph::{Edge, GraphDocument, GraphStats, NodeSpec};
pub use cr_routing::{CandidateRoute, RouteResult};
pub use cr_traffic::{NoopObserver, TrafficChange, TrafficConfig, TrafficObserver};
