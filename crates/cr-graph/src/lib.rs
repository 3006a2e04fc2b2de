//! `cr-graph` — the routing engine's graph model.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`document`] | `GraphDocument`, `NodeSpec`, `Edge` (serde shapes)       |
//! | [`store`]    | `GraphStore`, `NodeTable`, `GraphStats`, weight bounds   |
//! | [`snapshot`] | `GraphSnapshot` (immutable CSR copy for computations)    |
//! | [`error`]    | `GraphError`, `GraphResult<T>`                           |
//!
//! # Mutation model
//!
//! Topology (nodes + edge endpoints) is immutable after [`GraphStore::load`];
//! only edge weights change afterwards, and only through the store's weight
//! methods.  Path computations never read the store directly — they run on a
//! [`GraphSnapshot`] taken at the computation boundary, so a traffic update
//! landing between two computations can never mix old and new weights inside
//! one run.

pub mod document;
pub mod error;
pub mod snapshot;
pub mod store;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use document::{Edge, GraphDocument, NodeSpec};
pub use error::{GraphError, GraphResult};
pub use snapshot::GraphSnapshot;
pub use store::{
    GraphStats, GraphStore, NodeTable, CONGESTED_THRESHOLD, MAX_WEIGHT, MIN_WEIGHT,
    MODERATE_THRESHOLD,
};
