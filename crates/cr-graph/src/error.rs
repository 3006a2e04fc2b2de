//! Graph-subsystem error type.

use thiserror::Error;

/// Errors produced by `cr-graph`.
///
/// All variants abort a [`load`](crate::GraphStore::load) in full — the
/// previously installed graph stays in place.  An edge referencing an unknown
/// node id is deliberately NOT an error: it loads fine and simply never
/// matches a neighbor lookup.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("node {id} has a non-finite coordinate")]
    NonFiniteCoordinate { id: String },

    #[error("edge {from}-{to} has zero weight")]
    ZeroWeight { from: String, to: String },

    #[error("graph document parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;
