//! Engine-level error type.

use thiserror::Error;

use cr_graph::GraphError;
use cr_routing::RoutingError;

/// Errors surfaced through the engine facade.
///
/// "No path exists" is not here on purpose: an unreachable destination is a
/// normal `Ok(None)` result of [`compute_route`](crate::RoutingEngine::compute_route).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("routing error: {0}")]
    Routing(#[from] RoutingError),
}

pub type EngineResult<T> = Result<T, EngineError>;
