//! Routing-subsystem error type.

use thiserror::Error;

/// Errors produced by `cr-routing`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoutingError {
    /// A route request named a source or destination id that is not in the
    /// node table.  Distinct from an unreachable destination, which is a
    /// normal `None` result, never an error.
    #[error("unknown node {0}")]
    UnknownNode(String),
}

pub type RoutingResult<T> = Result<T, RoutingError>;
