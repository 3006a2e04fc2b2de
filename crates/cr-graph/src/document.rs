//! Serde-facing graph document.
//!
//! The document mirrors the interchange shape the surrounding map UI
//! consumes: nodes keyed by identifier with a display name and a
//! `[lat, lon]` coordinate pair, edges as a `{from, to, weight}` list.
//! JSON is the concrete transport; the engine itself only cares about the
//! shape.
//!
//! `nodes` is a `BTreeMap` on purpose: iteration order is the lexicographic
//! identifier order, which is also the dense-id assignment order in
//! [`NodeTable`](crate::NodeTable).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::GraphResult;

/// A complete graph description: the unit of [`GraphStore::load`](crate::GraphStore::load).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: BTreeMap<String, NodeSpec>,
    pub edges: Vec<Edge>,
}

/// One node of the document: optional display name plus `[lat, lon]`.
///
/// A missing name falls back to the node's identifier at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub coords: [f64; 2],
}

/// A weighted connector between two nodes.
///
/// Stored as a directed `(from, to)` pair but traversed in either direction.
/// `weight` is the traversal cost in minutes; the traffic simulator keeps it
/// within [`MIN_WEIGHT`](crate::MIN_WEIGHT)..=[`MAX_WEIGHT`](crate::MAX_WEIGHT).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from:   String,
    pub to:     String,
    pub weight: u32,
}

impl GraphDocument {
    pub fn from_json_str(json: &str) -> GraphResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> GraphResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl NodeSpec {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { name: None, coords: [lat, lon] }
    }

    pub fn named(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self { name: Some(name.into()), coords: [lat, lon] }
    }
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, weight: u32) -> Self {
        Self { from: from.into(), to: to.into(), weight }
    }
}
