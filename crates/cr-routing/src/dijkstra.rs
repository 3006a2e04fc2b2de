//! Shortest-path search and route types.
//!
//! # Algorithm
//!
//! Single-source Dijkstra over the snapshot's undirected CSR adjacency.  The
//! heap holds `(distance, NodeId)` pairs with lazy deletion; because `NodeId`
//! order is identifier order, the settle sequence is exactly the one a plain
//! linear scan would produce with the tie-break **lowest identifier first**.
//! The search stops as soon as the destination is settled.
//!
//! # Cost units
//!
//! Edge weights are travel minutes; a route's `total` is their plain sum.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use cr_core::NodeId;
use cr_graph::{GraphSnapshot, NodeTable};

use crate::{RoutingError, RoutingResult};

// ── Route types ───────────────────────────────────────────────────────────────

/// The result of a shortest-path query at the dense-id level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Nodes in traversal order; first is the source, last the destination.
    /// Never empty — a source == destination route has exactly one entry.
    pub nodes: Vec<NodeId>,
    /// Sum of traversed edge weights.
    pub total: u32,
}

/// Identifier-level projection of a [`Route`] for external consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteResult {
    /// Node identifiers from source to destination.
    pub path:  Vec<String>,
    /// Total cost in minutes.
    pub total: u32,
}

impl RouteResult {
    pub fn from_route(route: &Route, nodes: &NodeTable) -> Self {
        Self {
            path: route.nodes.iter().map(|&n| nodes.key(n).to_string()).collect(),
            total: route.total,
        }
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Compute the minimum-cost path from `source` to `dest`.
///
/// - `Err(UnknownNode)` — either id is absent from the node table.
/// - `Ok(None)` — both ids exist but no sequence of edges connects them.
/// - `Ok(Some(route))` — the path and its total cost.
pub fn shortest_path(
    snapshot: &GraphSnapshot,
    source: &str,
    dest: &str,
) -> RoutingResult<Option<Route>> {
    let (src, dst) = resolve_pair(snapshot, source, dest)?;
    let outcome = run(snapshot, src, dst, &mut |_, _| {});
    match &outcome {
        Some(r) => log::debug!(
            "route {source} → {dest}: {} nodes, {} min",
            r.nodes.len(),
            r.total
        ),
        None => log::debug!("route {source} → {dest}: unreachable"),
    }
    Ok(outcome)
}

/// Like [`shortest_path`], but invokes `on_settle(node, distance)` each time
/// a node's distance becomes final — a hook for visualization layers that
/// want to replay the search frontier.
pub fn traced_shortest_path(
    snapshot: &GraphSnapshot,
    source: &str,
    dest: &str,
    mut on_settle: impl FnMut(NodeId, u32),
) -> RoutingResult<Option<Route>> {
    let (src, dst) = resolve_pair(snapshot, source, dest)?;
    Ok(run(snapshot, src, dst, &mut on_settle))
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

pub(crate) fn resolve_pair(
    snapshot: &GraphSnapshot,
    source: &str,
    dest: &str,
) -> RoutingResult<(NodeId, NodeId)> {
    let src = snapshot
        .resolve(source)
        .ok_or_else(|| RoutingError::UnknownNode(source.to_string()))?;
    let dst = snapshot
        .resolve(dest)
        .ok_or_else(|| RoutingError::UnknownNode(dest.to_string()))?;
    Ok((src, dst))
}

pub(crate) fn run(
    snapshot: &GraphSnapshot,
    src: NodeId,
    dst: NodeId,
    on_settle: &mut dyn FnMut(NodeId, u32),
) -> Option<Route> {
    if src == dst {
        // Degenerate request: settled immediately, no relaxation phase.
        on_settle(src, 0);
        return Some(Route { nodes: vec![src], total: 0 });
    }

    let n = snapshot.node_count();
    // dist[v] = best known cost to reach v.
    let mut dist = vec![u32::MAX; n];
    // prev[v] = node that reached v; NodeId::INVALID for unreached nodes.
    let mut prev = vec![NodeId::INVALID; n];

    dist[src.index()] = 0;

    // Min-heap: (cost, node). Reverse makes BinaryHeap (max) behave as
    // min-heap.  Secondary key NodeId gives the documented tie-break: among
    // equally distant frontier nodes the lowest identifier settles first.
    let mut heap: BinaryHeap<Reverse<(u32, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((0, src)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }
        on_settle(node, cost);

        if node == dst {
            return Some(reconstruct(&prev, src, dst, cost));
        }

        for (neighbor, w) in snapshot.neighbors(node) {
            let next = cost.saturating_add(w);
            if next < dist[neighbor.index()] {
                dist[neighbor.index()] = next;
                prev[neighbor.index()] = node;
                heap.push(Reverse((next, neighbor)));
            }
        }
    }

    // Frontier exhausted without settling the destination.
    None
}

fn reconstruct(prev: &[NodeId], src: NodeId, dst: NodeId, total: u32) -> Route {
    let mut nodes = vec![dst];
    let mut cur = dst;
    while cur != src {
        cur = prev[cur.index()];
        debug_assert!(cur != NodeId::INVALID, "settled node without predecessor");
        nodes.push(cur);
    }
    nodes.reverse();
    Route { nodes, total }
}
