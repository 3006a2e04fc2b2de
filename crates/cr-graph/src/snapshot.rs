//! Immutable graph snapshot for path computations.
//!
//! # Data layout
//!
//! The snapshot expands the directed edge list into a **Compressed Sparse
//! Row (CSR)** adjacency over the undirected interpretation: every edge with
//! two resolvable endpoints contributes one entry per direction.  Given a
//! `NodeId n`, its neighbors occupy the slice:
//!
//! ```text
//! adj_to[ adj_start[n] .. adj_start[n+1] ]
//! ```
//!
//! Iteration over a node's neighbors is a contiguous memory scan — ideal for
//! Dijkstra's inner loop.  The CSR is rebuilt per snapshot because weights
//! change between snapshots; the node table is shared, since it is immutable
//! after load.

use std::sync::Arc;

use cr_core::NodeId;

use crate::{Edge, NodeTable};

/// A consistent copy of nodes + edges taken at a computation boundary.
pub struct GraphSnapshot {
    nodes: Arc<NodeTable>,
    edges: Vec<Edge>,

    // ── CSR adjacency (undirected expansion) ──────────────────────────────
    /// CSR row pointer.  Length = `node_count + 1`.
    adj_start:  Vec<u32>,
    /// Neighbor node of each adjacency entry.
    adj_to:     Vec<NodeId>,
    /// Weight of each adjacency entry.
    adj_weight: Vec<u32>,
}

impl GraphSnapshot {
    /// Build a snapshot from a shared node table and an owned edge list.
    ///
    /// Edges with an endpoint that never resolves contribute nothing to the
    /// adjacency (lenient-graph policy) but stay in [`edges`](Self::edges)
    /// so positional pruning sees the full load-order index space.
    pub(crate) fn build(nodes: Arc<NodeTable>, edges: Vec<Edge>) -> Self {
        let node_count = nodes.len();

        let mut raw: Vec<(NodeId, NodeId, u32)> = Vec::with_capacity(edges.len() * 2);
        for e in &edges {
            if let (Some(u), Some(v)) = (nodes.resolve(&e.from), nodes.resolve(&e.to)) {
                raw.push((u, v, e.weight));
                raw.push((v, u, e.weight));
            }
        }

        // Sort by source node for CSR construction.
        raw.sort_unstable_by_key(|&(from, _, _)| from.0);

        let adj_to:     Vec<NodeId> = raw.iter().map(|&(_, to, _)| to).collect();
        let adj_weight: Vec<u32>    = raw.iter().map(|&(_, _, w)| w).collect();

        let mut adj_start = vec![0u32; node_count + 1];
        for &(from, _, _) in &raw {
            adj_start[from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            adj_start[i] += adj_start[i - 1];
        }
        debug_assert_eq!(adj_start[node_count] as usize, adj_to.len());

        Self { nodes, edges, adj_start, adj_to, adj_weight }
    }

    // ── Read access ───────────────────────────────────────────────────────

    pub fn nodes(&self) -> &NodeTable {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Map an identifier to its dense id, or `None` if unknown.
    #[inline]
    pub fn resolve(&self, key: &str) -> Option<NodeId> {
        self.nodes.resolve(key)
    }

    /// Iterator over `(neighbor, weight)` pairs of `node`.
    ///
    /// This is a contiguous index range — no heap allocation.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, u32)> + '_ {
        let start = self.adj_start[node.index()] as usize;
        let end   = self.adj_start[node.index() + 1] as usize;
        (start..end).map(move |i| (self.adj_to[i], self.adj_weight[i]))
    }

    // ── Pruned variants ───────────────────────────────────────────────────

    /// Pure pruned copy for the alternative-route heuristic: drops every
    /// edge whose position in the edge list satisfies
    /// `index % stride == 0` (position 0 is always dropped).  The node set
    /// is untouched, so disconnection shows up as an unreachable
    /// destination, never as a missing node.
    pub fn prune_periodic(&self, stride: usize) -> GraphSnapshot {
        debug_assert!(stride >= 2, "stride {stride} would drop every edge");
        let pruned: Vec<Edge> = self
            .edges
            .iter()
            .enumerate()
            .filter(|(index, _)| index % stride != 0)
            .map(|(_, e)| e.clone())
            .collect();
        GraphSnapshot::build(Arc::clone(&self.nodes), pruned)
    }
}
