//! Graph store: the single source of truth for topology and current weights.
//!
//! # Data layout
//!
//! Nodes live in a [`NodeTable`] — SoA vectors indexed by `NodeId`, with a
//! hash index from identifier to `NodeId` and an R-tree over positions for
//! nearest-node snapping.  Identifiers are interned in lexicographic order,
//! so `NodeId` comparison doubles as identifier comparison.
//!
//! Edges are kept exactly as loaded, in document order, with endpoints as
//! identifier strings.  `EdgeId` is the position in that list and stays
//! stable across weight mutations — the traffic simulator and the
//! alternative-route pruning both address edges by it.  An edge whose
//! endpoint never resolves to a loaded node stays in the list but never
//! matches a neighbor lookup (lenient-graph policy).
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to the nearest `NodeId` — the
//! hook for "user clicked the map, which node did they mean?".

use std::collections::BTreeMap;
use std::sync::Arc;

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

use cr_core::{EdgeId, GeoPoint, NodeId};

use crate::{Edge, GraphDocument, GraphError, GraphResult, GraphSnapshot, NodeSpec};

// ── Weight bounds ─────────────────────────────────────────────────────────────

/// Lowest weight the traffic simulator will ever leave on an edge.
pub const MIN_WEIGHT: u32 = 1;
/// Highest weight the traffic simulator will ever leave on an edge.
///
/// Initial data may exceed this; only simulator mutations clamp.
pub const MAX_WEIGHT: u32 = 20;

/// An edge above this weight counts as congested in [`GraphStats`].
pub const CONGESTED_THRESHOLD: u32 = 15;
/// An edge above this weight (and at most [`CONGESTED_THRESHOLD`]) counts as
/// moderate traffic in [`GraphStats`].
pub const MODERATE_THRESHOLD: u32 = 10;

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[lat, lon]` point with
/// the associated `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2], // [lat, lon]
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lat/lon space.  Sufficient for
    /// nearest-node queries within a city.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── NodeTable ─────────────────────────────────────────────────────────────────

/// Immutable node collection: identifiers, resolved display names, and
/// positions, indexed by `NodeId` in lexicographic identifier order.
///
/// Built once per [`GraphStore::load`]; shared by `Arc` with every snapshot
/// taken from the store, since nothing mutates it afterwards.
pub struct NodeTable {
    keys:      Vec<String>,
    names:     Vec<String>,
    positions: Vec<GeoPoint>,
    index:     FxHashMap<String, NodeId>,
    spatial_idx: RTree<NodeEntry>,
}

impl NodeTable {
    fn empty() -> Self {
        Self {
            keys:      Vec::new(),
            names:     Vec::new(),
            positions: Vec::new(),
            index:     FxHashMap::default(),
            spatial_idx: RTree::new(),
        }
    }

    /// Validate and intern a document's node map.
    ///
    /// `BTreeMap` iteration gives lexicographic identifier order, so
    /// `NodeId(0)` is the lexicographically smallest identifier.
    fn build(nodes: &BTreeMap<String, NodeSpec>) -> GraphResult<Self> {
        let mut keys      = Vec::with_capacity(nodes.len());
        let mut names     = Vec::with_capacity(nodes.len());
        let mut positions = Vec::with_capacity(nodes.len());
        let mut index     = FxHashMap::default();

        for (i, (key, spec)) in nodes.iter().enumerate() {
            let pos = GeoPoint::new(spec.coords[0], spec.coords[1]);
            if !pos.is_finite() {
                return Err(GraphError::NonFiniteCoordinate { id: key.clone() });
            }
            keys.push(key.clone());
            names.push(spec.name.clone().unwrap_or_else(|| key.clone()));
            positions.push(pos);
            index.insert(key.clone(), NodeId(i as u32));
        }

        // Bulk-load the R-tree (faster than N inserts).
        let entries: Vec<NodeEntry> = positions
            .iter()
            .enumerate()
            .map(|(i, &pos)| NodeEntry {
                point: [pos.lat, pos.lon],
                id: NodeId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        Ok(Self { keys, names, positions, index, spatial_idx })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Map an identifier to its dense id, or `None` if unknown.
    #[inline]
    pub fn resolve(&self, key: &str) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    /// The identifier of `node`.
    #[inline]
    pub fn key(&self, node: NodeId) -> &str {
        &self.keys[node.index()]
    }

    /// The resolved display name of `node` (identifier if none was given).
    #[inline]
    pub fn name(&self, node: NodeId) -> &str {
        &self.names[node.index()]
    }

    #[inline]
    pub fn position(&self, node: NodeId) -> GeoPoint {
        self.positions[node.index()]
    }

    /// Iterator over all identifiers in `NodeId` order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// The node nearest to `pos`, or `None` if the table is empty.
    pub fn nearest(&self, pos: GeoPoint) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lon])
            .map(|e| e.id)
    }
}

// ── GraphStats ────────────────────────────────────────────────────────────────

/// Aggregate traffic figures over the current edge weights.
///
/// Plain data for dashboards and alert banners; no formatting here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    /// Mean edge weight, `0.0` for an edgeless graph.
    pub mean_weight: f64,
    /// Edges with `weight > CONGESTED_THRESHOLD`.
    pub congested_edges: usize,
    /// Edges with `MODERATE_THRESHOLD < weight <= CONGESTED_THRESHOLD`.
    pub moderate_edges: usize,
}

// ── GraphStore ────────────────────────────────────────────────────────────────

/// Owner of the node table and the mutable edge list.
///
/// Exactly one lives inside the engine; the traffic simulator mutates its
/// weights, route computations read it through [`snapshot`](Self::snapshot).
pub struct GraphStore {
    nodes: Arc<NodeTable>,
    edges: Vec<Edge>,
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore {
    /// An empty store; any route request against it fails to resolve ids.
    pub fn new() -> Self {
        Self { nodes: Arc::new(NodeTable::empty()), edges: Vec::new() }
    }

    /// Replace the entire topology with `document`.
    ///
    /// Fails if any node has a non-finite coordinate or any edge a zero
    /// weight — in that case nothing is installed and the previous graph
    /// stays live.  Edges referencing unknown node ids are accepted; they
    /// never match a neighbor lookup.
    pub fn load(&mut self, document: GraphDocument) -> GraphResult<()> {
        let GraphDocument { nodes, edges } = document;

        for e in &edges {
            if e.weight < MIN_WEIGHT {
                return Err(GraphError::ZeroWeight { from: e.from.clone(), to: e.to.clone() });
            }
        }
        let table = NodeTable::build(&nodes)?;

        log::info!("graph loaded: {} nodes, {} edges", table.len(), edges.len());
        self.nodes = Arc::new(table);
        self.edges = edges;
        Ok(())
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

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// `(neighbor, weight)` pairs reachable from `node` in one traversal
    /// step, derived by scanning the edge list for either endpoint.
    ///
    /// A node with no edges gets an empty vec, not an error.  An edge whose
    /// far endpoint is not a loaded node is skipped.
    pub fn neighbors(&self, node: NodeId) -> Vec<(NodeId, u32)> {
        let key = self.nodes.key(node);
        let mut out = Vec::new();
        for e in &self.edges {
            if e.from == key {
                if let Some(v) = self.nodes.resolve(&e.to) {
                    out.push((v, e.weight));
                }
            } else if e.to == key {
                if let Some(v) = self.nodes.resolve(&e.from) {
                    out.push((v, e.weight));
                }
            }
        }
        out
    }

    /// Current weight of `edge`, or `None` for an out-of-range index.
    pub fn weight(&self, edge: EdgeId) -> Option<u32> {
        self.edges.get(edge.index()).map(|e| e.weight)
    }

    // ── Weight mutation ───────────────────────────────────────────────────

    /// Overwrite one edge weight in place.  Returns `false` for an
    /// out-of-range index.  Topology is not revalidated.
    pub fn set_weight(&mut self, edge: EdgeId, weight: u32) -> bool {
        debug_assert!(weight >= MIN_WEIGHT);
        match self.edges.get_mut(edge.index()) {
            Some(e) => {
                e.weight = weight;
                true
            }
            None => false,
        }
    }

    /// Apply a signed delta to one edge weight, clamped to
    /// `[MIN_WEIGHT, MAX_WEIGHT]` — the traffic simulator's mutation path.
    /// Returns the new weight, or `None` for an out-of-range index.
    pub fn apply_delta(&mut self, edge: EdgeId, delta: i32) -> Option<u32> {
        let e = self.edges.get_mut(edge.index())?;
        let w = (i64::from(e.weight) + i64::from(delta))
            .clamp(i64::from(MIN_WEIGHT), i64::from(MAX_WEIGHT)) as u32;
        e.weight = w;
        Some(w)
    }

    /// Rewrite every edge weight through `f`, in edge-list order.
    pub fn replace_weights(&mut self, mut f: impl FnMut(EdgeId, u32) -> u32) {
        for (i, e) in self.edges.iter_mut().enumerate() {
            e.weight = f(EdgeId(i as u32), e.weight);
        }
    }

    // ── Derived views ─────────────────────────────────────────────────────

    /// Immutable copy of the current graph for one path computation.
    ///
    /// The node table is shared (it never changes after load); the edge list
    /// is a true copy, so a simulator tick firing after this call cannot
    /// leak new weights into a computation already holding the snapshot.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot::build(Arc::clone(&self.nodes), self.edges.clone())
    }

    /// Aggregate traffic figures over the current weights.
    pub fn stats(&self) -> GraphStats {
        let edge_count = self.edges.len();
        let total: u64 = self.edges.iter().map(|e| u64::from(e.weight)).sum();
        GraphStats {
            node_count: self.nodes.len(),
            edge_count,
            mean_weight: if edge_count == 0 {
                0.0
            } else {
                total as f64 / edge_count as f64
            },
            congested_edges: self
                .edges
                .iter()
                .filter(|e| e.weight > CONGESTED_THRESHOLD)
                .count(),
            moderate_edges: self
                .edges
                .iter()
                .filter(|e| e.weight > MODERATE_THRESHOLD && e.weight <= CONGESTED_THRESHOLD)
                .count(),
        }
    }

    /// Identifier of the node nearest to `pos`, or `None` on an empty store.
    pub fn nearest_node(&self, pos: GeoPoint) -> Option<&str> {
        self.nodes.nearest(pos).map(|id| self.nodes.key(id))
    }

    /// Re-export the current graph (including mutated weights) as a document.
    pub fn to_document(&self) -> GraphDocument {
        let nodes = (0..self.nodes.len())
            .map(|i| {
                let id = NodeId(i as u32);
                let pos = self.nodes.position(id);
                let spec = NodeSpec {
                    name: Some(self.nodes.name(id).to_string()),
                    coords: [pos.lat, pos.lon],
                };
                (self.nodes.key(id).to_string(), spec)
            })
            .collect();
        GraphDocument { nodes, edges: self.edges.clone() }
    }
}
