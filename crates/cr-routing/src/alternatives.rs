//! Alternative-route search heuristic.
//!
//! Produces up to [`MAX_ALTERNATIVES`] candidates for a fixed
//! source/destination pair by re-running the shortest-path search over
//! structurally pruned copies of the edge list: attempt `i` drops every edge
//! whose position satisfies `index % (i + 2) == 0`.
//!
//! This is a deliberate, deterministic perturbation — NOT a k-shortest-paths
//! algorithm.  Two attempts may converge on the same path (candidates are
//! not deduplicated), position 0 is dropped in every attempt, and nothing
//! guarantees the true second-best route appears.  Downstream consumers
//! depend on the exact attempt labels and ordering, so the procedure is kept
//! as-is.

use cr_core::GeoPoint;
use cr_graph::GraphSnapshot;

use crate::dijkstra::{resolve_pair, run};
use crate::RoutingResult;

/// Upper bound on the number of candidates one search returns.
pub const MAX_ALTERNATIVES: usize = 3;

/// One alternative candidate: the route plus everything a renderer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRoute {
    /// Node identifiers from source to destination.
    pub path:        Vec<String>,
    /// Display names along the path.
    pub place_names: Vec<String>,
    /// Node coordinates along the path.
    pub coords:      Vec<GeoPoint>,
    /// Total cost in minutes.
    pub total:       u32,
    /// `"Route {attempt + 1} ({total} min)"` — attempt-indexed, so a failed
    /// earlier attempt leaves a gap in the numbering.
    pub label:       String,
}

/// Run the pruning-and-resolve procedure [`MAX_ALTERNATIVES`] times and
/// return whatever was found, in attempt order.
///
/// An attempt whose prune disconnects the pair yields no candidate and no
/// error.  Unknown source/destination ids fail the whole call — an
/// alternatives search is a route request like any other.
pub fn find_alternatives(
    snapshot: &GraphSnapshot,
    source: &str,
    dest: &str,
) -> RoutingResult<Vec<CandidateRoute>> {
    let (src, dst) = resolve_pair(snapshot, source, dest)?;

    let mut candidates = Vec::new();
    for attempt in 0..MAX_ALTERNATIVES {
        let pruned = snapshot.prune_periodic(attempt + 2);
        let Some(route) = run(&pruned, src, dst, &mut |_, _| {}) else {
            continue;
        };

        let nodes = snapshot.nodes();
        candidates.push(CandidateRoute {
            path: route.nodes.iter().map(|&n| nodes.key(n).to_string()).collect(),
            place_names: route.nodes.iter().map(|&n| nodes.name(n).to_string()).collect(),
            coords: route.nodes.iter().map(|&n| nodes.position(n)).collect(),
            total: route.total,
            label: format!("Route {} ({} min)", attempt + 1, route.total),
        });
    }

    log::debug!(
        "alternatives {source} → {dest}: {}/{MAX_ALTERNATIVES} attempts produced a route",
        candidates.len()
    );
    Ok(candidates)
}
