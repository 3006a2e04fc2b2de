//! The `RoutingEngine` facade.
//!
//! One engine owns one [`GraphStore`], one [`TrafficSimulator`], and the
//! currently installed observer.  Everything runs on the caller's thread:
//! the host advances the engine clock with [`advance`](RoutingEngine::advance)
//! and issues route requests in between, so a simulator firing can never
//! interleave with a computation — and every computation additionally runs
//! on its own [`snapshot`](cr_graph::GraphStore::snapshot), taken the moment
//! it begins.

use cr_core::{GeoPoint, Tick};
use cr_graph::{GraphDocument, GraphStats, GraphStore};
use cr_routing::{find_alternatives, shortest_path, CandidateRoute, RouteResult};
use cr_traffic::{NoopObserver, TrafficChange, TrafficObserver, TrafficSimulator};

use crate::history::{HistoryEntry, RouteHistory};
use crate::{EngineConfig, EngineResult};

/// The four-call surface the UI layer consumes, plus clock and telemetry.
pub struct RoutingEngine {
    store:     GraphStore,
    simulator: TrafficSimulator,
    observer:  Box<dyn TrafficObserver>,
    history:   RouteHistory,
    now:       Tick,
}

impl Default for RoutingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RoutingEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            store:     GraphStore::new(),
            simulator: TrafficSimulator::new(config.traffic),
            observer:  Box::new(NoopObserver),
            history:   RouteHistory::new(config.history_capacity),
            now:       Tick::ZERO,
        }
    }

    // ── Graph loading ─────────────────────────────────────────────────────

    /// Replace the whole topology.  On failure nothing changes — the
    /// previously loaded graph keeps serving requests.
    pub fn load_graph(&mut self, document: GraphDocument) -> EngineResult<()> {
        self.store.load(document)?;
        Ok(())
    }

    /// [`load_graph`](Self::load_graph) from a JSON document string.
    pub fn load_graph_json(&mut self, json: &str) -> EngineResult<()> {
        let document = GraphDocument::from_json_str(json)?;
        self.load_graph(document)
    }

    // ── Route computation ─────────────────────────────────────────────────

    /// Minimum-cost path between two node identifiers.
    ///
    /// `Ok(None)` means both nodes exist but nothing connects them under the
    /// current weights.  A found route is recorded in the history.
    pub fn compute_route(
        &mut self,
        source: &str,
        dest: &str,
    ) -> EngineResult<Option<RouteResult>> {
        let snapshot = self.store.snapshot();
        let Some(route) = shortest_path(&snapshot, source, dest)? else {
            return Ok(None);
        };

        let nodes = snapshot.nodes();
        let summary = route
            .nodes
            .iter()
            .map(|&n| nodes.name(n))
            .collect::<Vec<_>>()
            .join(" → ");
        self.history.record(HistoryEntry {
            summary,
            total: route.total,
            tick:  self.now,
        });

        Ok(Some(RouteResult::from_route(&route, nodes)))
    }

    /// Up to three alternative candidates from the pruning heuristic.
    pub fn compute_alternatives(
        &mut self,
        source: &str,
        dest: &str,
    ) -> EngineResult<Vec<CandidateRoute>> {
        let snapshot = self.store.snapshot();
        Ok(find_alternatives(&snapshot, source, dest)?)
    }

    // ── Traffic simulation ────────────────────────────────────────────────

    /// Install `observer` and begin the recurring perturbation schedule.
    ///
    /// Calling while already running replaces the observer and resets the
    /// cadence; nothing else changes.
    pub fn start_traffic_simulation(&mut self, observer: impl TrafficObserver + 'static) {
        self.observer = Box::new(observer);
        self.simulator.start(self.now);
    }

    /// Idle the perturbation schedule.  A no-op when not running.
    pub fn stop_traffic_simulation(&mut self) {
        self.simulator.stop();
    }

    pub fn traffic_running(&self) -> bool {
        self.simulator.is_running()
    }

    /// Perturb a few randomly chosen edges right now, outside the schedule.
    pub fn apply_traffic_gust(
        &mut self,
        count: usize,
        min_delta: i32,
        max_delta: i32,
    ) -> Vec<TrafficChange> {
        self.simulator
            .apply_targeted(&mut self.store, count, min_delta, max_delta)
    }

    // ── Clock ─────────────────────────────────────────────────────────────

    /// Advance the engine clock by `ticks`, polling the simulator after each
    /// step.  This is the cooperative scheduling pump: route requests issued
    /// between `advance` calls always see a settled weight set.
    pub fn advance(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.now = self.now + 1;
            self.simulator
                .poll(self.now, &mut self.store, &mut *self.observer);
        }
    }

    pub fn now(&self) -> Tick {
        self.now
    }

    // ── Telemetry & lookups ───────────────────────────────────────────────

    /// Read access to the underlying store (edge weights, node table).
    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// Aggregate traffic figures over the current weights.
    pub fn stats(&self) -> GraphStats {
        self.store.stats()
    }

    /// Identifier of the node nearest to `pos` — the map-click snap.
    pub fn nearest_node(&self, pos: GeoPoint) -> Option<&str> {
        self.store.nearest_node(pos)
    }

    /// Past successful route computations, newest first.
    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    /// Recently applied traffic changes, oldest first.
    pub fn recent_traffic_changes(&self) -> impl Iterator<Item = &TrafficChange> {
        self.simulator.recent_changes()
    }
}
