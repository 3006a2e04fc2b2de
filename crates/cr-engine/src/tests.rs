//! Integration tests for the engine facade.
//!
//! These exercise the four external calls end-to-end, including the
//! reference scenarios: the A/B/C triangle, the edgeless node D, and the
//! dangling A-Z edge.

#[cfg(test)]
mod helpers {
    use std::collections::BTreeMap;

    use crate::{Edge, EngineConfig, GraphDocument, NodeSpec, RoutingEngine, TrafficConfig};

    /// Triangle plus an edgeless node and a dangling edge reference:
    ///
    ///   A "Connaught Place" — B "Palika Bazar"   weight 5
    ///   B "Palika Bazar"    — C "Janpath"        weight 5
    ///   A "Connaught Place" — C "Janpath"        weight 20
    ///   A — Z (Z is not a node)                  weight 3
    ///   D "India Gate" has no edges.
    pub fn city_doc() -> GraphDocument {
        let mut nodes = BTreeMap::new();
        nodes.insert("A".to_string(), NodeSpec::named("Connaught Place", 0.0, 0.0));
        nodes.insert("B".to_string(), NodeSpec::named("Palika Bazar", 0.0, 1.0));
        nodes.insert("C".to_string(), NodeSpec::named("Janpath", 1.0, 1.0));
        nodes.insert("D".to_string(), NodeSpec::named("India Gate", 2.0, 2.0));
        GraphDocument {
            nodes,
            edges: vec![
                Edge::new("A", "B", 5),
                Edge::new("B", "C", 5),
                Edge::new("A", "C", 20),
                Edge::new("A", "Z", 3),
            ],
        }
    }

    pub fn engine() -> RoutingEngine {
        let mut engine = RoutingEngine::new();
        engine.load_graph(city_doc()).unwrap();
        engine
    }

    pub fn engine_with_interval(interval_ticks: u64) -> RoutingEngine {
        let mut engine = RoutingEngine::with_config(EngineConfig {
            traffic: TrafficConfig { interval_ticks, seed: 42 },
            ..EngineConfig::default()
        });
        engine.load_graph(city_doc()).unwrap();
        engine
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod load {
    use cr_graph::GraphError;

    use super::helpers::{city_doc, engine};
    use crate::{Edge, EngineError, RoutingEngine};

    #[test]
    fn load_accepts_dangling_edge() {
        let engine = engine();
        assert_eq!(engine.store().node_count(), 4);
        assert_eq!(engine.store().edge_count(), 4);
    }

    #[test]
    fn zero_weight_fails_the_load() {
        let mut doc = city_doc();
        doc.edges.push(Edge::new("A", "B", 0));
        let mut engine = RoutingEngine::new();
        let err = engine.load_graph(doc).unwrap_err();
        assert!(matches!(err, EngineError::Graph(GraphError::ZeroWeight { .. })));
    }

    #[test]
    fn malformed_json_fails_the_load() {
        let mut engine = RoutingEngine::new();
        let err = engine.load_graph_json("{not json").unwrap_err();
        assert!(matches!(err, EngineError::Graph(GraphError::Parse(_))));
    }

    #[test]
    fn failed_load_keeps_serving_the_old_graph() {
        let mut engine = engine();

        let mut bad = city_doc();
        bad.edges.push(Edge::new("B", "C", 0));
        assert!(engine.load_graph(bad).is_err());

        let route = engine.compute_route("A", "C").unwrap().unwrap();
        assert_eq!(route.path, vec!["A", "B", "C"]);
    }
}

// ── Route computation ─────────────────────────────────────────────────────────

#[cfg(test)]
mod routes {
    use cr_routing::RoutingError;

    use super::helpers::{city_doc, engine};
    use crate::{EngineError, RoutingEngine};

    #[test]
    fn two_hop_beats_direct_road() {
        let mut engine = engine();
        let route = engine.compute_route("A", "C").unwrap().unwrap();
        assert_eq!(route.path, vec!["A", "B", "C"]);
        assert_eq!(route.total, 10);
    }

    #[test]
    fn direct_road_when_detour_removed() {
        let mut doc = city_doc();
        doc.edges.retain(|e| !(e.from == "A" && e.to == "B"));
        let mut engine = RoutingEngine::new();
        engine.load_graph(doc).unwrap();

        let route = engine.compute_route("A", "C").unwrap().unwrap();
        assert_eq!(route.path, vec!["A", "C"]);
        assert_eq!(route.total, 20);
    }

    #[test]
    fn edgeless_node_is_unreachable_not_an_error() {
        let mut engine = engine();
        assert!(engine.compute_route("A", "D").unwrap().is_none());
    }

    #[test]
    fn dangling_edge_target_raises_unknown_node() {
        let mut engine = engine();
        let err = engine.compute_route("A", "Z").unwrap_err();
        assert!(matches!(
            err,
            EngineError::Routing(RoutingError::UnknownNode(ref id)) if id == "Z"
        ));
    }

    #[test]
    fn source_equals_destination() {
        let mut engine = engine();
        let route = engine.compute_route("B", "B").unwrap().unwrap();
        assert_eq!(route.path, vec!["B"]);
        assert_eq!(route.total, 0);
    }

    #[test]
    fn idempotent_between_weight_mutations() {
        let mut engine = engine();
        let first = engine.compute_route("A", "C").unwrap();
        let second = engine.compute_route("A", "C").unwrap();
        assert_eq!(first, second);
    }
}

// ── Alternatives through the facade ───────────────────────────────────────────

#[cfg(test)]
mod alternatives {
    use super::helpers::engine;

    #[test]
    fn attempt_labels_survive_a_skipped_attempt() {
        let mut engine = engine();
        let candidates = engine.compute_alternatives("A", "C").unwrap();
        // Attempt 0 disconnects A; attempts 1 and 2 find the direct road.
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].label, "Route 2 (20 min)");
        assert_eq!(candidates[1].label, "Route 3 (20 min)");
    }

    #[test]
    fn candidates_are_capped_and_finite() {
        let mut engine = engine();
        let candidates = engine.compute_alternatives("A", "C").unwrap();
        assert!(candidates.len() <= 3);
        for c in &candidates {
            assert!(c.total >= 1);
            assert_eq!(c.path.first().map(String::as_str), Some("A"));
            assert_eq!(c.path.last().map(String::as_str), Some("C"));
        }
    }

    #[test]
    fn candidates_carry_display_names() {
        let mut engine = engine();
        let candidates = engine.compute_alternatives("A", "C").unwrap();
        assert_eq!(
            candidates[0].place_names,
            vec!["Connaught Place", "Janpath"]
        );
    }
}

// ── History ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod history {
    use super::helpers::engine;
    use crate::Tick;

    #[test]
    fn only_successful_routes_are_recorded() {
        let mut engine = engine();
        engine.compute_route("A", "C").unwrap();
        engine.compute_route("A", "D").unwrap(); // unreachable
        let _ = engine.compute_route("A", "Z"); // unknown node
        assert_eq!(engine.history().count(), 1);
    }

    #[test]
    fn newest_first_with_display_names() {
        let mut engine = engine();
        engine.compute_route("A", "C").unwrap();
        engine.compute_route("B", "C").unwrap();

        let summaries: Vec<&str> = engine.history().map(|h| h.summary.as_str()).collect();
        assert_eq!(
            summaries,
            vec![
                "Palika Bazar → Janpath",
                "Connaught Place → Palika Bazar → Janpath",
            ]
        );
    }

    #[test]
    fn bounded_at_capacity() {
        let mut engine = engine();
        for _ in 0..7 {
            engine.compute_route("A", "C").unwrap();
        }
        assert_eq!(engine.history().count(), 5);
    }

    #[test]
    fn entries_carry_the_computation_tick() {
        let mut engine = engine();
        engine.advance(3);
        engine.compute_route("A", "C").unwrap();
        assert_eq!(engine.history().next().unwrap().tick, Tick(3));
    }
}

// ── Traffic simulation through the facade ─────────────────────────────────────

#[cfg(test)]
mod traffic {
    use std::cell::Cell;
    use std::rc::Rc;

    use cr_graph::{MAX_WEIGHT, MIN_WEIGHT};

    use super::helpers::engine_with_interval;
    use crate::{Tick, TrafficChange};

    #[test]
    fn observer_fires_on_the_cadence() {
        let mut engine = engine_with_interval(2);
        let fired = Rc::new(Cell::new(0usize));

        let counter = Rc::clone(&fired);
        engine.start_traffic_simulation(move |_tick: Tick, _changes: &[TrafficChange]| {
            counter.set(counter.get() + 1);
        });
        engine.advance(10);

        assert_eq!(fired.get(), 5); // T2, T4, T6, T8, T10
        assert!(engine.traffic_running());
    }

    #[test]
    fn weights_stay_in_bounds_under_simulation() {
        let mut engine = engine_with_interval(1);
        engine.start_traffic_simulation(crate::NoopObserver);
        engine.advance(50);
        for e in engine.store().edges() {
            assert!((MIN_WEIGHT..=MAX_WEIGHT).contains(&e.weight));
        }
    }

    #[test]
    fn stop_halts_notifications() {
        let mut engine = engine_with_interval(2);
        let fired = Rc::new(Cell::new(0usize));

        let counter = Rc::clone(&fired);
        engine.start_traffic_simulation(move |_tick: Tick, _changes: &[TrafficChange]| {
            counter.set(counter.get() + 1);
        });
        engine.advance(4);
        assert_eq!(fired.get(), 2);

        engine.stop_traffic_simulation();
        assert!(!engine.traffic_running());
        engine.advance(10);
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn restart_replaces_observer_and_resets_cadence() {
        let mut engine = engine_with_interval(2);
        let first = Rc::new(Cell::new(0usize));
        let second = Rc::new(Cell::new(0usize));

        let c1 = Rc::clone(&first);
        engine.start_traffic_simulation(move |_t: Tick, _c: &[TrafficChange]| {
            c1.set(c1.get() + 1);
        });
        engine.advance(1); // T1 — nothing due yet

        let c2 = Rc::clone(&second);
        engine.start_traffic_simulation(move |_t: Tick, _c: &[TrafficChange]| {
            c2.set(c2.get() + 1);
        });
        engine.advance(1); // T2 — cadence was reset at T1, next fire is T3
        assert_eq!(second.get(), 0);

        engine.advance(1); // T3 — fires on the new observer only
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn routes_recompute_against_updated_weights() {
        let mut engine = engine_with_interval(2);
        engine.start_traffic_simulation(crate::NoopObserver);
        engine.advance(6);

        // Weights have moved, but the route contract holds.
        let route = engine.compute_route("A", "C").unwrap().unwrap();
        assert_eq!(route.path.first().map(String::as_str), Some("A"));
        assert_eq!(route.path.last().map(String::as_str), Some("C"));
        assert!(route.total >= 1);
    }

    #[test]
    fn gusts_apply_outside_the_schedule() {
        let mut engine = engine_with_interval(2);
        let changes = engine.apply_traffic_gust(4, -3, 6);
        assert_eq!(changes.len(), 4);
        assert!(engine.recent_traffic_changes().count() >= 4);
        assert!(!engine.traffic_running());
    }
}

// ── Map-click snap ────────────────────────────────────────────────────────────

#[cfg(test)]
mod snap {
    use super::helpers::engine;
    use crate::GeoPoint;

    #[test]
    fn nearest_node_by_position() {
        let engine = engine();
        assert_eq!(engine.nearest_node(GeoPoint::new(0.0, 0.0)), Some("A"));
        assert_eq!(engine.nearest_node(GeoPoint::new(1.9, 2.1)), Some("D"));
    }
}
