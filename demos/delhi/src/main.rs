//! delhi — smart-city routing demo on a Connaught Place–area graph.
//!
//! Loads the embedded Delhi graph, computes a route and its alternatives,
//! runs the traffic simulation for a few ticks, and prints the figures the
//! map UI would render.  Run with `RUST_LOG=debug` to watch the engine's
//! internal logging.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;

use cr_engine::{EngineConfig, GeoPoint, RoutingEngine, Tick, TrafficChange, TrafficConfig};

// ── Constants ─────────────────────────────────────────────────────────────────

const SOURCE:    &str = "A";
const DEST:      &str = "J";
const SEED:      u64  = 42;
const SIM_TICKS: u64  = 10;

// ── Embedded graph ────────────────────────────────────────────────────────────

// Ten places around Connaught Place, New Delhi.  Weights are travel minutes.
const DELHI_GRAPH_JSON: &str = r#"{
  "nodes": {
    "A": {"name": "Connaught Place",   "coords": [28.6308, 77.2177]},
    "B": {"name": "Palika Bazar",      "coords": [28.6315, 77.2185]},
    "C": {"name": "Janpath",           "coords": [28.6295, 77.2190]},
    "D": {"name": "Barakhamba",        "coords": [28.6320, 77.2150]},
    "E": {"name": "Bengali Market",    "coords": [28.6285, 77.2200]},
    "F": {"name": "Parliament Street", "coords": [28.6270, 77.2140]},
    "G": {"name": "India Gate",        "coords": [28.6297, 77.2245]},
    "H": {"name": "Patel Chowk",       "coords": [28.6330, 77.2160]},
    "I": {"name": "Rajiv Chowk",       "coords": [28.6310, 77.2190]},
    "J": {"name": "Barakhamba Road",   "coords": [28.6325, 77.2175]}
  },
  "edges": [
    {"from": "A", "to": "B", "weight": 2},
    {"from": "A", "to": "C", "weight": 4},
    {"from": "A", "to": "I", "weight": 3},
    {"from": "B", "to": "I", "weight": 1},
    {"from": "B", "to": "C", "weight": 3},
    {"from": "C", "to": "E", "weight": 5},
    {"from": "C", "to": "F", "weight": 6},
    {"from": "D", "to": "H", "weight": 4},
    {"from": "D", "to": "J", "weight": 2},
    {"from": "E", "to": "G", "weight": 7},
    {"from": "F", "to": "H", "weight": 5},
    {"from": "G", "to": "J", "weight": 9},
    {"from": "H", "to": "J", "weight": 3},
    {"from": "I", "to": "D", "weight": 5},
    {"from": "F", "to": "A", "weight": 8}
  ]
}"#;

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    println!("=== delhi — cityroute routing engine ===");
    println!("Source: {SOURCE}  |  Destination: {DEST}  |  Seed: {SEED}");
    println!();

    let mut engine = RoutingEngine::with_config(EngineConfig {
        traffic: TrafficConfig { interval_ticks: 2, seed: SEED },
        ..EngineConfig::default()
    });

    // 1. Load the graph.
    engine.load_graph_json(DELHI_GRAPH_JSON)?;
    let stats = engine.stats();
    println!(
        "Graph: {} nodes, {} edges, mean traffic {:.1} min",
        stats.node_count, stats.edge_count, stats.mean_weight
    );
    println!();

    // 2. Shortest route under the loaded weights.
    print_route(&mut engine, "Shortest route")?;

    // 3. Alternative candidates.
    println!("Alternatives:");
    let candidates = engine.compute_alternatives(SOURCE, DEST)?;
    if candidates.is_empty() {
        println!("  (none found)");
    }
    for c in &candidates {
        println!("  {:<18} {}", c.label, c.place_names.join(" → "));
    }
    println!();

    // 4. Run the traffic simulation for a while.
    println!("Simulating traffic for {SIM_TICKS} ticks:");
    let updates = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&updates);
    engine.start_traffic_simulation(move |tick: Tick, changes: &[TrafficChange]| {
        counter.set(counter.get() + 1);
        println!("  {tick}: {} roads updated", changes.len());
    });
    engine.advance(SIM_TICKS);
    engine.stop_traffic_simulation();

    let after = engine.stats();
    println!(
        "{} updates | mean traffic {:.1} min | {} congested, {} moderate",
        updates.get(),
        after.mean_weight,
        after.congested_edges,
        after.moderate_edges
    );
    println!();

    // 5. The same request under the new traffic.
    print_route(&mut engine, "Route after traffic")?;

    // 6. Map-click snap.
    let click = GeoPoint::new(28.6300, 77.2200);
    if let Some(id) = engine.nearest_node(click) {
        println!("Nearest node to {click}: {id}");
    }
    println!();

    // 7. Route history, newest first.
    println!("{:<48} {:>5} {:>6}", "History", "Min", "Tick");
    println!("{}", "-".repeat(61));
    for h in engine.history() {
        println!("{:<48} {:>5} {:>6}", h.summary, h.total, h.tick.0);
    }

    Ok(())
}

/// Compute and print the SOURCE→DEST route, with a straight-line length for
/// scale (edge weights are minutes, not metres).
fn print_route(engine: &mut RoutingEngine, heading: &str) -> Result<()> {
    match engine.compute_route(SOURCE, DEST)? {
        Some(route) => {
            let km = straight_line_km(engine, &route.path);
            println!("{heading}: {} ({} min, ~{km:.1} km)", route.path.join(" → "), route.total);
        }
        None => println!("{heading}: no path found"),
    }
    println!();
    Ok(())
}

fn straight_line_km(engine: &RoutingEngine, path: &[String]) -> f64 {
    let nodes = engine.store().nodes();
    path.windows(2)
        .map(|pair| {
            match (nodes.resolve(&pair[0]), nodes.resolve(&pair[1])) {
                (Some(a), Some(b)) => nodes.position(a).distance_m(nodes.position(b)),
                _ => 0.0,
            }
        })
        .sum::<f64>()
        / 1000.0
}
