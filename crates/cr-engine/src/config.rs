//! Engine configuration.

use cr_traffic::TrafficConfig;

use crate::history::DEFAULT_HISTORY_CAPACITY;

/// Top-level engine configuration.
///
/// Typically built once by the hosting application and handed to
/// [`RoutingEngine::with_config`](crate::RoutingEngine::with_config).
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Traffic-simulation cadence and RNG seed.  The same seed always
    /// produces the same weight trajectory.
    pub traffic: TrafficConfig,

    /// Retained route-history entries (newest first).
    pub history_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            traffic: TrafficConfig::default(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}
