//! The recurring weight-perturbation process.
//!
//! Each firing draws, per edge, an integer delta uniform in
//! [`TICK_DELTA_MIN`]`..=`[`TICK_DELTA_MAX`] and applies
//! `clamp(weight + delta, MIN_WEIGHT, MAX_WEIGHT)` through the store, then
//! notifies the observer once with the full change list.  Draws come from a
//! seeded [`SimRng`], so a run's entire weight trajectory is reproducible
//! from its seed.
//!
//! # Observer resilience
//!
//! A panicking observer loses that tick's notification only: the panic is
//! caught, logged at `error` level, and the schedule keeps running.  Traffic
//! updates outlive a single broken consumer.

use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};

use cr_core::{EdgeId, SimRng, Tick};
use cr_graph::GraphStore;

use crate::TrafficObserver;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Smallest per-tick perturbation draw.
pub const TICK_DELTA_MIN: i32 = -5;
/// Largest per-tick perturbation draw.
pub const TICK_DELTA_MAX: i32 = 5;
/// Default firing cadence, in ticks.
pub const DEFAULT_INTERVAL_TICKS: u64 = 2;

/// Retained change-log entries; the oldest are dropped first.
const CHANGE_LOG_CAPACITY: usize = 256;

// ── Config & change record ────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct TrafficConfig {
    /// Ticks between firings.  A zero is treated as 1 — the schedule must
    /// always make progress.
    pub interval_ticks: u64,
    /// Seed for the perturbation RNG.
    pub seed: u64,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self { interval_ticks: DEFAULT_INTERVAL_TICKS, seed: 0 }
    }
}

/// One applied weight mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrafficChange {
    pub edge: EdgeId,
    /// The drawn delta, before clamping.
    pub delta: i32,
    /// The edge weight after clamping.
    pub new_weight: u32,
}

// ── TrafficSimulator ──────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
enum State {
    Idle,
    Running { next_fire: Tick },
}

/// Explicit-state recurring perturbation process.
///
/// Owned by the engine; never runs on its own.  The owner pumps time and
/// calls [`poll`](Self::poll) with the store and the current observer.
pub struct TrafficSimulator {
    config:     TrafficConfig,
    rng:        SimRng,
    state:      State,
    change_log: VecDeque<TrafficChange>,
}

impl TrafficSimulator {
    pub fn new(mut config: TrafficConfig) -> Self {
        config.interval_ticks = config.interval_ticks.max(1);
        let rng = SimRng::new(config.seed);
        Self {
            config,
            rng,
            state: State::Idle,
            change_log: VecDeque::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running { .. })
    }

    /// Begin (or re-begin) the recurring schedule.
    ///
    /// Starting while already running is a no-op apart from resetting the
    /// cadence relative to `now`.
    pub fn start(&mut self, now: Tick) {
        if !self.is_running() {
            log::debug!("traffic simulation started at {now}");
        }
        self.state = State::Running { next_fire: now + self.config.interval_ticks };
    }

    /// Idle the schedule.  A no-op when not running.
    pub fn stop(&mut self) {
        if self.is_running() {
            log::debug!("traffic simulation stopped");
        }
        self.state = State::Idle;
    }

    /// Fire every scheduled perturbation due at or before `now`.
    ///
    /// Returns the number of firings (a caller that polls every tick sees 0
    /// or 1; a caller that catches up after a gap may see more).
    pub fn poll(
        &mut self,
        now: Tick,
        store: &mut GraphStore,
        observer: &mut dyn TrafficObserver,
    ) -> usize {
        let mut fired = 0;
        while let State::Running { next_fire } = self.state {
            if next_fire > now {
                break;
            }
            self.fire(next_fire, store, observer);
            self.state = State::Running {
                next_fire: next_fire + self.config.interval_ticks,
            };
            fired += 1;
        }
        fired
    }

    fn fire(&mut self, tick: Tick, store: &mut GraphStore, observer: &mut dyn TrafficObserver) {
        let mut changes = Vec::with_capacity(store.edge_count());
        for i in 0..store.edge_count() {
            let edge = EdgeId(i as u32);
            let delta = self.rng.gen_range(TICK_DELTA_MIN..=TICK_DELTA_MAX);
            if let Some(new_weight) = store.apply_delta(edge, delta) {
                changes.push(TrafficChange { edge, delta, new_weight });
            }
        }
        log::debug!("traffic tick {tick}: perturbed {} edges", changes.len());
        self.record(&changes);

        // A broken observer must not take the schedule down with it.
        let notify = catch_unwind(AssertUnwindSafe(|| {
            observer.on_weights_changed(tick, &changes);
        }));
        if notify.is_err() {
            log::error!("traffic observer panicked at {tick}; schedule continues");
        }
    }

    // ── Targeted gusts ────────────────────────────────────────────────────

    /// Perturb `count` randomly chosen edges by a delta uniform in
    /// `[min_delta, max_delta]` (a zero draw is coerced to 1), outside the
    /// recurring schedule.  Returns the applied changes.
    pub fn apply_targeted(
        &mut self,
        store: &mut GraphStore,
        count: usize,
        min_delta: i32,
        max_delta: i32,
    ) -> Vec<TrafficChange> {
        debug_assert!(min_delta <= max_delta);
        if store.edge_count() == 0 {
            return Vec::new();
        }

        let mut changes = Vec::with_capacity(count);
        for _ in 0..count {
            let edge = EdgeId(self.rng.gen_range(0..store.edge_count() as u32));
            let mut delta = self.rng.gen_range(min_delta..=max_delta);
            if delta == 0 {
                delta = 1;
            }
            if let Some(new_weight) = store.apply_delta(edge, delta) {
                changes.push(TrafficChange { edge, delta, new_weight });
            }
        }
        self.record(&changes);
        changes
    }

    // ── Change log ────────────────────────────────────────────────────────

    fn record(&mut self, changes: &[TrafficChange]) {
        self.change_log.extend(changes.iter().copied());
        while self.change_log.len() > CHANGE_LOG_CAPACITY {
            self.change_log.pop_front();
        }
    }

    /// Recently applied changes, oldest first.
    pub fn recent_changes(&self) -> impl Iterator<Item = &TrafficChange> {
        self.change_log.iter()
    }

    /// Mean delta over a change batch — the simulator's trend summary.
    pub fn average_delta(changes: &[TrafficChange]) -> f64 {
        if changes.is_empty() {
            return 0.0;
        }
        let sum: i64 = changes.iter().map(|c| i64::from(c.delta)).sum();
        sum as f64 / changes.len() as f64
    }
}
