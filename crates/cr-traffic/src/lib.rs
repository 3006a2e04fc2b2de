//! `cr-traffic` — the traffic perturbation process.
//!
//! # Crate layout
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`simulator`] | `TrafficSimulator`, `TrafficConfig`, `TrafficChange`  |
//! | [`observer`]  | `TrafficObserver` trait, `NoopObserver`               |
//!
//! # Scheduling model
//!
//! There is no ambient timer.  The simulator is an explicit `Idle`/`Running`
//! state machine; the owner advances a `Tick` clock and calls
//! [`TrafficSimulator::poll`] after each advance.  Because everything runs
//! on the caller's thread, a firing rewrites the whole weight set
//! start-to-finish before any reader can look — each tick's update is
//! atomic as far as route computations are concerned.

pub mod observer;
pub mod simulator;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use observer::{NoopObserver, TrafficObserver};
pub use simulator::{
    TrafficChange, TrafficConfig, TrafficSimulator, DEFAULT_INTERVAL_TICKS, TICK_DELTA_MAX,
    TICK_DELTA_MIN,
};
