//! Traffic observer contract.

use cr_core::Tick;

use crate::TrafficChange;

/// Callback invoked by [`TrafficSimulator::poll`][crate::TrafficSimulator::poll]
/// after each firing rewrites the edge weights.
///
/// The default implementation is a no-op so implementors only override what
/// they care about.  Typical consumers re-run their displayed routes against
/// the updated store.
pub trait TrafficObserver {
    /// Called once per firing, after every edge weight for that tick has
    /// been rewritten.
    fn on_weights_changed(&mut self, _tick: Tick, _changes: &[TrafficChange]) {}
}

/// A [`TrafficObserver`] that does nothing.
pub struct NoopObserver;

impl TrafficObserver for NoopObserver {}

/// Any `FnMut(Tick, &[TrafficChange])` closure is an observer — the shape
/// callers hand to the engine's start call.
impl<F: FnMut(Tick, &[TrafficChange])> TrafficObserver for F {
    fn on_weights_changed(&mut self, tick: Tick, changes: &[TrafficChange]) {
        self(tick, changes)
    }
}
