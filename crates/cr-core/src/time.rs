//! Engine time model.
//!
//! Time is a monotonically increasing `Tick` counter — one tick is one of
//! the reference behavior's "time units".  The engine never touches wall
//! clocks: the hosting application decides how fast ticks pass (the
//! reference UI mapped one tick to one second) and pumps the engine
//! explicitly, which keeps every run reproducible.

use std::fmt;

/// An absolute engine tick counter.
///
/// Stored as `u64`; at one tick per second a u64 lasts ~585 billion years.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
