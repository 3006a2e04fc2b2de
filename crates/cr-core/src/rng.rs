//! Deterministic simulation RNG wrapper.
//!
//! # Determinism strategy
//!
//! The traffic simulator is the only source of randomness in the engine, and
//! it draws exclusively from a `SimRng` seeded by the run configuration.
//! The same seed therefore always produces the same weight trajectory — test
//! fixtures and demo runs are reproducible bit-for-bit.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seeded simulation RNG for traffic perturbation draws.
///
/// Used only in single-threaded contexts; the engine never shares one across
/// threads.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
