//! Random sources

use rand::{
    Rng, SeedableRng,
    rngs::{StdRng, ThreadRng},
};

/// Source of uniformly distributed indexes.
///
/// Promotion generation draws all of its randomness through this trait so
/// tests can script the exact values produced.
pub trait RandomSource {
    /// Return an index in `0..bound`. A `bound` of `0` yields `0`.
    fn next_index(&mut self, bound: usize) -> usize;
}

/// [`RandomSource`] backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl RngSource<ThreadRng> {
    /// Non-deterministic source using the thread-local generator.
    pub fn thread() -> Self {
        Self(rand::thread_rng())
    }
}

impl RngSource<StdRng> {
    /// Deterministic source seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_index(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }

        self.0.gen_range(0..bound)
    }
}

/// [`RandomSource`] replaying a fixed script of indexes.
///
/// The script cycles once exhausted and each value is reduced modulo the
/// requested bound. An empty script always yields `0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    script: Vec<usize>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Replay `script` in order.
    pub fn new(script: impl Into<Vec<usize>>) -> Self {
        Self {
            script: script.into(),
            cursor: 0,
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_index(&mut self, bound: usize) -> usize {
        if bound == 0 || self.script.is_empty() {
            return 0;
        }

        let value = self
            .script
            .get(self.cursor % self.script.len())
            .copied()
            .unwrap_or_default();

        self.cursor = self.cursor.wrapping_add(1);

        value % bound
    }
}
