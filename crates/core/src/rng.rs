//! Single seeded random stream shared by every generation and movement decision.

use std::fmt;

use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Clone)]
pub struct RandomStream {
    seed: u64,
    draws: u64,
    rng: ChaCha8Rng,
}

impl RandomStream {
    pub fn from_seed(seed: u64) -> Self {
        Self { seed, draws: 0, rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of values consumed so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    fn next_raw(&mut self) -> u64 {
        self.draws += 1;
        self.rng.next_u64()
    }

    /// Uniform integer in `0..bound`. Panics when `bound` is not positive.
    pub fn uniform_below(&mut self, bound: i32) -> i32 {
        assert!(bound > 0, "uniform_below requires a positive bound, got {bound}");
        (self.next_raw() % bound as u64) as i32
    }

    /// Uniform integer in the half-open range `low..high`.
    pub fn uniform_range(&mut self, low: i32, high: i32) -> i32 {
        low + self.uniform_below(high - low)
    }

    pub fn uniform_index(&mut self, len: usize) -> usize {
        assert!(len > 0, "uniform_index requires a non-empty range");
        (self.next_raw() % len as u64) as usize
    }

    /// Uniform `f64` in `[0, 1)` built from the top 53 bits of one draw.
    pub fn uniform_unit(&mut self) -> f64 {
        (self.next_raw() >> 11) as f64 / (1_u64 << 53) as f64
    }
}

impl fmt::Debug for RandomStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomStream")
            .field("seed", &self.seed)
            .field("draws", &self.draws)
            .finish()
    }
}
