//! Seeded random number generation
//!
//! Uses a ChaCha RNG with an explicit seed so a layout can be regenerated
//! exactly, no matter how its steps are paced.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Dungeon random number generator
///
/// Wraps ChaCha8Rng for reproducible generation. Every stage that needs
/// randomness draws from the same instance, in pipeline order.
#[derive(Debug, Clone)]
pub struct DungeonRng {
    rng: ChaCha8Rng,
}

impl DungeonRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Returns 0..n-1
    ///
    /// Returns 0 if n is 0.
    fn rn2(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Returns a value in `lo..hi`
    ///
    /// An empty range yields `lo`.
    pub fn range(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..hi)
    }

    /// Returns a value in `lo..=hi`
    ///
    /// An empty range yields `lo`.
    pub fn range_inclusive(&mut self, lo: i32, hi: i32) -> i32 {
        if hi < lo {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    /// Returns true with probability 1/n
    pub fn one_in(&mut self, n: u32) -> bool {
        self.rn2(n) == 0
    }
}
