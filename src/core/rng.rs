//! Injectable, deterministic random source shared by every game.
//!
//! Food cells, tetrominoes, candy kinds, lane layouts, target spawns and
//! opponent move choice all draw from a `GameRng`. The host owns one root
//! stream and forks a child for each game it mounts, so one seed replays a
//! whole sitting.
//!
//! ```
//! use arcade_engine::core::GameRng;
//!
//! let mut root = GameRng::new(42);
//! let mut snake = root.fork();
//! let mut tetris = root.fork();
//!
//! let a: Vec<_> = (0..8).map(|_| snake.gen_range_usize(0..1000)).collect();
//! let b: Vec<_> = (0..8).map(|_| tetris.gen_range_usize(0..1000)).collect();
//! assert_ne!(a, b);
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Golden-ratio increment spreading fork seeds apart.
const FORK_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seeded ChaCha8 stream.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            forks: 0,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Child stream. The n-th fork of a given seed is always the same.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::new(self.seed.wrapping_add(self.forks.wrapping_mul(FORK_STRIDE)))
    }

    /// Uniform index in `range`.
    ///
    /// # Panics
    ///
    /// Panics if `range` is empty.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Uniform float in `[0, 1)`.
    pub fn gen_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Uniform pick from a slice; `None` when it is empty.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }
}
