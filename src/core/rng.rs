//! Seeded randomness for every game.
//!
//! A game owns one root `GameRng`. Each concern that draws numbers (apple
//! placement, the rival's walk, asteroid spawns) takes its own stream from
//! `for_context`, so adding draws to one concern never shifts another. A
//! restart takes the next root from `fork`.
//!
//! ```
//! use arcade_lab::core::GameRng;
//!
//! let root = GameRng::new(42);
//! let mut apples = root.for_context("spawn");
//! let mut again = GameRng::new(42).for_context("spawn");
//! assert_eq!(apples.gen_cell(24, 32, 0), again.gen_cell(24, 32, 0));
//! ```

use std::hash::{Hash, Hasher};
use std::ops::Range;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;

use super::geometry::{Coord, Vec2};

/// Golden-ratio increment between successive forks.
const FORK_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// ChaCha8 stream that remembers its seed.
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

    /// Root for the next round. Successive forks of the same root differ.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::new(self.seed.wrapping_add(self.forks.wrapping_mul(FORK_STRIDE)))
    }

    /// Named stream derived from this seed, independent of draws made so far.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    // === Draws ===

    pub fn gen_range(&mut self, range: Range<i32>) -> i32 {
        self.inner.gen_range(range)
    }

    /// Uniform in `[low, high]`; `low` when the range is empty.
    pub fn gen_f32(&mut self, low: f32, high: f32) -> f32 {
        if high <= low {
            return low;
        }
        self.inner.gen_range(low..=high)
    }

    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    /// True on a roll of 1 with an `n`-sided die. Always true for `n <= 1`.
    pub fn one_in(&mut self, n: u32) -> bool {
        n <= 1 || self.inner.gen_range(1..=n) == 1
    }

    #[must_use]
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.inner)
    }

    /// A board cell at least `margin` cells from every edge.
    ///
    /// The margin shrinks to fit when the board is too small for it.
    pub fn gen_cell(&mut self, rows: u32, cols: u32, margin: u32) -> Coord {
        let row_margin = margin.min(rows.saturating_sub(1) / 2) as i32;
        let col_margin = margin.min(cols.saturating_sub(1) / 2) as i32;
        let row = self.inner.gen_range(row_margin..=rows as i32 - row_margin - 1);
        let col = self.inner.gen_range(col_margin..=cols as i32 - col_margin - 1);
        Coord::new(row, col)
    }

    /// A point in a `width` x `height` arena at least `margin` from every edge.
    pub fn gen_point(&mut self, width: f32, height: f32, margin: f32) -> Vec2 {
        Vec2::new(
            self.gen_f32(margin, width - margin),
            self.gen_f32(margin, height - margin),
        )
    }
}
