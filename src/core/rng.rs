//! Seeded randomness for deals and automatic players.
//!
//! Every shuffle in a game comes from one `GameRng` seeded by
//! `GameConfig::seed`, so a seed plus a move sequence replays a game exactly.
//! Batches derive one seed per game with `derive_seed` instead of sharing a
//! generator between threads.
//!
//! ```
//! use hanamikoji::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.shuffled_deck(), b.shuffled_deck());
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::cards::{full_deck, CardType};

/// Golden-ratio increment spreading derived seeds over the `u64` range.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// ChaCha8 generator remembering the seed it started from.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed of the `index`-th stream derived from `base`.
    #[must_use]
    pub fn derive_seed(base: u64, index: u64) -> u64 {
        base.wrapping_add(index.wrapping_add(1).wrapping_mul(SEED_STRIDE))
    }

    /// The seed this generator was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The 21-card deck in a fresh random order.
    #[must_use]
    pub fn shuffled_deck(&mut self) -> Vec<CardType> {
        let mut deck = full_deck();
        self.shuffle(&mut deck);
        deck
    }

    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Uniform choice; `None` for an empty slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }
}
