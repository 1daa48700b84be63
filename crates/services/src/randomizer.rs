//! Presentation-order shuffling.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Source of presentation-order permutations.
///
/// `Thread` draws from the thread-local RNG; `Seeded` carries its own `StdRng`
/// so tests get deterministic orderings. Either way each call produces an
/// unbiased permutation; there is no requirement that consecutive permutations
/// differ.
#[derive(Debug, Clone)]
pub enum Shuffler {
    Thread,
    Seeded(StdRng),
}

impl Default for Shuffler {
    fn default() -> Self {
        Self::Thread
    }
}

impl Shuffler {
    /// A shuffler with a fixed seed, for deterministic tests.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::Seeded(StdRng::seed_from_u64(seed))
    }

    /// Returns a fresh uniformly random permutation of `0..n`.
    pub fn permutation(&mut self, n: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..n).collect();
        match self {
            Shuffler::Thread => order.shuffle(&mut rand::rng()),
            Shuffler::Seeded(rng) => order.shuffle(rng),
        }
        order
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
