//! Seeded randomness.
//!
//! Every driver owns exactly one generator created here, and draws from it
//! in a fixed order, so a run is reproducible for a fixed seed.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Creates the generator used by all drivers.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Resolves an optional configured seed, drawing a fresh one when absent.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

/// Fisher-Yates shuffle in place.
pub fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Fair coin used to break exact ties between equally ranked candidates.
pub fn coin_flip<R: Rng>(rng: &mut R) -> bool {
    rng.random_bool(0.5)
}

/// Picks an index with probability proportional to `weights[i]`.
///
/// Returns 0 for an empty or all-zero weight list.
pub fn weighted_index<R: Rng>(weights: &[u64], rng: &mut R) -> usize {
    let total: u64 = weights.iter().sum();
    if total == 0 {
        return 0;
    }

    let mut roll = rng.random_range(0..total);
    for (i, &w) in weights.iter().enumerate() {
        if roll < w {
            return i;
        }
        roll -= w;
    }
    weights.len() - 1
}
