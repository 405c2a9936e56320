//! Seeded random number generation shared by all strategies.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates the strategy RNG: reproducible with a seed, OS-random otherwise.
pub fn create_rng(seed: Option<u64>) -> StdRng {
    StdRng::seed_from_u64(seed.unwrap_or_else(rand::random))
}
