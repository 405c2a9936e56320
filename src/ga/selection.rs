//! Parent selection for the GA.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::types::Individual;
use rand::seq::index;
use rand::Rng;

/// Tournament selection: sample `size` distinct individuals, return the
/// index of the fittest.
///
/// `size` is clamped to `1..=population.len()`. Higher `size` means
/// stronger selection pressure; a tournament over the whole population
/// always returns the best individual. Returns 0 for an empty population.
pub(crate) fn tournament<R: Rng>(population: &[Individual], size: usize, rng: &mut R) -> usize {
    let n = population.len();
    let k = size.max(1).min(n);

    index::sample(rng, n, k)
        .into_iter()
        .max_by(|&a, &b| population[a].fitness().total_cmp(&population[b].fitness()))
        .unwrap_or(0)
}
