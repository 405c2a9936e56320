//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → elitism → selection → crossover → mutation → repeat.

use super::config::GaConfig;
use super::selection::tournament;
use super::types::Individual;
use crate::error::{RoutingError, RoutingResult};
use crate::mutation::{generate_neighbor, initial_solution};
use crate::network::Network;
use crate::random::create_rng;
use crate::solution::{FlowPath, Solution};
use crate::stopping::{Budget, StoppingCriteria, StoppingReason};
use crate::strategy::{Outcome, RoutedSolution, Strategy};
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The best solution found during the entire run.
    pub best: Solution,

    /// Fitness (score) of `best`.
    pub best_fitness: f64,

    /// Total number of generations executed.
    pub generations: usize,

    pub stopping_reason: StoppingReason,

    /// Best fitness after initialization and after each generation.
    pub fitness_history: Vec<f64>,
}

impl From<GaResult> for RoutedSolution {
    fn from(result: GaResult) -> Self {
        Self {
            solution: result.best,
            stopping_reason: result.stopping_reason,
            iterations: result.generations,
        }
    }
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_flowroute::ga::{GaConfig, GaRunner};
/// use u_flowroute::network::NetworkBuilder;
///
/// let network = NetworkBuilder::new()
///     .add_edge(0, 1, 10)
///     .add_edge(1, 2, 10)
///     .add_edge(0, 2, 10)
///     .add_demand(0, 2, 6)
///     .add_demand(0, 2, 6)
///     .build()
///     .unwrap();
///
/// let config = GaConfig::default()
///     .with_population_size(10)
///     .with_tournament_size(3)
///     .with_elitism_size(2)
///     .with_max_generations(20)
///     .with_seed(42);
/// let result = GaRunner::run(&network, &config).unwrap();
/// assert!(result.best.is_feasible());
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    ///
    /// # Errors
    ///
    /// Invalid configuration, or a demand with no path at all.
    pub fn run(network: &Network, config: &GaConfig) -> RoutingResult<GaResult> {
        config.validate()?;

        let mut rng = create_rng(config.seed);

        let mut population = (0..config.population_size)
            .map(|_| initial_solution(network, &mut rng).map(Individual::new))
            .collect::<RoutingResult<Vec<_>>>()?;

        let mut best = fittest(&population).cloned().ok_or_else(|| {
            RoutingError::invalid_config("population_size", "must be at least 1")
        })?;
        let mut fitness_history = vec![best.fitness()];

        let mut budget = Budget::start(&config.stopping);

        let stopping_reason = loop {
            if let Some(reason) = budget.exhausted() {
                break reason;
            }

            population = next_generation(population, network, config, &mut rng)?;

            let improved = match fittest(&population) {
                Some(gen_best) if gen_best.fitness() > best.fitness() => {
                    best = gen_best.clone();
                    debug!(
                        generation = budget.iterations() + 1,
                        fitness = best.fitness(),
                        "new best"
                    );
                    true
                }
                _ => false,
            };

            budget.record(improved);
            fitness_history.push(best.fitness());
        };

        debug!(
            %stopping_reason,
            generations = budget.iterations(),
            best_fitness = best.fitness(),
            "evolution finished"
        );

        Ok(GaResult {
            best_fitness: best.fitness(),
            best: best.into_solution(),
            generations: budget.iterations(),
            stopping_reason,
            fitness_history,
        })
    }
}

impl Strategy for GaConfig {
    fn name(&self) -> &'static str {
        "GeneticAlgorithm"
    }

    fn stopping(&self) -> &StoppingCriteria {
        &self.stopping
    }

    fn solve(&self, network: &Network) -> RoutingResult<Outcome> {
        GaRunner::run(network, self).map(|result| Outcome::Routed(result.into()))
    }
}

/// Builds the next population from the current one.
///
/// The `elitism_size` fittest individuals are carried over unchanged and
/// come first; the remaining slots are filled with offspring.
pub(crate) fn next_generation<R: Rng>(
    mut population: Vec<Individual>,
    network: &Network,
    config: &GaConfig,
    rng: &mut R,
) -> RoutingResult<Vec<Individual>> {
    // Best first
    population.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));

    let elite_count = config.elitism_size.min(population.len());
    let offspring_count = config.population_size.saturating_sub(elite_count);

    let mut offspring = Vec::with_capacity(offspring_count);
    while offspring.len() + 1 < offspring_count {
        let p1 = &population[tournament(&population, config.tournament_size, rng)];
        let p2 = &population[tournament(&population, config.tournament_size, rng)];

        let (c1, c2) = uniform_crossover(p1.solution(), p2.solution(), rng);
        offspring.push(Individual::unevaluated(mutate(
            c1,
            network,
            config.mutation_prob,
            rng,
        )?));
        offspring.push(Individual::unevaluated(mutate(
            c2,
            network,
            config.mutation_prob,
            rng,
        )?));
    }
    if offspring.len() < offspring_count {
        let winner = &population[tournament(&population, config.tournament_size, rng)];
        let child = mutate(winner.solution().clone(), network, config.mutation_prob, rng)?;
        offspring.push(Individual::unevaluated(child));
    }

    evaluate_offspring(&mut offspring, config.parallel);

    population.truncate(elite_count);
    population.extend(offspring);
    Ok(population)
}

/// Per-demand uniform crossover: each demand's path is swapped between the
/// two children with probability 0.5.
fn uniform_crossover<R: Rng>(p1: &Solution, p2: &Solution, rng: &mut R) -> (Solution, Solution) {
    let (mut c1, mut c2): (Vec<FlowPath>, Vec<FlowPath>) = p1
        .flow_paths()
        .iter()
        .zip(p2.flow_paths())
        .map(|(a, b)| (a.clone(), b.clone()))
        .unzip();

    for (a, b) in c1.iter_mut().zip(c2.iter_mut()) {
        if rng.random_bool(0.5) {
            std::mem::swap(a, b);
        }
    }

    let capacities = p1.shared_capacities();
    (
        Solution::from_parts(capacities.clone(), c1),
        Solution::from_parts(capacities, c2),
    )
}

/// Re-splices each demand's path independently with probability `prob`.
fn mutate<R: Rng>(
    mut solution: Solution,
    network: &Network,
    prob: f64,
    rng: &mut R,
) -> RoutingResult<Solution> {
    for index in 0..solution.len() {
        if rng.random_bool(prob) {
            solution = generate_neighbor(&solution, network, Some(index), rng)?;
        }
    }
    Ok(solution)
}

#[cfg(feature = "parallel")]
fn evaluate_offspring(offspring: &mut [Individual], parallel: bool) {
    if parallel {
        offspring.par_iter_mut().for_each(Individual::evaluate);
    } else {
        offspring.iter_mut().for_each(Individual::evaluate);
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate_offspring(offspring: &mut [Individual], _parallel: bool) {
    offspring.iter_mut().for_each(Individual::evaluate);
}

/// The individual with the highest fitness.
fn fittest(population: &[Individual]) -> Option<&Individual> {
    population
        .iter()
        .max_by(|a, b| a.fitness().total_cmp(&b.fitness()))
}

// ============================================================================
// Tests
// ============================================================================
