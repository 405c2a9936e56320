//! SA execution loop.

use super::config::{SaConfig, MIN_TEMPERATURE};
use crate::error::RoutingResult;
use crate::mutation::{generate_neighbor, initial_solution};
use crate::network::Network;
use crate::random::create_rng;
use crate::solution::Solution;
use crate::stopping::{Budget, StoppingCriteria, StoppingReason};
use crate::strategy::{Outcome, RoutedSolution, Strategy};
use rand::Rng;
use tracing::debug;

/// Best score is sampled into the history every this many iterations.
const HISTORY_INTERVAL: usize = 100;

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult {
    /// The best solution found.
    pub best: Solution,

    /// Score of the best solution.
    pub best_score: f64,

    /// Total number of iterations (neighbor evaluations).
    pub iterations: usize,

    /// Temperature when the algorithm stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of moves that improved on the current solution.
    pub improving_moves: usize,

    pub stopping_reason: StoppingReason,

    /// Best score sampled at regular intervals.
    pub score_history: Vec<f64>,
}

impl From<SaResult> for RoutedSolution {
    fn from(result: SaResult) -> Self {
        Self {
            solution: result.best,
            stopping_reason: result.stopping_reason,
            iterations: result.iterations,
        }
    }
}

/// Executes Simulated Annealing over path assignments.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA optimization.
    ///
    /// Each iteration proposes a partial re-splice of a random demand.
    /// Better neighbors are always accepted; worse ones with the Metropolis
    /// probability `exp(Δscore / T)`. The best solution is tracked by score
    /// independently of acceptance.
    pub fn run(network: &Network, config: &SaConfig) -> RoutingResult<SaResult> {
        config.validate()?;

        let mut rng = create_rng(config.seed);

        let mut current = initial_solution(network, &mut rng)?;
        let mut current_score = current.score();
        let mut best = current.clone();
        let mut best_score = current_score;

        let mut temperature = config.initial_temp;
        let mut budget = Budget::start(&config.stopping);
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;

        let mut score_history = vec![best_score];

        let stopping_reason = loop {
            if let Some(reason) = budget.exhausted() {
                break reason;
            }

            let neighbor = generate_neighbor(&current, network, None, &mut rng)?;
            let neighbor_score = neighbor.score();
            let delta = neighbor_score - current_score;

            // Metropolis acceptance criterion
            let accept = if delta > 0.0 {
                improving_moves += 1;
                true
            } else {
                rng.random_range(0.0..1.0) < acceptance_probability(delta, temperature)
            };

            let new_best = neighbor_score > best_score;
            if new_best {
                best = neighbor.clone();
                best_score = neighbor_score;
                debug!(iteration = budget.iterations(), best_score, temperature, "new best");
            }

            if accept {
                current = neighbor;
                current_score = neighbor_score;
                accepted_moves += 1;
            }

            budget.record(new_best);
            if budget.iterations() % HISTORY_INTERVAL == 0 {
                score_history.push(best_score);
            }

            temperature = cool(temperature, config.cooling_rate);
            if temperature < MIN_TEMPERATURE {
                break StoppingReason::TemperatureFloor;
            }
        };

        if score_history
            .last()
            .map_or(true, |&last| (last - best_score).abs() > 1e-15)
        {
            score_history.push(best_score);
        }

        debug!(
            %stopping_reason,
            iterations = budget.iterations(),
            best_score,
            "annealing finished"
        );

        Ok(SaResult {
            best,
            best_score,
            iterations: budget.iterations(),
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            stopping_reason,
            score_history,
        })
    }
}

impl Strategy for SaConfig {
    fn name(&self) -> &'static str {
        "SimulatedAnnealing"
    }

    fn stopping(&self) -> &StoppingCriteria {
        &self.stopping
    }

    fn solve(&self, network: &Network) -> RoutingResult<Outcome> {
        SaRunner::run(network, self).map(|result| Outcome::Routed(result.into()))
    }
}

/// Probability of accepting a move that changes the score by `delta <= 0`.
fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    if temperature > 0.0 {
        (delta / temperature).exp()
    } else {
        0.0
    }
}

/// Geometric cooling step.
fn cool(temperature: f64, cooling_rate: f64) -> f64 {
    temperature * cooling_rate
}
