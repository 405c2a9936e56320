//! Variable Neighborhood Search execution engine.
//!
//! # Algorithm
//!
//! 1. Start from a random assignment x
//! 2. While no stopping criterion has fired, for k in `k_min..k_max`:
//!    a. **Shaking**: perturb `min(k, demands)` distinct demands of x,
//!    each fully rerouted or partially re-spliced
//!    b. **Local search**: first-improvement re-splice sweeps → x''
//!    c. **Move or not**: if score(x'') > score(x), or the scores tie and
//!    a `move_prob` coin lands, set x = x''
//! 3. Return x
//!
//! # Reference
//!
//! Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
//! *Computers & Operations Research* 24(11), 1097-1100.

use super::config::VnsConfig;
use crate::error::RoutingResult;
use crate::mutation::{generate_neighbor, initial_solution, reroute_entire_demand};
use crate::network::Network;
use crate::random::create_rng;
use crate::solution::Solution;
use crate::stopping::{Budget, StoppingCriteria, StoppingReason};
use crate::strategy::{Outcome, RoutedSolution, Strategy};
use rand::seq::{index, SliceRandom};
use rand::Rng;
use tracing::debug;

/// Result of a VNS run.
#[derive(Debug, Clone)]
pub struct VnsResult {
    /// Final incumbent. Only improving or equal moves are accepted, so it is
    /// also the best solution visited.
    pub best: Solution,
    /// Score of the incumbent.
    pub best_score: f64,
    /// Shake-and-search attempts executed.
    pub iterations: usize,
    /// Attempt at which the incumbent last strictly improved.
    pub best_iteration: usize,
    pub stopping_reason: StoppingReason,
    /// Incumbent score after each completed pass over `k_min..k_max`.
    pub score_history: Vec<f64>,
}

impl From<VnsResult> for RoutedSolution {
    fn from(result: VnsResult) -> Self {
        Self {
            solution: result.best,
            stopping_reason: result.stopping_reason,
            iterations: result.iterations,
        }
    }
}

/// Variable Neighborhood Search runner.
pub struct VnsRunner;

impl VnsRunner {
    /// Executes VNS on `network`.
    ///
    /// Only a strict improvement resets the no-improvement counter; a
    /// sideways move to an equally scored candidate does not.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_flowroute::network::NetworkBuilder;
    /// use u_flowroute::vns::{VnsConfig, VnsRunner};
    ///
    /// let network = NetworkBuilder::new()
    ///     .add_edge(0, 1, 4)
    ///     .add_edge(1, 2, 4)
    ///     .add_edge(0, 2, 4)
    ///     .add_demand(0, 2, 3)
    ///     .add_demand(0, 2, 3)
    ///     .build()
    ///     .unwrap();
    ///
    /// let config = VnsConfig::default()
    ///     .with_no_improvement_threshold(20)
    ///     .with_seed(42);
    /// let result = VnsRunner::run(&network, &config).unwrap();
    /// assert!(result.best.is_feasible());
    /// ```
    pub fn run(network: &Network, config: &VnsConfig) -> RoutingResult<VnsResult> {
        config.validate()?;

        let mut rng = create_rng(config.seed);

        let mut current = initial_solution(network, &mut rng)?;
        let mut current_score = current.score();
        let mut best_iteration = 0;

        let mut budget = Budget::start(&config.stopping);
        let mut score_history = vec![current_score];

        let stopping_reason = 'search: loop {
            for k in config.k_min..config.k_max {
                if let Some(reason) = budget.exhausted() {
                    break 'search reason;
                }

                let shaken = shake(&current, network, k, config.reroute_prob, &mut rng)?;
                let (candidate, candidate_score) = local_search(shaken, network, &mut rng)?;

                let improved = candidate_score > current_score;
                let sideways =
                    !improved && candidate_score == current_score && rng.random_bool(config.move_prob);

                if improved || sideways {
                    current = candidate;
                    current_score = candidate_score;
                }
                if improved {
                    best_iteration = budget.iterations() + 1;
                    debug!(iteration = best_iteration, k, score = current_score, "new best");
                }

                budget.record(improved);
            }
            score_history.push(current_score);
        };

        debug!(
            %stopping_reason,
            iterations = budget.iterations(),
            best_score = current_score,
            "neighborhood search finished"
        );

        Ok(VnsResult {
            best: current,
            best_score: current_score,
            iterations: budget.iterations(),
            best_iteration,
            stopping_reason,
            score_history,
        })
    }
}

impl Strategy for VnsConfig {
    fn name(&self) -> &'static str {
        "VariableNeighborhoodSearch"
    }

    fn stopping(&self) -> &StoppingCriteria {
        &self.stopping
    }

    fn solve(&self, network: &Network) -> RoutingResult<Outcome> {
        VnsRunner::run(network, self).map(|result| Outcome::Routed(result.into()))
    }
}

/// Perturbs `min(k, demands)` distinct demands of `solution`.
///
/// Each chosen demand is fully rerouted with probability `reroute_prob`,
/// otherwise partially re-spliced.
fn shake<R: Rng>(
    solution: &Solution,
    network: &Network,
    k: usize,
    reroute_prob: f64,
    rng: &mut R,
) -> RoutingResult<Solution> {
    let amount = k.min(solution.len());
    let mut shaken = solution.clone();
    for demand in index::sample(rng, solution.len(), amount) {
        shaken = if rng.random_bool(reroute_prob) {
            reroute_entire_demand(&shaken, network, demand, rng)?
        } else {
            generate_neighbor(&shaken, network, Some(demand), rng)?
        };
    }
    Ok(shaken)
}

/// First-improvement descent over partial re-splices.
///
/// Each sweep visits the demands in random order and restarts on the first
/// improving splice; a sweep without improvement ends the descent.
fn local_search<R: Rng>(
    mut solution: Solution,
    network: &Network,
    rng: &mut R,
) -> RoutingResult<(Solution, f64)> {
    let mut score = solution.score();
    let mut order: Vec<usize> = (0..solution.len()).collect();

    'sweep: loop {
        order.shuffle(rng);
        for &demand in &order {
            let candidate = generate_neighbor(&solution, network, Some(demand), rng)?;
            let candidate_score = candidate.score();
            if candidate_score > score {
                solution = candidate;
                score = candidate_score;
                continue 'sweep;
            }
        }
        return Ok((solution, score));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::fixtures;
    use std::time::Duration;

    #[test]
    fn test_shake_touches_at_most_k_demands() {
        let network = fixtures::grid(4, 10, 1);
        let mut rng = create_rng(Some(42));
        let solution = initial_solution(&network, &mut rng).unwrap();

        for k in 1..=4 {
            for _ in 0..20 {
                let shaken = shake(&solution, &network, k, 0.5, &mut rng).unwrap();
                let changed = solution
                    .flow_paths()
                    .iter()
                    .zip(shaken.flow_paths())
                    .filter(|(a, b)| a != b)
                    .count();
                assert!(
                    changed <= k.min(solution.len()),
                    "k={k} changed {changed} demands"
                );
                for fp in shaken.flow_paths() {
                    assert!(fp.connects_demand());
                    assert!(fp.path.is_simple());
                }
            }
        }
    }

    #[test]
    fn test_local_search_never_worsens() {
        let network = fixtures::grid(4, 3, 2);
        let mut rng = create_rng(Some(7));
        for _ in 0..10 {
            let start = initial_solution(&network, &mut rng).unwrap();
            let start_score = start.score();
            let (improved, score) = local_search(start, &network, &mut rng).unwrap();
            assert!(score >= start_score);
            assert_eq!(score, improved.score());
        }
    }

    #[test]
    fn test_ample_capacity_is_feasible() {
        let network = fixtures::grid(4, 100, 1);
        let config = VnsConfig::default()
            .with_max_time(Duration::from_secs(5))
            .with_no_improvement_threshold(20)
            .with_seed(42);

        let result = VnsRunner::run(&network, &config).unwrap();

        assert!(result.best.is_feasible());
        assert!(result.best_score > 0.0);
    }

    #[test]
    fn test_finds_split_on_diamond() {
        let network = fixtures::diamond(10);
        let config = VnsConfig::default()
            .with_k_range(1, 3)
            .with_no_improvement_threshold(30)
            .with_seed(5);

        let result = VnsRunner::run(&network, &config).unwrap();

        assert!(
            (result.best_score - 0.5).abs() < 1e-12,
            "expected score 0.5, got {}",
            result.best_score
        );
        assert_eq!(result.stopping_reason, StoppingReason::NoImprovement);
    }

    #[test]
    fn test_sideways_moves_do_not_prevent_termination() {
        // Every assignment on the diamond's optimum plateau ties; with
        // move_prob = 1 the incumbent keeps moving but must still stop.
        let network = fixtures::diamond(10);
        let config = VnsConfig::default()
            .with_move_prob(1.0)
            .with_stopping(StoppingCriteria::unbounded().with_no_improvement_threshold(15))
            .with_seed(3);

        let result = VnsRunner::run(&network, &config).unwrap();

        assert_eq!(result.stopping_reason, StoppingReason::NoImprovement);
        assert!(result.iterations >= 15);
    }

    #[test]
    fn test_iteration_limit() {
        let network = fixtures::grid(3, 10, 1);
        let config = VnsConfig::default()
            .with_k_range(1, 4)
            .with_stopping(StoppingCriteria::unbounded().with_max_iterations(7))
            .with_seed(1);

        let result = VnsRunner::run(&network, &config).unwrap();

        assert_eq!(result.iterations, 7);
        assert_eq!(result.stopping_reason, StoppingReason::IterationLimit);
        // Two complete passes of three neighborhoods each.
        assert_eq!(result.score_history.len(), 3);
        for window in result.score_history.windows(2) {
            assert!(window[1] >= window[0]);
        }
    }

    #[test]
    fn test_strategy_name() {
        let config = VnsConfig::default();
        assert_eq!(config.name(), "VariableNeighborhoodSearch");
        assert!(config.parameters().contains("k_max: 5"));
    }
}
