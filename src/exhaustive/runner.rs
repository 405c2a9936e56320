//! Exhaustive enumeration of path combinations.

use super::config::ExhaustiveConfig;
use crate::error::{RoutingError, RoutingResult};
use crate::mutation::PathFinder;
use crate::network::Network;
use crate::solution::{FlowPath, Solution};
use crate::stopping::{Budget, StoppingCriteria, StoppingReason};
use crate::strategy::{Outcome, RoutedSolution, Strategy};
use tracing::debug;

/// Result of an exhaustive search.
#[derive(Debug, Clone)]
pub struct ExhaustiveResult {
    /// Feasible combination with the lowest max load ratio, if any.
    pub best: Option<Solution>,
    /// Combinations evaluated.
    pub combinations: usize,
    /// Size of the full search space, saturating at `usize::MAX`.
    pub search_space: usize,
    pub stopping_reason: StoppingReason,
}

impl ExhaustiveResult {
    pub fn into_outcome(self) -> Outcome {
        match self.best {
            Some(solution) => Outcome::Routed(RoutedSolution {
                solution,
                stopping_reason: self.stopping_reason,
                iterations: self.combinations,
            }),
            None => Outcome::NoFeasibleSolution,
        }
    }
}

/// Walks the Cartesian product of every demand's simple paths.
///
/// Exact but exponential: the product of per-demand path counts is visited
/// in full unless a stopping criterion fires first. Use it as an oracle on
/// small instances.
pub struct ExhaustiveRunner;

impl ExhaustiveRunner {
    /// # Errors
    ///
    /// [`RoutingError::NoPathFound`] if some demand has no path at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_flowroute::exhaustive::{ExhaustiveConfig, ExhaustiveRunner};
    /// use u_flowroute::network::NetworkBuilder;
    ///
    /// let network = NetworkBuilder::new()
    ///     .add_edge(0, 1, 10)
    ///     .add_demand(0, 1, 4)
    ///     .build()
    ///     .unwrap();
    ///
    /// let result = ExhaustiveRunner::run(&network, &ExhaustiveConfig::default()).unwrap();
    /// let best = result.best.unwrap();
    /// assert!((best.max_load_ratio() - 0.4).abs() < 1e-12);
    /// ```
    pub fn run(network: &Network, config: &ExhaustiveConfig) -> RoutingResult<ExhaustiveResult> {
        config.validate()?;

        let finder = PathFinder::new(network);
        let candidates = network
            .demands()
            .iter()
            .map(|demand| {
                let paths: Vec<FlowPath> = finder
                    .all_simple_paths(demand.source, demand.sink)
                    .into_iter()
                    .map(|path| FlowPath::new(*demand, path))
                    .collect();
                if paths.is_empty() {
                    Err(RoutingError::NoPathFound {
                        from: demand.source,
                        to: demand.sink,
                    })
                } else {
                    Ok(paths)
                }
            })
            .collect::<RoutingResult<Vec<_>>>()?;

        let search_space = candidates
            .iter()
            .try_fold(1usize, |acc, paths| acc.checked_mul(paths.len()))
            .unwrap_or(usize::MAX);
        debug!(demands = candidates.len(), search_space, "enumerating combinations");

        let capacities = network.shared_capacities();
        let mut odometer = Odometer::new(candidates.iter().map(Vec::len).collect());
        let mut budget = Budget::start(&config.stopping);
        let mut best: Option<(Solution, f64)> = None;

        let stopping_reason = loop {
            if let Some(reason) = budget.exhausted() {
                break reason;
            }

            let flow_paths = odometer
                .digits()
                .iter()
                .zip(&candidates)
                .map(|(&i, paths)| paths[i].clone())
                .collect();
            let solution = Solution::from_parts(capacities.clone(), flow_paths);
            let summary = solution.load_summary();

            let improved = summary.is_feasible()
                && best
                    .as_ref()
                    .map_or(true, |(_, ratio)| summary.max_load_ratio() < *ratio);
            if improved {
                debug!(
                    combination = budget.iterations(),
                    max_load_ratio = summary.max_load_ratio(),
                    "new best"
                );
                best = Some((solution, summary.max_load_ratio()));
            }
            budget.record(improved);

            if !odometer.advance() {
                break StoppingReason::SearchExhausted;
            }
        };

        debug!(
            %stopping_reason,
            combinations = budget.iterations(),
            feasible = best.is_some(),
            "enumeration finished"
        );

        Ok(ExhaustiveResult {
            best: best.map(|(solution, _)| solution),
            combinations: budget.iterations(),
            search_space,
            stopping_reason,
        })
    }
}

impl Strategy for ExhaustiveConfig {
    fn name(&self) -> &'static str {
        "Exhaustive"
    }

    fn stopping(&self) -> &StoppingCriteria {
        &self.stopping
    }

    fn solve(&self, network: &Network) -> RoutingResult<Outcome> {
        ExhaustiveRunner::run(network, self).map(ExhaustiveResult::into_outcome)
    }
}

/// Mixed-radix counter over per-demand path indices.
///
/// The last digit turns fastest. With zero digits there is exactly one
/// (empty) combination.
#[derive(Debug)]
struct Odometer {
    radices: Vec<usize>,
    digits: Vec<usize>,
}

impl Odometer {
    fn new(radices: Vec<usize>) -> Self {
        let digits = vec![0; radices.len()];
        Self { radices, digits }
    }

    fn digits(&self) -> &[usize] {
        &self.digits
    }

    /// Moves to the next combination. Returns `false` after the last one.
    fn advance(&mut self) -> bool {
        for (digit, &radix) in self.digits.iter_mut().zip(&self.radices).rev() {
            *digit += 1;
            if *digit < radix {
                return true;
            }
            *digit = 0;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{fixtures, NetworkBuilder};
    use crate::solution::Path;

    #[test]
    fn test_odometer_visits_every_combination() {
        let mut odometer = Odometer::new(vec![2, 3]);
        let mut seen = vec![odometer.digits().to_vec()];
        while odometer.advance() {
            seen.push(odometer.digits().to_vec());
        }
        assert_eq!(
            seen,
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 0],
                vec![1, 1],
                vec![1, 2]
            ]
        );
    }

    #[test]
    fn test_odometer_without_digits() {
        let mut odometer = Odometer::new(Vec::new());
        assert!(odometer.digits().is_empty());
        assert!(!odometer.advance());
    }

    #[test]
    fn test_two_node_oracle() {
        let network = fixtures::single_edge(10, 7);
        let result = ExhaustiveRunner::run(&network, &ExhaustiveConfig::default()).unwrap();

        let best = result.best.unwrap();
        assert!((best.max_load_ratio() - 0.7).abs() < 1e-12);
        assert_eq!(best.flow_paths()[0].path, Path::new(vec![0, 1]));
        assert_eq!(result.combinations, 1);
        assert_eq!(result.stopping_reason, StoppingReason::SearchExhausted);
    }

    #[test]
    fn test_two_node_infeasible() {
        let network = fixtures::single_edge(5, 7);
        let outcome = ExhaustiveConfig::default().solve(&network).unwrap();
        assert_eq!(outcome, Outcome::NoFeasibleSolution);
    }

    #[test]
    fn test_diamond_optimum() {
        let network = fixtures::diamond(10);
        let result = ExhaustiveRunner::run(&network, &ExhaustiveConfig::default()).unwrap();

        // Three routes per demand.
        assert_eq!(result.search_space, 9);
        assert_eq!(result.combinations, 9);
        let best = result.best.unwrap();
        assert!((best.max_load_ratio() - 0.5).abs() < 1e-12);
        assert_ne!(best.flow_paths()[0].path, best.flow_paths()[1].path);
    }

    #[test]
    fn test_no_sampled_assignment_beats_optimum() {
        let network = fixtures::grid(3, 4, 2);
        let result = ExhaustiveRunner::run(&network, &ExhaustiveConfig::default()).unwrap();
        assert_eq!(result.combinations, result.search_space);
        let optimum = result.best.unwrap().max_load_ratio();

        let mut rng = crate::random::create_rng(Some(42));
        for _ in 0..50 {
            let sample = crate::mutation::initial_solution(&network, &mut rng).unwrap();
            if sample.is_feasible() {
                assert!(optimum <= sample.max_load_ratio() + 1e-12);
            }
        }
    }

    #[test]
    fn test_combination_cap_keeps_best_so_far() {
        let network = fixtures::diamond(10);
        let result = ExhaustiveRunner::run(
            &network,
            &ExhaustiveConfig::default().with_max_combinations(2),
        )
        .unwrap();
        assert_eq!(result.combinations, 2);
        assert_eq!(result.stopping_reason, StoppingReason::IterationLimit);
        assert!(result.best.is_some());
    }

    #[test]
    fn test_unreachable_sink() {
        let network = NetworkBuilder::new()
            .add_edge(0, 1, 5)
            .add_edge(2, 1, 5)
            .add_demand(0, 2, 1)
            .build()
            .unwrap();
        assert_eq!(
            ExhaustiveRunner::run(&network, &ExhaustiveConfig::default()).unwrap_err(),
            RoutingError::NoPathFound { from: 0, to: 2 }
        );
    }

    #[test]
    fn test_no_demands() {
        let network = NetworkBuilder::new().add_edge(0, 1, 5).build().unwrap();
        let outcome = ExhaustiveConfig::default().solve(&network).unwrap();
        let routed = outcome.routed().unwrap();
        assert!(routed.solution.is_empty());
        assert_eq!(routed.stopping_reason, StoppingReason::SearchExhausted);
    }
}
