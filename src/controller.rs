//! Timed strategy runs and their reports.
//!
//! [`run`] solves one network with one strategy and captures the figures a
//! comparison table needs; [`run_batch`] does the same for several
//! strategies, in parallel with the `parallel` feature.

use crate::error::RoutingResult;
use crate::network::{Network, NodeId};
use crate::stopping::StoppingReason;
use crate::strategy::{Outcome, RoutedSolution, Strategy};
use std::time::Instant;
use tracing::info;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Quality figures of a routed solution.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RunSummary {
    pub feasible: bool,
    pub max_load_ratio: f64,
    pub overflow: u64,
    pub score: f64,
    pub stopping_reason: StoppingReason,
    pub iterations: usize,
    /// Node sequence chosen for each demand, in demand order.
    pub flow_paths: Vec<Vec<NodeId>>,
}

impl RunSummary {
    fn of(routed: &RoutedSolution) -> Self {
        let summary = routed.solution.load_summary();
        Self {
            feasible: summary.is_feasible(),
            max_load_ratio: summary.max_load_ratio(),
            overflow: summary.overflow,
            score: summary.score(),
            stopping_reason: routed.stopping_reason,
            iterations: routed.iterations,
            flow_paths: routed
                .solution
                .flow_paths()
                .iter()
                .map(|fp| fp.path.nodes().to_vec())
                .collect(),
        }
    }
}

/// One row of a strategy comparison.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RunReport {
    pub algorithm: &'static str,
    pub parameters: String,
    pub elapsed_secs: f64,
    /// Configured wall-clock budget, if any.
    pub max_time_secs: Option<f64>,
    pub no_improvement_threshold: usize,
    /// `None` when no feasible solution was found.
    pub summary: Option<RunSummary>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub outcome: Outcome,
}

impl RunReport {
    pub fn is_routed(&self) -> bool {
        self.summary.is_some()
    }
}

/// Solves `network` with `strategy` and reports the result.
///
/// # Examples
///
/// ```
/// use u_flowroute::controller;
/// use u_flowroute::exhaustive::ExhaustiveConfig;
/// use u_flowroute::network::NetworkBuilder;
///
/// let network = NetworkBuilder::new()
///     .add_edge(0, 1, 10)
///     .add_demand(0, 1, 5)
///     .build()
///     .unwrap();
///
/// let report = controller::run(&ExhaustiveConfig::default(), &network).unwrap();
/// assert_eq!(report.algorithm, "Exhaustive");
/// let summary = report.summary.unwrap();
/// assert!(summary.feasible);
/// assert!((summary.score - 0.5).abs() < 1e-12);
/// ```
pub fn run(strategy: &dyn Strategy, network: &Network) -> RoutingResult<RunReport> {
    let algorithm = strategy.name();
    let parameters = strategy.parameters();
    info!(algorithm, %parameters, demands = network.demand_count(), "run started");

    let started = Instant::now();
    let outcome = strategy.solve(network)?;
    let elapsed_secs = started.elapsed().as_secs_f64();

    let summary = outcome.routed().map(RunSummary::of);
    match &summary {
        Some(s) => info!(
            algorithm,
            elapsed_secs,
            feasible = s.feasible,
            max_load_ratio = s.max_load_ratio,
            score = s.score,
            stopping_reason = %s.stopping_reason,
            "run finished"
        ),
        None => info!(algorithm, elapsed_secs, "run finished without a feasible solution"),
    }

    let stopping = strategy.stopping();
    Ok(RunReport {
        algorithm,
        parameters,
        elapsed_secs,
        max_time_secs: stopping.max_time.map(|t| t.as_secs_f64()),
        no_improvement_threshold: stopping.no_improvement_threshold,
        summary,
        outcome,
    })
}

/// Runs every strategy on the same network.
///
/// Reports come back in the order of `strategies`. Each run owns its state;
/// only `network` is shared.
pub fn run_batch(
    strategies: &[Box<dyn Strategy>],
    network: &Network,
) -> Vec<RoutingResult<RunReport>> {
    #[cfg(feature = "parallel")]
    let reports = strategies
        .par_iter()
        .map(|strategy| run(strategy.as_ref(), network))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let reports = strategies
        .iter()
        .map(|strategy| run(strategy.as_ref(), network))
        .collect();

    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exhaustive::ExhaustiveConfig;
    use crate::ga::GaConfig;
    use crate::network::fixtures;
    use crate::sa::SaConfig;
    use crate::vns::VnsConfig;
    use crate::RoutingError;
    use std::time::Duration;

    #[test]
    fn test_report_columns() {
        let network = fixtures::diamond(10);
        let config = SaConfig::default()
            .with_max_time(Duration::from_secs(3))
            .with_seed(4);

        let report = run(&config, &network).unwrap();

        assert_eq!(report.algorithm, "SimulatedAnnealing");
        assert!(report.parameters.contains("cooling_rate"));
        assert_eq!(report.max_time_secs, Some(3.0));
        assert_eq!(report.no_improvement_threshold, 1000);
        let summary = report.summary.unwrap();
        assert_eq!(summary.flow_paths.len(), 2);
        assert!(summary.flow_paths.iter().all(|p| p[0] == 0 && p[p.len() - 1] == 3));
        assert_eq!(summary.overflow, 0);
    }

    #[test]
    fn test_infeasible_report() {
        let network = fixtures::single_edge(3, 4);
        let report = run(&ExhaustiveConfig::default(), &network).unwrap();
        assert!(!report.is_routed());
        assert_eq!(report.outcome, Outcome::NoFeasibleSolution);
        assert_eq!(report.max_time_secs, None);
    }

    #[test]
    fn test_config_error_propagates() {
        let network = fixtures::diamond(10);
        let err = run(&VnsConfig::default().with_k_range(2, 1), &network).unwrap_err();
        assert!(matches!(
            err,
            RoutingError::InvalidConfig {
                parameter: "k_max",
                ..
            }
        ));
    }

    #[test]
    fn test_batch_preserves_order() {
        let network = fixtures::grid(3, 10, 1);
        let strategies: Vec<Box<dyn Strategy>> = vec![
            Box::new(ExhaustiveConfig::default()),
            Box::new(SaConfig::default().with_no_improvement_threshold(50).with_seed(1)),
            Box::new(
                GaConfig::default()
                    .with_population_size(10)
                    .with_tournament_size(3)
                    .with_elitism_size(2)
                    .with_max_generations(10)
                    .with_seed(2),
            ),
            Box::new(VnsConfig::default().with_no_improvement_threshold(10).with_seed(3)),
        ];

        let reports = run_batch(&strategies, &network);

        let names: Vec<_> = reports
            .iter()
            .map(|r| r.as_ref().unwrap().algorithm)
            .collect();
        assert_eq!(
            names,
            [
                "Exhaustive",
                "SimulatedAnnealing",
                "GeneticAlgorithm",
                "VariableNeighborhoodSearch"
            ]
        );
        for report in &reports {
            assert!(report.as_ref().unwrap().summary.as_ref().unwrap().feasible);
        }
    }
}
