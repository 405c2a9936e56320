//! The uniform contract every search strategy implements.

use crate::error::RoutingResult;
use crate::network::Network;
use crate::solution::Solution;
use crate::stopping::{StoppingCriteria, StoppingReason};
use std::fmt;

/// A best-found solution together with how the search ended.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedSolution {
    pub solution: Solution,
    pub stopping_reason: StoppingReason,
    /// Iterations (or generations, or combinations) the strategy executed.
    pub iterations: usize,
}

/// Result of [`Strategy::solve`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Routed(RoutedSolution),
    /// No capacity-respecting assignment was found. Only exhaustive search
    /// reports this; the heuristics always return their best candidate.
    NoFeasibleSolution,
}

impl Outcome {
    pub fn routed(&self) -> Option<&RoutedSolution> {
        match self {
            Self::Routed(routed) => Some(routed),
            Self::NoFeasibleSolution => None,
        }
    }

    pub fn into_routed(self) -> Option<RoutedSolution> {
        match self {
            Self::Routed(routed) => Some(routed),
            Self::NoFeasibleSolution => None,
        }
    }

    pub fn solution(&self) -> Option<&Solution> {
        self.routed().map(|r| &r.solution)
    }

    pub fn is_routed(&self) -> bool {
        matches!(self, Self::Routed(_))
    }
}

/// A routing strategy: `solve(network) -> Outcome`.
///
/// Implemented by each strategy's typed configuration
/// ([`SaConfig`](crate::sa::SaConfig), [`GaConfig`](crate::ga::GaConfig),
/// [`VnsConfig`](crate::vns::VnsConfig),
/// [`ExhaustiveConfig`](crate::exhaustive::ExhaustiveConfig)), so a
/// misspelled parameter is a compile error rather than a silently ignored
/// key.
///
/// # Examples
///
/// ```
/// use u_flowroute::network::NetworkBuilder;
/// use u_flowroute::sa::SaConfig;
/// use u_flowroute::{Outcome, Strategy};
///
/// let network = NetworkBuilder::new()
///     .add_edge(0, 1, 10)
///     .add_demand(0, 1, 4)
///     .build()
///     .unwrap();
///
/// let strategy = SaConfig::default().with_seed(42);
/// let outcome = strategy.solve(&network).unwrap();
/// let solution = outcome.solution().unwrap();
/// assert!(solution.is_feasible());
/// ```
pub trait Strategy: fmt::Debug + Send + Sync {
    /// Human-readable strategy name.
    fn name(&self) -> &'static str;

    /// The stopping criteria this run is bounded by.
    fn stopping(&self) -> &StoppingCriteria;

    /// Parameter description for reports.
    fn parameters(&self) -> String {
        format!("{self:?}")
    }

    /// Routes every demand of `network`.
    ///
    /// # Errors
    ///
    /// Invalid configuration, or a network on which some demand cannot be
    /// routed at all.
    fn solve(&self, network: &Network) -> RoutingResult<Outcome>;
}
