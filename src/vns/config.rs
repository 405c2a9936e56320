//! Variable Neighborhood Search configuration.

use crate::error::{RoutingError, RoutingResult};
use crate::stopping::StoppingCriteria;
use std::time::Duration;

/// Configuration parameters for Variable Neighborhood Search.
///
/// Shaking strength `k` runs over `k_min..k_max` (upper bound exclusive)
/// on every outer pass; strength `k` perturbs `min(k, demand_count)`
/// demands.
///
/// # Examples
///
/// ```
/// use u_flowroute::vns::VnsConfig;
///
/// let config = VnsConfig::default()
///     .with_k_range(1, 4)
///     .with_move_prob(0.2)
///     .with_no_improvement_threshold(50);
/// assert_eq!(config.k_max, 4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VnsConfig {
    /// Smallest shaking strength.
    pub k_min: usize,
    /// Exclusive upper bound on the shaking strength.
    pub k_max: usize,
    /// Probability of moving to an equally scored candidate.
    pub move_prob: f64,
    /// Probability that a shaken demand is fully rerouted rather than
    /// partially re-spliced.
    pub reroute_prob: f64,
    pub stopping: StoppingCriteria,
    /// Random seed (None for a random one).
    pub seed: Option<u64>,
}

impl Default for VnsConfig {
    fn default() -> Self {
        Self {
            k_min: 1,
            k_max: 5,
            move_prob: 0.1,
            reroute_prob: 0.5,
            stopping: StoppingCriteria::default(),
            seed: None,
        }
    }
}

impl VnsConfig {
    /// Sets the shaking strength range `k_min..k_max`.
    pub fn with_k_range(mut self, k_min: usize, k_max: usize) -> Self {
        self.k_min = k_min;
        self.k_max = k_max;
        self
    }

    pub fn with_move_prob(mut self, p: f64) -> Self {
        self.move_prob = p;
        self
    }

    pub fn with_reroute_prob(mut self, p: f64) -> Self {
        self.reroute_prob = p;
        self
    }

    pub fn with_stopping(mut self, stopping: StoppingCriteria) -> Self {
        self.stopping = stopping;
        self
    }

    pub fn with_max_time(mut self, max_time: Duration) -> Self {
        self.stopping.max_time = Some(max_time);
        self
    }

    pub fn with_no_improvement_threshold(mut self, n: usize) -> Self {
        self.stopping.no_improvement_threshold = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.stopping.max_iterations = Some(n);
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> RoutingResult<()> {
        if self.k_min == 0 {
            return Err(RoutingError::invalid_config("k_min", "must be at least 1"));
        }
        if self.k_max <= self.k_min {
            return Err(RoutingError::invalid_config(
                "k_max",
                format!(
                    "must exceed k_min {} (the range is exclusive), got {}",
                    self.k_min, self.k_max
                ),
            ));
        }
        for (parameter, p) in [
            ("move_prob", self.move_prob),
            ("reroute_prob", self.reroute_prob),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(RoutingError::invalid_config(
                    parameter,
                    format!("must be in [0, 1], got {p}"),
                ));
            }
        }
        self.stopping.validate()
    }
}
