//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use crate::error::{RoutingError, RoutingResult};
use crate::stopping::StoppingCriteria;
use std::time::Duration;

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_flowroute::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.tournament_size, 7);
/// assert_eq!(config.elitism_size, 10);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use std::time::Duration;
/// use u_flowroute::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(40)
///     .with_tournament_size(3)
///     .with_elitism_size(4)
///     .with_mutation_prob(0.2)
///     .with_max_time(Duration::from_secs(2));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population.
    pub population_size: usize,

    /// Individuals sampled (without replacement) per tournament.
    ///
    /// Higher = stronger selection pressure.
    pub tournament_size: usize,

    /// Best individuals copied unchanged into the next generation.
    pub elitism_size: usize,

    /// Per-demand probability of re-splicing an offspring's path (0.0–1.0).
    pub mutation_prob: f64,

    /// Whether to score offspring in parallel. Only takes effect with the
    /// `parallel` feature.
    pub parallel: bool,

    /// Bounds the run in generations.
    pub stopping: StoppingCriteria,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            tournament_size: 7,
            elitism_size: 10,
            mutation_prob: 0.05,
            parallel: true,
            stopping: StoppingCriteria::default(),
            seed: None,
        }
    }
}

impl GaConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    pub fn with_elitism_size(mut self, n: usize) -> Self {
        self.elitism_size = n;
        self
    }

    /// Sets the mutation probability, clamped to `[0, 1]`.
    pub fn with_mutation_prob(mut self, p: f64) -> Self {
        self.mutation_prob = p.clamp(0.0, 1.0);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
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

    /// Generations without a better population best before stopping.
    pub fn with_no_improvement_threshold(mut self, n: usize) -> Self {
        self.stopping.no_improvement_threshold = n;
        self
    }

    /// Hard cap on generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.stopping.max_iterations = Some(n);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> RoutingResult<()> {
        if self.population_size == 0 {
            return Err(RoutingError::invalid_config(
                "population_size",
                "must be at least 1",
            ));
        }
        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err(RoutingError::invalid_config(
                "tournament_size",
                format!(
                    "must be in 1..={}, got {}",
                    self.population_size, self.tournament_size
                ),
            ));
        }
        if self.elitism_size > self.population_size {
            return Err(RoutingError::invalid_config(
                "elitism_size",
                format!(
                    "must not exceed population_size {}, got {}",
                    self.population_size, self.elitism_size
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_prob) {
            return Err(RoutingError::invalid_config(
                "mutation_prob",
                format!("must be in [0, 1], got {}", self.mutation_prob),
            ));
        }
        self.stopping.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GaConfig::default();
        assert!((config.mutation_prob - 0.05).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mutation_prob_clamped() {
        assert_eq!(GaConfig::default().with_mutation_prob(1.5).mutation_prob, 1.0);
        assert_eq!(GaConfig::default().with_mutation_prob(-0.5).mutation_prob, 0.0);
    }

    #[test]
    fn test_validate_sizes() {
        assert!(GaConfig::default()
            .with_population_size(0)
            .validate()
            .is_err());
        assert!(GaConfig::default()
            .with_tournament_size(0)
            .validate()
            .is_err());
        assert!(GaConfig::default()
            .with_population_size(5)
            .with_elitism_size(2)
            .with_tournament_size(6)
            .validate()
            .is_err());
        assert!(GaConfig::default()
            .with_population_size(5)
            .with_tournament_size(3)
            .with_elitism_size(6)
            .validate()
            .is_err());
        assert!(GaConfig::default()
            .with_population_size(5)
            .with_tournament_size(5)
            .with_elitism_size(5)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_requires_stopping_criterion() {
        let config = GaConfig::default().with_stopping(StoppingCriteria::unbounded());
        assert!(matches!(
            config.validate(),
            Err(RoutingError::InvalidConfig {
                parameter: "stopping",
                ..
            })
        ));
    }
}
