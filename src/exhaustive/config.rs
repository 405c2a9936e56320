//! Exhaustive search configuration.

use crate::error::RoutingResult;
use crate::stopping::StoppingCriteria;
use std::time::Duration;

/// Configuration for exhaustive search.
///
/// The walk terminates on its own, so every stopping criterion is disabled
/// by default. Enabling one turns the search into an anytime procedure that
/// returns the best feasible combination seen so far.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExhaustiveConfig {
    pub stopping: StoppingCriteria,
}

impl Default for ExhaustiveConfig {
    fn default() -> Self {
        Self {
            stopping: StoppingCriteria::unbounded(),
        }
    }
}

impl ExhaustiveConfig {
    pub fn with_stopping(mut self, stopping: StoppingCriteria) -> Self {
        self.stopping = stopping;
        self
    }

    pub fn with_max_time(mut self, max_time: Duration) -> Self {
        self.stopping.max_time = Some(max_time);
        self
    }

    /// Caps the number of combinations evaluated.
    pub fn with_max_combinations(mut self, n: usize) -> Self {
        self.stopping.max_iterations = Some(n);
        self
    }

    pub fn validate(&self) -> RoutingResult<()> {
        self.stopping.validate_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unbounded_and_valid() {
        let config = ExhaustiveConfig::default();
        assert_eq!(config.stopping, StoppingCriteria::unbounded());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_cap_rejected() {
        assert!(ExhaustiveConfig::default()
            .with_max_combinations(0)
            .validate()
            .is_err());
    }
}
