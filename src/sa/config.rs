//! SA configuration.

use crate::error::{RoutingError, RoutingResult};
use crate::stopping::StoppingCriteria;
use std::time::Duration;

/// Temperature below which annealing always stops.
pub const MIN_TEMPERATURE: f64 = 1e-3;

/// Configuration for Simulated Annealing.
///
/// Cooling is geometric: `T_{k+1} = cooling_rate * T_k`, applied once per
/// iteration. The run ends when the temperature drops below
/// [`MIN_TEMPERATURE`] or a [`StoppingCriteria`] budget fires.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_flowroute::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initial_temp(100.0)
///     .with_cooling_rate(0.98)
///     .with_max_time(Duration::from_secs(5))
///     .with_no_improvement_threshold(500)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Starting temperature. Higher values accept more worsening moves.
    pub initial_temp: f64,

    /// Geometric cooling factor in (0, 1). Higher = slower cooling.
    pub cooling_rate: f64,

    pub stopping: StoppingCriteria,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temp: 1000.0,
            cooling_rate: 0.99,
            stopping: StoppingCriteria::default().with_no_improvement_threshold(1000),
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temp(mut self, t: f64) -> Self {
        self.initial_temp = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
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

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// The temperature floor always ends the run, so no stopping criterion
    /// has to be enabled.
    pub fn validate(&self) -> RoutingResult<()> {
        if !(self.initial_temp > MIN_TEMPERATURE) {
            return Err(RoutingError::invalid_config(
                "initial_temp",
                format!(
                    "must exceed the temperature floor {MIN_TEMPERATURE}, got {}",
                    self.initial_temp
                ),
            ));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(RoutingError::invalid_config(
                "cooling_rate",
                format!("must be in (0, 1), got {}", self.cooling_rate),
            ));
        }
        self.stopping.validate_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SaConfig::default();
        assert!((config.initial_temp - 1000.0).abs() < 1e-10);
        assert!((config.cooling_rate - 0.99).abs() < 1e-10);
        assert_eq!(config.stopping.no_improvement_threshold, 1000);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_temperature() {
        assert!(SaConfig::default()
            .with_initial_temp(-1.0)
            .validate()
            .is_err());
        assert!(SaConfig::default()
            .with_initial_temp(MIN_TEMPERATURE)
            .validate()
            .is_err());
        assert!(SaConfig::default()
            .with_initial_temp(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_bad_cooling_rate() {
        for rate in [0.0, 1.0, 1.5, -0.2] {
            let err = SaConfig::default().with_cooling_rate(rate).validate();
            assert!(
                matches!(
                    err,
                    Err(RoutingError::InvalidConfig {
                        parameter: "cooling_rate",
                        ..
                    })
                ),
                "rate {rate} should be rejected"
            );
        }
    }

    #[test]
    fn test_unbounded_stopping_is_allowed() {
        let config = SaConfig::default().with_stopping(StoppingCriteria::unbounded());
        assert!(config.validate().is_ok());
    }
}
