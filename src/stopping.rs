//! Stopping criteria shared by all strategies.
//!
//! Budgets are cooperative: a strategy checks them at iteration boundaries
//! only, so one slow iteration may overrun `max_time`.

use crate::error::{RoutingError, RoutingResult};
use std::fmt;
use std::time::{Duration, Instant};

/// Why a strategy stopped.
///
/// Budget exhaustion is the normal end of a heuristic run, not an error.
/// `Display` gives the user-facing wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StoppingReason {
    /// Wall-clock budget elapsed.
    MaxTime,
    /// Too many consecutive iterations without a new best.
    NoImprovement,
    /// Hard iteration (or generation) cap reached.
    IterationLimit,
    /// Annealing temperature fell below its floor.
    TemperatureFloor,
    /// Exhaustive enumeration visited every combination.
    SearchExhausted,
}

impl fmt::Display for StoppingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::MaxTime => "Max time reached",
            Self::NoImprovement => "No improvement threshold reached",
            Self::IterationLimit => "Iteration limit reached",
            Self::TemperatureFloor => "Temperature floor reached",
            Self::SearchExhausted => "Search space exhausted",
        };
        f.write_str(text)
    }
}

/// Termination budget: whichever enabled criterion fires first stops the run.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_flowroute::StoppingCriteria;
///
/// let criteria = StoppingCriteria::default()
///     .with_max_time(Duration::from_secs(2))
///     .with_no_improvement_threshold(500);
/// assert!(criteria.validate().is_ok());
///
/// assert!(StoppingCriteria::unbounded().validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoppingCriteria {
    /// Wall-clock budget. `None` disables it.
    pub max_time: Option<Duration>,

    /// Consecutive non-improving iterations tolerated. 0 disables it.
    pub no_improvement_threshold: usize,

    /// Hard cap on iterations. `None` disables it.
    pub max_iterations: Option<usize>,
}

impl Default for StoppingCriteria {
    fn default() -> Self {
        Self {
            max_time: Some(Duration::from_secs(10)),
            no_improvement_threshold: 100,
            max_iterations: None,
        }
    }
}

impl StoppingCriteria {
    /// All criteria disabled. Only valid for strategies that terminate on
    /// their own, such as exhaustive search.
    pub fn unbounded() -> Self {
        Self {
            max_time: None,
            no_improvement_threshold: 0,
            max_iterations: None,
        }
    }

    pub fn with_max_time(mut self, max_time: Duration) -> Self {
        self.max_time = Some(max_time);
        self
    }

    pub fn without_max_time(mut self) -> Self {
        self.max_time = None;
        self
    }

    pub fn with_no_improvement_threshold(mut self, n: usize) -> Self {
        self.no_improvement_threshold = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = Some(n);
        self
    }

    /// Checks values and that at least one criterion is enabled.
    pub fn validate(&self) -> RoutingResult<()> {
        self.validate_values()?;
        if self.max_time.is_none()
            && self.no_improvement_threshold == 0
            && self.max_iterations.is_none()
        {
            return Err(RoutingError::invalid_config(
                "stopping",
                "enable at least one of max_time, no_improvement_threshold, max_iterations",
            ));
        }
        Ok(())
    }

    /// Checks values without requiring any criterion to be enabled.
    pub(crate) fn validate_values(&self) -> RoutingResult<()> {
        if self.max_time == Some(Duration::ZERO) {
            return Err(RoutingError::invalid_config(
                "max_time",
                "must be positive or None",
            ));
        }
        if self.max_iterations == Some(0) {
            return Err(RoutingError::invalid_config(
                "max_iterations",
                "must be positive or None",
            ));
        }
        Ok(())
    }
}

/// Running budget of one strategy invocation.
#[derive(Debug)]
pub(crate) struct Budget<'c> {
    criteria: &'c StoppingCriteria,
    started: Instant,
    iterations: usize,
    stale: usize,
}

impl<'c> Budget<'c> {
    pub(crate) fn start(criteria: &'c StoppingCriteria) -> Self {
        Self {
            criteria,
            started: Instant::now(),
            iterations: 0,
            stale: 0,
        }
    }

    /// Records one finished iteration.
    pub(crate) fn record(&mut self, improved: bool) {
        self.iterations += 1;
        if improved {
            self.stale = 0;
        } else {
            self.stale += 1;
        }
    }

    pub(crate) fn iterations(&self) -> usize {
        self.iterations
    }

    /// The first criterion that has fired, if any.
    pub(crate) fn exhausted(&self) -> Option<StoppingReason> {
        if let Some(max_time) = self.criteria.max_time {
            if self.started.elapsed() >= max_time {
                return Some(StoppingReason::MaxTime);
            }
        }
        let threshold = self.criteria.no_improvement_threshold;
        if threshold > 0 && self.stale >= threshold {
            return Some(StoppingReason::NoImprovement);
        }
        if let Some(max_iterations) = self.criteria.max_iterations {
            if self.iterations >= max_iterations {
                return Some(StoppingReason::IterationLimit);
            }
        }
        None
    }
}
