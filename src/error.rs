//! Error types for network construction, path search and strategy runs.

use crate::network::NodeId;
use std::fmt;

/// Result type for routing operations.
pub type RoutingResult<T> = Result<T, RoutingError>;

/// Errors that can occur while building a network or routing demands over it.
///
/// Running out of time or iterations is not an error: strategies report it
/// through [`StoppingReason`](crate::StoppingReason). Likewise, an exhaustive
/// search that finds no feasible combination returns
/// [`Outcome::NoFeasibleSolution`](crate::Outcome::NoFeasibleSolution).
#[derive(Debug, Clone, PartialEq)]
pub enum RoutingError {
    /// A path search could not connect the two nodes under its constraints.
    ///
    /// Recoverable: mutation primitives absorb it and return their input.
    NoPathFound { from: NodeId, to: NodeId },

    /// An edge was referenced that the network does not contain.
    UnknownEdge { from: NodeId, to: NodeId },

    /// A demand index outside the solution's demand range.
    UnknownDemand { index: usize },

    /// An externally supplied path assignment does not fit its demand.
    InvalidPath { demand: usize, message: String },

    /// The network description was rejected during construction.
    InvalidNetwork { message: String },

    /// A strategy configuration parameter is out of range.
    InvalidConfig {
        parameter: &'static str,
        message: String,
    },
}

impl RoutingError {
    pub(crate) fn invalid_config(parameter: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            parameter,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_network(message: impl Into<String>) -> Self {
        Self::InvalidNetwork {
            message: message.into(),
        }
    }

    /// Returns `true` for errors that a caller may retry or absorb.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NoPathFound { .. })
    }
}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPathFound { from, to } => write!(f, "no path found from {from} to {to}"),
            Self::UnknownEdge { from, to } => {
                write!(f, "edge ({from}, {to}) does not exist in the network")
            }
            Self::UnknownDemand { index } => write!(f, "demand index {index} is out of range"),
            Self::InvalidPath { demand, message } => {
                write!(f, "invalid path for demand {demand}: {message}")
            }
            Self::InvalidNetwork { message } => write!(f, "invalid network: {message}"),
            Self::InvalidConfig { parameter, message } => {
                write!(f, "invalid parameter '{parameter}': {message}")
            }
        }
    }
}

impl std::error::Error for RoutingError {}
