//! Unsplittable multi-commodity flow routing.
//!
//! Given a directed network with integer edge capacities and a set of
//! demands (source, sink, flow), choose exactly one simple path per demand
//! so that edge loads respect capacities and the most congested edge is as
//! lightly loaded as possible.
//!
//! - **Network model** ([`network`]): validated, immutable graph plus demands.
//! - **Scoring** ([`solution`]): edge loads, feasibility, max load ratio and
//!   a single higher-is-better score that ranks every feasible assignment
//!   above every infeasible one.
//! - **Mutation primitives** ([`mutation`]): randomized simple-path search,
//!   partial re-splice and full reroute of one demand.
//! - **Strategies**: [`exhaustive`] enumeration, Simulated Annealing
//!   ([`sa`]), a Genetic Algorithm ([`ga`]) and Variable Neighborhood
//!   Search ([`vns`]), all behind the [`Strategy`] trait.
//! - **Runs** ([`controller`]): timed runs with comparison reports.
//!
//! # Example
//!
//! ```
//! use u_flowroute::network::NetworkBuilder;
//! use u_flowroute::vns::VnsConfig;
//! use u_flowroute::Strategy;
//!
//! let network = NetworkBuilder::new()
//!     .add_edge(0, 1, 10)
//!     .add_edge(1, 3, 10)
//!     .add_edge(0, 2, 10)
//!     .add_edge(2, 3, 10)
//!     .add_demand(0, 3, 8)
//!     .add_demand(0, 3, 8)
//!     .build()
//!     .unwrap();
//!
//! let config = VnsConfig::default().with_no_improvement_threshold(30).with_seed(1);
//! let outcome = config.solve(&network).unwrap();
//! let solution = outcome.solution().unwrap();
//! assert!(solution.is_feasible());
//! assert!((solution.max_load_ratio() - 0.8).abs() < 1e-12);
//! ```
//!
//! # Logging
//!
//! The crate emits [`tracing`] events and installs no subscriber.

pub mod controller;
pub mod error;
pub mod exhaustive;
pub mod ga;
pub mod mutation;
pub mod network;
pub mod random;
pub mod sa;
pub mod solution;
pub mod stopping;
pub mod strategy;
pub mod vns;

pub use error::{RoutingError, RoutingResult};
pub use stopping::{StoppingCriteria, StoppingReason};
pub use strategy::{Outcome, RoutedSolution, Strategy};
