//! Path mutation primitives shared by every search strategy.
//!
//! - [`PathFinder`]: randomized simple-path discovery with excluded paths
//!   and forbidden nodes, plus full enumeration for exhaustive search
//! - [`generate_neighbor`]: partial re-splice of one demand's path
//! - [`reroute_entire_demand`]: full reroute of one demand
//! - [`initial_solution`]: one random path per demand
//!
//! Every primitive returns a new [`Solution`](crate::solution::Solution);
//! inputs are never modified. A move that finds no alternative returns its
//! input unchanged, while the `try_` variants surface the
//! [`NoPathFound`](crate::RoutingError::NoPathFound) instead.

mod neighbor;
mod path_search;

pub use neighbor::{
    generate_neighbor, initial_solution, reroute_entire_demand, try_generate_neighbor,
    try_reroute_entire_demand, MAX_SPLICE_ATTEMPTS,
};
pub use path_search::PathFinder;
