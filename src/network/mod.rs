//! Capacitated directed network and its demand set.
//!
//! The [`Network`] is built once through [`NetworkBuilder`] and is read-only
//! afterwards. Capacities are never decremented: edge loads are always
//! computed per candidate [`Solution`](crate::solution::Solution), so one
//! network can be shared by any number of concurrent strategy runs.

mod demand;
mod graph;

pub use demand::Demand;
pub use graph::{CapacityMap, Edge, Network, NetworkBuilder, NodeId};
