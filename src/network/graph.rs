//! Directed graph with per-edge capacities.

use super::Demand;
use crate::error::{RoutingError, RoutingResult};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

/// Opaque node identifier.
pub type NodeId = u32;

/// Mapping from every edge of a network to its capacity.
pub type CapacityMap = HashMap<Edge, u32>;

/// A directed edge `(from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.from, self.to)
    }
}

/// A capacitated directed network together with the demands to route.
///
/// Nodes are implicit: a node exists if some edge touches it.
/// The capacity map sits behind an [`Arc`] so that every
/// [`Solution`](crate::solution::Solution) can hold it without copying.
#[derive(Debug, Clone)]
pub struct Network {
    adjacency: BTreeMap<NodeId, Vec<NodeId>>,
    capacities: Arc<CapacityMap>,
    demands: Vec<Demand>,
}

impl Network {
    /// Starts building a network.
    pub fn builder() -> NetworkBuilder {
        NetworkBuilder::new()
    }

    /// Capacity of edge `(from, to)`.
    pub fn capacity(&self, from: NodeId, to: NodeId) -> RoutingResult<u32> {
        self.capacities
            .get(&Edge::new(from, to))
            .copied()
            .ok_or(RoutingError::UnknownEdge { from, to })
    }

    /// Successors of `node`, in edge insertion order.
    ///
    /// Unknown nodes and sinks without outgoing edges yield an empty slice.
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        self.adjacency.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The demands, in the order they were added.
    pub fn demands(&self) -> &[Demand] {
        &self.demands
    }

    /// Every edge with its capacity.
    pub fn edges_with_capacities(&self) -> &CapacityMap {
        &self.capacities
    }

    /// Shared handle to the capacity map.
    pub(crate) fn shared_capacities(&self) -> Arc<CapacityMap> {
        Arc::clone(&self.capacities)
    }

    pub fn contains_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.capacities.contains_key(&Edge::new(from, to))
    }

    /// All nodes touched by at least one edge, in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.capacities.len()
    }

    pub fn demand_count(&self) -> usize {
        self.demands.len()
    }
}

/// Incremental constructor for [`Network`].
///
/// Validation is deferred to [`build`](NetworkBuilder::build) so that edges
/// and demands can be chained freely.
///
/// # Examples
///
/// ```
/// use u_flowroute::network::NetworkBuilder;
///
/// let network = NetworkBuilder::new()
///     .add_edge(1, 2, 10)
///     .add_edge(2, 3, 10)
///     .add_edge(1, 3, 4)
///     .add_demand(1, 3, 6)
///     .build()
///     .unwrap();
///
/// assert_eq!(network.capacity(1, 3).unwrap(), 4);
/// assert_eq!(network.neighbors(1), &[2, 3]);
/// assert!(network.capacity(3, 1).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct NetworkBuilder {
    edges: Vec<(Edge, u32)>,
    demands: Vec<Demand>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directed edge with a positive capacity.
    pub fn add_edge(mut self, from: NodeId, to: NodeId, capacity: u32) -> Self {
        self.edges.push((Edge::new(from, to), capacity));
        self
    }

    /// Adds a demand of `flow` from `source` to `sink`.
    pub fn add_demand(mut self, source: NodeId, sink: NodeId, flow: u32) -> Self {
        self.demands.push(Demand::new(source, sink, flow));
        self
    }

    /// Validates the description and freezes it into a [`Network`].
    ///
    /// # Errors
    ///
    /// [`RoutingError::InvalidNetwork`] on a zero capacity, a self-loop, a
    /// duplicate edge, a zero flow, a demand whose source equals its sink,
    /// or a demand endpoint that no edge touches.
    pub fn build(self) -> RoutingResult<Network> {
        let mut adjacency: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
        let mut capacities = CapacityMap::with_capacity(self.edges.len());

        for (edge, capacity) in self.edges {
            if capacity == 0 {
                return Err(RoutingError::invalid_network(format!(
                    "edge {edge} has zero capacity"
                )));
            }
            if edge.from == edge.to {
                return Err(RoutingError::invalid_network(format!(
                    "edge {edge} is a self-loop"
                )));
            }
            if capacities.insert(edge, capacity).is_some() {
                return Err(RoutingError::invalid_network(format!(
                    "edge {edge} is defined more than once"
                )));
            }
            adjacency.entry(edge.from).or_default().push(edge.to);
            adjacency.entry(edge.to).or_default();
        }

        let nodes: BTreeSet<NodeId> = adjacency.keys().copied().collect();
        for (index, demand) in self.demands.iter().enumerate() {
            if demand.flow == 0 {
                return Err(RoutingError::invalid_network(format!(
                    "demand {index} has zero flow"
                )));
            }
            if demand.source == demand.sink {
                return Err(RoutingError::invalid_network(format!(
                    "demand {index} has identical source and sink {}",
                    demand.source
                )));
            }
            for endpoint in [demand.source, demand.sink] {
                if !nodes.contains(&endpoint) {
                    return Err(RoutingError::invalid_network(format!(
                        "demand {index} references node {endpoint} which has no edges"
                    )));
                }
            }
        }

        Ok(Network {
            adjacency,
            capacities: Arc::new(capacities),
            demands: self.demands,
        })
    }
}
