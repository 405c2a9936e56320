//! Paths and demand-to-path bindings.

use crate::network::{Demand, Edge, NodeId};
use std::collections::HashSet;

/// An ordered node sequence.
///
/// Paths produced by the search primitives are always simple (no repeated
/// node). Paths supplied from outside are checked by
/// [`Solution::new`](super::Solution::new).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path(Vec<NodeId>);

impl Path {
    pub fn new(nodes: Vec<NodeId>) -> Self {
        Self(nodes)
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.0
    }

    pub fn into_nodes(self) -> Vec<NodeId> {
        self.0
    }

    /// Number of nodes on the path.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn source(&self) -> Option<NodeId> {
        self.0.first().copied()
    }

    pub fn sink(&self) -> Option<NodeId> {
        self.0.last().copied()
    }

    /// Consecutive node pairs as edges.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.0.windows(2).map(|w| Edge::new(w[0], w[1]))
    }

    /// `true` if no node appears twice.
    pub fn is_simple(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.0.len());
        self.0.iter().all(|node| seen.insert(*node))
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.0.contains(&node)
    }
}

impl From<Vec<NodeId>> for Path {
    fn from(nodes: Vec<NodeId>) -> Self {
        Self(nodes)
    }
}

/// One demand routed along one concrete path.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowPath {
    pub demand: Demand,
    pub path: Path,
}

impl FlowPath {
    pub fn new(demand: Demand, path: Path) -> Self {
        Self { demand, path }
    }

    /// Flow volume carried along the path.
    pub fn flow(&self) -> u32 {
        self.demand.flow
    }

    /// `true` if the path starts at the demand's source and ends at its sink.
    pub fn connects_demand(&self) -> bool {
        self.path.source() == Some(self.demand.source) && self.path.sink() == Some(self.demand.sink)
    }
}
