//! Flow assignment: one path per demand, with load-based scoring.

use super::path::{FlowPath, Path};
use crate::error::{RoutingError, RoutingResult};
use crate::network::{CapacityMap, Edge, Network};
use std::collections::HashMap;
use std::sync::Arc;

/// Aggregate load figures of a [`Solution`].
///
/// Computed in one pass over the edge loads; every scoring method of
/// [`Solution`] is derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadSummary {
    /// Highest `load / capacity` over all edges.
    pub peak_ratio: f64,
    /// Sum of `max(0, load - capacity)` over all edges.
    pub overflow: u64,
}

impl LoadSummary {
    pub fn is_feasible(&self) -> bool {
        self.overflow == 0
    }

    /// Peak ratio plus total overflow as a penalty term.
    ///
    /// Infeasible candidates still get a value that grows with overflow, so
    /// local search has a gradient to follow back into feasibility.
    pub fn max_load_ratio(&self) -> f64 {
        self.peak_ratio + self.overflow as f64
    }

    /// Unified objective, higher is better.
    ///
    /// - feasible: `1 - max_load_ratio`, in `[0, 1]`
    /// - infeasible: `-(1 + overflow)`, at most `-2`
    ///
    /// Every infeasible score is below every feasible one.
    pub fn score(&self) -> f64 {
        if self.is_feasible() {
            1.0 - self.max_load_ratio()
        } else {
            -(1.0 + self.overflow as f64)
        }
    }
}

/// A complete flow assignment: exactly one [`FlowPath`] per demand.
///
/// `flow_paths()[i]` always routes demand `i` of the network the solution
/// was built from. Solutions are values: every mutation primitive returns a
/// new `Solution` and leaves its input untouched.
///
/// # Examples
///
/// ```
/// use u_flowroute::network::NetworkBuilder;
/// use u_flowroute::solution::{Path, Solution};
///
/// let network = NetworkBuilder::new()
///     .add_edge(0, 1, 10)
///     .add_edge(1, 2, 4)
///     .add_demand(0, 2, 2)
///     .build()
///     .unwrap();
///
/// let solution = Solution::new(&network, vec![Path::new(vec![0, 1, 2])]).unwrap();
/// assert!(solution.is_feasible());
/// assert!((solution.max_load_ratio() - 0.5).abs() < 1e-12);
/// assert!((solution.score() - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Solution {
    capacities: Arc<CapacityMap>,
    flow_paths: Vec<FlowPath>,
}

impl Solution {
    /// Binds `paths[i]` to demand `i` of `network`.
    ///
    /// # Errors
    ///
    /// - [`RoutingError::InvalidPath`] if the path count differs from the
    ///   demand count, a path does not connect its demand's endpoints, or a
    ///   path repeats a node.
    /// - [`RoutingError::UnknownEdge`] if a path uses an edge the network
    ///   does not have.
    pub fn new(network: &Network, paths: Vec<Path>) -> RoutingResult<Self> {
        let demands = network.demands();
        if paths.len() != demands.len() {
            return Err(RoutingError::InvalidPath {
                demand: paths.len().min(demands.len()),
                message: format!("expected {} paths, got {}", demands.len(), paths.len()),
            });
        }

        let flow_paths = demands
            .iter()
            .zip(paths)
            .enumerate()
            .map(|(index, (demand, path))| {
                let flow_path = FlowPath::new(*demand, path);
                if !flow_path.connects_demand() {
                    return Err(RoutingError::InvalidPath {
                        demand: index,
                        message: format!(
                            "path must run from {} to {}",
                            demand.source, demand.sink
                        ),
                    });
                }
                if !flow_path.path.is_simple() {
                    return Err(RoutingError::InvalidPath {
                        demand: index,
                        message: "path repeats a node".into(),
                    });
                }
                if let Some(edge) = flow_path
                    .path
                    .edges()
                    .find(|e| !network.contains_edge(e.from, e.to))
                {
                    return Err(RoutingError::UnknownEdge {
                        from: edge.from,
                        to: edge.to,
                    });
                }
                Ok(flow_path)
            })
            .collect::<RoutingResult<Vec<_>>>()?;

        Ok(Self::from_parts(network.shared_capacities(), flow_paths))
    }

    /// Assembles a solution from paths already known to follow network
    /// edges.
    pub(crate) fn from_parts(capacities: Arc<CapacityMap>, flow_paths: Vec<FlowPath>) -> Self {
        Self {
            capacities,
            flow_paths,
        }
    }

    pub(crate) fn shared_capacities(&self) -> Arc<CapacityMap> {
        Arc::clone(&self.capacities)
    }

    /// Returns a copy of this solution with demand `index` routed along
    /// `path`.
    pub(crate) fn with_path(&self, index: usize, path: Path) -> RoutingResult<Self> {
        if index >= self.flow_paths.len() {
            return Err(RoutingError::UnknownDemand { index });
        }
        let mut flow_paths = self.flow_paths.clone();
        flow_paths[index].path = path;
        Ok(Self::from_parts(self.shared_capacities(), flow_paths))
    }

    pub fn flow_paths(&self) -> &[FlowPath] {
        &self.flow_paths
    }

    pub fn flow_path(&self, index: usize) -> Option<&FlowPath> {
        self.flow_paths.get(index)
    }

    /// Number of routed demands.
    pub fn len(&self) -> usize {
        self.flow_paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flow_paths.is_empty()
    }

    /// Capacities this solution is checked against.
    pub fn capacities(&self) -> &CapacityMap {
        &self.capacities
    }

    /// Total flow on every edge of the network; untraversed edges report 0.
    pub fn edge_loads(&self) -> HashMap<Edge, u64> {
        let mut loads: HashMap<Edge, u64> = self.capacities.keys().map(|e| (*e, 0)).collect();
        for flow_path in &self.flow_paths {
            let flow = u64::from(flow_path.flow());
            for edge in flow_path.path.edges() {
                if let Some(load) = loads.get_mut(&edge) {
                    *load += flow;
                }
            }
        }
        loads
    }

    pub fn load_summary(&self) -> LoadSummary {
        let loads = self.edge_loads();
        let mut peak_ratio = 0.0_f64;
        let mut overflow = 0_u64;

        for (edge, &capacity) in self.capacities.iter() {
            let load = loads.get(edge).copied().unwrap_or(0);
            let capacity = u64::from(capacity);
            if capacity > 0 {
                peak_ratio = peak_ratio.max(load as f64 / capacity as f64);
            }
            overflow += load.saturating_sub(capacity);
        }

        LoadSummary {
            peak_ratio,
            overflow,
        }
    }

    /// `true` if no edge carries more than its capacity.
    pub fn is_feasible(&self) -> bool {
        self.load_summary().is_feasible()
    }

    pub fn total_overflow(&self) -> u64 {
        self.load_summary().overflow
    }

    /// See [`LoadSummary::max_load_ratio`].
    pub fn max_load_ratio(&self) -> f64 {
        self.load_summary().max_load_ratio()
    }

    /// See [`LoadSummary::score`].
    pub fn score(&self) -> f64 {
        self.load_summary().score()
    }
}

/// Two solutions are equal when they route every demand identically over
/// the same capacities.
impl PartialEq for Solution {
    fn eq(&self, other: &Self) -> bool {
        self.flow_paths == other.flow_paths
            && (Arc::ptr_eq(&self.capacities, &other.capacities)
                || *self.capacities == *other.capacities)
    }
}
