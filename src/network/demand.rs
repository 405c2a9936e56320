//! Flow demands.

use super::NodeId;

/// A required flow volume from a source node to a sink node.
///
/// # Examples
///
/// ```
/// use u_flowroute::network::Demand;
///
/// let demand = Demand::new(1, 4, 12);
/// assert_eq!(demand.source, 1);
/// assert_eq!(demand.sink, 4);
/// assert_eq!(demand.flow, 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Demand {
    /// Node the flow originates from.
    pub source: NodeId,
    /// Node the flow must reach.
    pub sink: NodeId,
    /// Flow volume, in the same unit as edge capacities.
    pub flow: u32,
}

impl Demand {
    pub fn new(source: NodeId, sink: NodeId, flow: u32) -> Self {
        Self { source, sink, flow }
    }
}
