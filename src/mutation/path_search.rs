//! Randomized and exhaustive simple-path search.
//!
//! Both searches are depth-first and iterative: an explicit stack of
//! [`Frame`]s replaces recursion, so search depth is bounded by heap memory
//! rather than the call stack.

use crate::error::{RoutingError, RoutingResult};
use crate::network::{Network, NodeId};
use crate::solution::Path;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// One level of the depth-first search.
#[derive(Debug)]
struct Frame {
    node: NodeId,
    candidates: Vec<NodeId>,
    cursor: usize,
    /// The subtree failed for reasons tied to the current prefix: it was
    /// cut off by a node already on the path, or reached the destination
    /// only along an excluded path. Another prefix may still succeed.
    depends_on_prefix: bool,
}

impl Frame {
    fn ordered(node: NodeId, network: &Network) -> Self {
        Self {
            node,
            candidates: network.neighbors(node).to_vec(),
            cursor: 0,
            depends_on_prefix: false,
        }
    }

    fn shuffled<R: Rng>(node: NodeId, network: &Network, rng: &mut R) -> Self {
        let mut frame = Self::ordered(node, network);
        frame.candidates.shuffle(rng);
        frame
    }

    fn advance(&mut self) -> Option<NodeId> {
        let next = self.candidates.get(self.cursor).copied();
        self.cursor += 1;
        next
    }
}

/// Simple-path search over a [`Network`] with optional constraints.
///
/// - [`exclude`](PathFinder::exclude): node sequences that must not be
///   returned (e.g. the sub-path being replaced)
/// - [`forbid`](PathFinder::forbid): nodes that must not appear at all
///   (e.g. the untouched prefix and suffix around a splice)
///
/// # Examples
///
/// ```
/// use u_flowroute::mutation::PathFinder;
/// use u_flowroute::network::NetworkBuilder;
/// use u_flowroute::random::create_rng;
///
/// let network = NetworkBuilder::new()
///     .add_edge(0, 1, 5)
///     .add_edge(1, 2, 5)
///     .add_edge(0, 2, 5)
///     .build()
///     .unwrap();
///
/// let mut rng = create_rng(Some(42));
/// let path = PathFinder::new(&network)
///     .exclude(&[0, 2])
///     .find(0, 2, &mut rng)
///     .unwrap();
/// assert_eq!(path.nodes(), &[0, 1, 2]);
///
/// let all = PathFinder::new(&network).all_simple_paths(0, 2);
/// assert_eq!(all.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct PathFinder<'n> {
    network: &'n Network,
    excluded: Vec<Vec<NodeId>>,
    forbidden: HashSet<NodeId>,
}

impl<'n> PathFinder<'n> {
    pub fn new(network: &'n Network) -> Self {
        Self {
            network,
            excluded: Vec::new(),
            forbidden: HashSet::new(),
        }
    }

    /// Rejects results equal to `nodes`.
    pub fn exclude(mut self, nodes: &[NodeId]) -> Self {
        self.excluded.push(nodes.to_vec());
        self
    }

    /// Keeps every node of `nodes` out of the result.
    pub fn forbid<I: IntoIterator<Item = NodeId>>(mut self, nodes: I) -> Self {
        self.forbidden.extend(nodes);
        self
    }

    fn is_excluded(&self, nodes: &[NodeId]) -> bool {
        self.excluded.iter().any(|e| e.as_slice() == nodes)
    }

    /// Randomized depth-first search for one simple path.
    ///
    /// Neighbor order is shuffled at every step. A node whose subtree fails
    /// without ever touching the current path or an excluded path cannot
    /// reach `dest` under any prefix and is never entered again.
    ///
    /// # Errors
    ///
    /// [`RoutingError::NoPathFound`] if no admissible path exists.
    pub fn find<R: Rng>(&self, source: NodeId, dest: NodeId, rng: &mut R) -> RoutingResult<Path> {
        let not_found = RoutingError::NoPathFound {
            from: source,
            to: dest,
        };
        if self.forbidden.contains(&source) || self.forbidden.contains(&dest) {
            return Err(not_found);
        }
        if source == dest {
            let trivial = vec![source];
            return if self.is_excluded(&trivial) {
                Err(not_found)
            } else {
                Ok(Path::new(trivial))
            };
        }

        let mut path = vec![source];
        let mut on_path = HashSet::from([source]);
        let mut exhausted: HashSet<NodeId> = HashSet::new();
        let mut stack = vec![Frame::shuffled(source, self.network, rng)];

        while let Some(frame) = stack.last_mut() {
            let Some(next) = frame.advance() else {
                let node = frame.node;
                let depends_on_prefix = frame.depends_on_prefix;
                stack.pop();
                path.pop();
                on_path.remove(&node);
                if depends_on_prefix {
                    if let Some(parent) = stack.last_mut() {
                        parent.depends_on_prefix = true;
                    }
                } else {
                    exhausted.insert(node);
                }
                continue;
            };

            if on_path.contains(&next) {
                frame.depends_on_prefix = true;
                continue;
            }
            if exhausted.contains(&next) || self.forbidden.contains(&next) {
                continue;
            }

            path.push(next);
            if next == dest {
                if !self.is_excluded(&path) {
                    return Ok(Path::new(path));
                }
                path.pop();
                frame.depends_on_prefix = true;
                continue;
            }

            on_path.insert(next);
            stack.push(Frame::shuffled(next, self.network, rng));
        }

        Err(not_found)
    }

    /// Every simple path from `source` to `dest`, in adjacency order.
    ///
    /// The count grows exponentially with graph density; intended for small
    /// instances only.
    pub fn all_simple_paths(&self, source: NodeId, dest: NodeId) -> Vec<Path> {
        let mut found = Vec::new();
        if self.forbidden.contains(&source) || self.forbidden.contains(&dest) {
            return found;
        }
        if source == dest {
            if !self.is_excluded(&[source]) {
                found.push(Path::new(vec![source]));
            }
            return found;
        }

        let mut path = vec![source];
        let mut on_path = HashSet::from([source]);
        let mut stack = vec![Frame::ordered(source, self.network)];

        while let Some(frame) = stack.last_mut() {
            let Some(next) = frame.advance() else {
                let node = frame.node;
                stack.pop();
                path.pop();
                on_path.remove(&node);
                continue;
            };

            if on_path.contains(&next) || self.forbidden.contains(&next) {
                continue;
            }

            path.push(next);
            if next == dest {
                if !self.is_excluded(&path) {
                    found.push(Path::new(path.clone()));
                }
                path.pop();
                continue;
            }

            on_path.insert(next);
            stack.push(Frame::ordered(next, self.network));
        }

        found
    }
}
