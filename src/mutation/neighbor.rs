//! Neighbor generation: partial re-splice and full reroute.

use super::path_search::PathFinder;
use crate::error::{RoutingError, RoutingResult};
use crate::network::Network;
use crate::solution::{FlowPath, Path, Solution};
use rand::Rng;
use tracing::trace;

/// Splice windows tried by [`generate_neighbor`] before giving up.
pub const MAX_SPLICE_ATTEMPTS: usize = 10;

/// Builds a solution with one random simple path per demand.
///
/// # Errors
///
/// [`RoutingError::NoPathFound`] if some demand's sink is unreachable from
/// its source. No strategy can route such an instance.
pub fn initial_solution<R: Rng>(network: &Network, rng: &mut R) -> RoutingResult<Solution> {
    let finder = PathFinder::new(network);
    let flow_paths = network
        .demands()
        .iter()
        .map(|demand| {
            finder
                .find(demand.source, demand.sink, rng)
                .map(|path| FlowPath::new(*demand, path))
        })
        .collect::<RoutingResult<Vec<_>>>()?;
    Ok(Solution::from_parts(network.shared_capacities(), flow_paths))
}

/// Replaces a random sub-path of one demand's path by an alternative.
///
/// The demand is `target`, or a random one when `None`. Each attempt picks
/// positions `i < j` on the current path and searches a new route from
/// node `i` to node `j` that avoids the original sub-path and every node
/// outside the window, so the spliced path stays simple.
///
/// Returns the input unchanged when [`MAX_SPLICE_ATTEMPTS`] windows yield
/// nothing.
///
/// # Errors
///
/// [`RoutingError::UnknownDemand`] if `target` is out of range.
pub fn generate_neighbor<R: Rng>(
    solution: &Solution,
    network: &Network,
    target: Option<usize>,
    rng: &mut R,
) -> RoutingResult<Solution> {
    if solution.is_empty() && target.is_none() {
        return Ok(solution.clone());
    }
    absorb(solution, try_generate_neighbor(solution, network, target, rng))
}

/// Like [`generate_neighbor`], but reports an exhausted attempt budget as
/// [`RoutingError::NoPathFound`] instead of returning the input.
pub fn try_generate_neighbor<R: Rng>(
    solution: &Solution,
    network: &Network,
    target: Option<usize>,
    rng: &mut R,
) -> RoutingResult<Solution> {
    let index = match target {
        Some(index) => index,
        None if solution.is_empty() => return Err(RoutingError::UnknownDemand { index: 0 }),
        None => rng.random_range(0..solution.len()),
    };
    let flow_path = solution
        .flow_path(index)
        .ok_or(RoutingError::UnknownDemand { index })?;
    let nodes = flow_path.path.nodes();
    let n = nodes.len();
    let exhausted = RoutingError::NoPathFound {
        from: flow_path.demand.source,
        to: flow_path.demand.sink,
    };
    if n < 2 {
        return Err(exhausted);
    }

    for attempt in 0..MAX_SPLICE_ATTEMPTS {
        let i = rng.random_range(0..n - 1);
        let j = rng.random_range(i + 1..n);

        let untouched = nodes[..i].iter().chain(&nodes[j + 1..]).copied();
        let finder = PathFinder::new(network)
            .exclude(&nodes[i..=j])
            .forbid(untouched);

        match finder.find(nodes[i], nodes[j], rng) {
            Ok(detour) => {
                let detour = detour.into_nodes();
                let mut spliced = Vec::with_capacity(n - (j - i + 1) + detour.len());
                spliced.extend_from_slice(&nodes[..i]);
                spliced.extend(detour);
                spliced.extend_from_slice(&nodes[j + 1..]);
                return solution.with_path(index, Path::new(spliced));
            }
            Err(err) if err.is_recoverable() => {
                trace!(demand = index, attempt, i, j, "no alternative for splice window");
            }
            Err(err) => return Err(err),
        }
    }

    Err(exhausted)
}

/// Replaces the whole path of demand `index` by a fresh source-to-sink
/// path different from the current one.
///
/// Returns the input unchanged if no other path exists.
///
/// # Errors
///
/// [`RoutingError::UnknownDemand`] if `index` is out of range.
pub fn reroute_entire_demand<R: Rng>(
    solution: &Solution,
    network: &Network,
    index: usize,
    rng: &mut R,
) -> RoutingResult<Solution> {
    absorb(
        solution,
        try_reroute_entire_demand(solution, network, index, rng),
    )
}

/// Like [`reroute_entire_demand`], but reports a missing alternative as
/// [`RoutingError::NoPathFound`].
pub fn try_reroute_entire_demand<R: Rng>(
    solution: &Solution,
    network: &Network,
    index: usize,
    rng: &mut R,
) -> RoutingResult<Solution> {
    let flow_path = solution
        .flow_path(index)
        .ok_or(RoutingError::UnknownDemand { index })?;
    let demand = flow_path.demand;
    let path = PathFinder::new(network)
        .exclude(flow_path.path.nodes())
        .find(demand.source, demand.sink, rng)?;
    solution.with_path(index, path)
}

/// Turns a recoverable failure into "no move".
fn absorb(solution: &Solution, attempt: RoutingResult<Solution>) -> RoutingResult<Solution> {
    match attempt {
        Err(err) if err.is_recoverable() => Ok(solution.clone()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{fixtures, NetworkBuilder};
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn assert_routes_demands(network: &Network, solution: &Solution) {
        assert_eq!(solution.len(), network.demand_count());
        for (flow_path, demand) in solution.flow_paths().iter().zip(network.demands()) {
            assert_eq!(flow_path.demand, *demand);
            assert!(flow_path.connects_demand());
            assert!(flow_path.path.is_simple());
            assert!(flow_path
                .path
                .edges()
                .all(|e| network.contains_edge(e.from, e.to)));
        }
    }

    #[test]
    fn test_initial_solution_routes_every_demand() {
        let network = fixtures::grid(4, 10, 2);
        let mut rng = create_rng(Some(42));
        let solution = initial_solution(&network, &mut rng).unwrap();
        assert_routes_demands(&network, &solution);
    }

    #[test]
    fn test_initial_solution_unreachable_sink() {
        let network = NetworkBuilder::new()
            .add_edge(0, 1, 5)
            .add_edge(2, 1, 5)
            .add_demand(0, 2, 1)
            .build()
            .unwrap();
        let mut rng = create_rng(Some(42));
        assert_eq!(
            initial_solution(&network, &mut rng),
            Err(RoutingError::NoPathFound { from: 0, to: 2 })
        );
    }

    #[test]
    fn test_neighbor_changes_only_target() {
        let network = fixtures::grid(4, 10, 2);
        let mut rng = create_rng(Some(7));
        let original = initial_solution(&network, &mut rng).unwrap();
        let snapshot = original.clone();
        let mut moved = 0;

        for _ in 0..20 {
            let neighbor = generate_neighbor(&original, &network, Some(2), &mut rng).unwrap();
            assert_eq!(original, snapshot, "input must not be modified");
            assert_eq!(neighbor.flow_paths()[0], original.flow_paths()[0]);
            assert_eq!(neighbor.flow_paths()[1], original.flow_paths()[1]);
            assert_routes_demands(&network, &neighbor);
            if neighbor.flow_paths()[2] != original.flow_paths()[2] {
                moved += 1;
            }
        }
        assert!(moved > 0, "expected at least one successful splice");
    }

    #[test]
    fn test_neighbor_on_two_node_path() {
        let network = fixtures::diamond(10);
        let original = Solution::new(
            &network,
            vec![Path::new(vec![0, 3]), Path::new(vec![0, 3])],
        )
        .unwrap();
        let mut rng = create_rng(Some(3));

        let neighbor = try_generate_neighbor(&original, &network, Some(0), &mut rng).unwrap();
        let nodes = neighbor.flow_paths()[0].path.nodes();
        assert!(nodes == [0, 1, 3] || nodes == [0, 2, 3]);
    }

    #[test]
    fn test_neighbor_without_alternative_is_noop() {
        let network = fixtures::single_edge(10, 3);
        let mut rng = create_rng(Some(1));
        let original = initial_solution(&network, &mut rng).unwrap();

        let neighbor = generate_neighbor(&original, &network, None, &mut rng).unwrap();
        assert_eq!(neighbor, original);

        let attempt = try_generate_neighbor(&original, &network, None, &mut rng);
        assert_eq!(attempt, Err(RoutingError::NoPathFound { from: 0, to: 1 }));
    }

    #[test]
    fn test_neighbor_unknown_target() {
        let network = fixtures::diamond(10);
        let mut rng = create_rng(Some(1));
        let original = initial_solution(&network, &mut rng).unwrap();
        assert_eq!(
            generate_neighbor(&original, &network, Some(5), &mut rng),
            Err(RoutingError::UnknownDemand { index: 5 })
        );
    }

    #[test]
    fn test_neighbor_of_empty_solution() {
        let network = NetworkBuilder::new().add_edge(0, 1, 5).build().unwrap();
        let mut rng = create_rng(Some(1));
        let empty = initial_solution(&network, &mut rng).unwrap();
        assert_eq!(
            generate_neighbor(&empty, &network, None, &mut rng).unwrap(),
            empty
        );
    }

    #[test]
    fn test_reroute_picks_other_path() {
        let network = fixtures::diamond(10);
        let original = Solution::new(
            &network,
            vec![Path::new(vec![0, 1, 3]), Path::new(vec![0, 3])],
        )
        .unwrap();

        for seed in 0..20 {
            let mut rng = create_rng(Some(seed));
            let rerouted = reroute_entire_demand(&original, &network, 0, &mut rng).unwrap();
            assert_ne!(rerouted.flow_paths()[0].path.nodes(), &[0, 1, 3]);
            assert_eq!(rerouted.flow_paths()[1], original.flow_paths()[1]);
            assert_routes_demands(&network, &rerouted);
        }
    }

    #[test]
    fn test_reroute_without_alternative_is_noop() {
        let network = fixtures::single_edge(10, 3);
        let mut rng = create_rng(Some(9));
        let original = initial_solution(&network, &mut rng).unwrap();
        assert_eq!(
            reroute_entire_demand(&original, &network, 0, &mut rng).unwrap(),
            original
        );
        assert!(try_reroute_entire_demand(&original, &network, 0, &mut rng).is_err());
        assert_eq!(
            reroute_entire_demand(&original, &network, 1, &mut rng),
            Err(RoutingError::UnknownDemand { index: 1 })
        );
    }

    #[test]
    fn test_reroute_through_revisited_node() {
        let network = NetworkBuilder::new()
            .add_edge(0, 1, 5)
            .add_edge(1, 9, 5)
            .add_edge(1, 2, 5)
            .add_edge(0, 2, 5)
            .add_edge(2, 1, 5)
            .add_demand(0, 9, 1)
            .build()
            .unwrap();
        let original = Solution::new(&network, vec![Path::new(vec![0, 1, 9])]).unwrap();

        for seed in 0..200 {
            let mut rng = create_rng(Some(seed));
            let rerouted = try_reroute_entire_demand(&original, &network, 0, &mut rng)
                .unwrap_or_else(|err| panic!("seed {seed}: {err}"));
            assert_eq!(rerouted.flow_paths()[0].path.nodes(), &[0, 2, 1, 9]);
        }
    }

    proptest! {
        #[test]
        fn prop_mutation_chain_stays_valid(seed in any::<u64>(), steps in 1usize..40) {
            let network = fixtures::grid(4, 10, 2);
            let mut rng = create_rng(Some(seed));
            let mut current = initial_solution(&network, &mut rng).unwrap();

            for step in 0..steps {
                let before = current.clone();
                let next = if step % 3 == 0 {
                    let index = rng.random_range(0..current.len());
                    reroute_entire_demand(&current, &network, index, &mut rng).unwrap()
                } else {
                    generate_neighbor(&current, &network, None, &mut rng).unwrap()
                };
                prop_assert_eq!(&current, &before);
                for flow_path in next.flow_paths() {
                    prop_assert!(flow_path.connects_demand());
                    prop_assert!(flow_path.path.is_simple());
                }
                current = next;
            }
        }
    }
}
