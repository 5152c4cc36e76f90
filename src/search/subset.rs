//! Bounded exhaustive search for an extremal valid subset

use super::bounds::Bound;
use super::combinations::{binomial, Combinations};
use super::oracle::ValidityOracle;
use crate::graph::{IndexedGraph, NodeSet};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Whether the invariant is a smallest or a largest valid subset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Minimize,
    Maximize,
}

/// Work done by one search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub sizes_visited: usize,
    pub candidates_tested: u64,
    pub elapsed: Duration,
}

/// Result of one search; `witness` is `None` when no admissible size has a valid subset
#[derive(Debug, Clone, Copy)]
pub struct SearchOutcome {
    pub witness: Option<NodeSet>,
    pub stats: SearchStats,
}

/// Walks subset sizes outward from a bound and returns the first valid subset.
///
/// Minimization visits sizes `bound.lower, bound.lower + 1, .., n`;
/// maximization visits `bound.upper, bound.upper - 1, .., 0`. Within a size,
/// subsets are tested in lexicographic order of node positions. The first
/// size with any valid subset is optimal because sizes are visited in the
/// objective's order; the bound only decides where the walk starts.
pub struct SubsetSearch<'g, N> {
    graph: &'g IndexedGraph<N>,
    oracle: ValidityOracle,
}

impl<'g, N> SubsetSearch<'g, N> {
    pub fn new(graph: &'g IndexedGraph<N>, oracle: ValidityOracle) -> Self {
        Self { graph, oracle }
    }

    pub fn run(&self, direction: Direction, bound: Bound) -> SearchOutcome {
        let start_time = Instant::now();
        let n = self.graph.order();
        let mut stats = SearchStats::default();

        let sizes: Box<dyn Iterator<Item = usize>> = match direction {
            Direction::Minimize => Box::new(bound.lower..=n),
            Direction::Maximize => Box::new((0..=bound.upper.min(n)).rev()),
        };

        let mut witness = None;
        for size in sizes {
            stats.sizes_visited += 1;
            debug!(
                "Testing {} subsets of size {} against {:?}",
                binomial(n, size),
                size,
                self.oracle
            );

            if let Some(found) = self.scan_size(size, &mut stats) {
                witness = Some(found);
                break;
            }
        }

        stats.elapsed = start_time.elapsed();
        SearchOutcome { witness, stats }
    }

    /// First valid subset of exactly `size` nodes
    fn scan_size(&self, size: usize, stats: &mut SearchStats) -> Option<NodeSet> {
        for candidate in Combinations::new(self.graph.order(), size) {
            stats.candidates_tested += 1;
            if self.oracle.is_valid(self.graph, candidate) {
                return Some(candidate);
            }
        }
        None
    }
}

/// Run a [`SubsetSearch`] once
pub fn search<N>(
    graph: &IndexedGraph<N>,
    oracle: ValidityOracle,
    direction: Direction,
    bound: Bound,
) -> SearchOutcome {
    SubsetSearch::new(graph, oracle).run(direction, bound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{cycle_graph, empty_graph, petersen_graph, star_graph, GraphView};
    use crate::search::oracle::Refinement;

    fn indexed<G: GraphView<Node = usize>>(graph: &G) -> IndexedGraph<usize> {
        IndexedGraph::from_view(graph).unwrap()
    }

    #[test]
    fn test_maximum_independent_set_of_cycle() {
        let graph = indexed(&cycle_graph(5));
        let outcome = search(
            &graph,
            ValidityOracle::Independence { k: 1 },
            Direction::Maximize,
            Bound::trivial(5),
        );

        assert_eq!(outcome.witness, Some(NodeSet::from_iter([0, 2])));
        // sizes 5, 4, 3 fail before 2 succeeds
        assert_eq!(outcome.stats.sizes_visited, 4);
    }

    #[test]
    fn test_minimum_dominating_set_of_star() {
        let graph = indexed(&star_graph(4));
        let oracle = ValidityOracle::Domination {
            k: 1,
            refinement: Refinement::Plain,
        };
        let outcome = search(&graph, oracle, Direction::Minimize, Bound::trivial(5));

        assert_eq!(outcome.witness, Some(NodeSet::singleton(0)));
        // the empty set is tested once before size one
        assert_eq!(outcome.stats.candidates_tested, 2);
    }

    #[test]
    fn test_bound_skips_infeasible_sizes() {
        let graph = indexed(&petersen_graph());
        let oracle = ValidityOracle::Independence { k: 1 };

        let unbounded = search(&graph, oracle, Direction::Maximize, Bound::trivial(10));
        let bounded = search(&graph, oracle, Direction::Maximize, Bound::new(0, 5));

        assert_eq!(unbounded.witness.map(NodeSet::len), Some(4));
        assert_eq!(bounded.witness.map(NodeSet::len), Some(4));
        assert!(bounded.stats.candidates_tested < unbounded.stats.candidates_tested);
    }

    #[test]
    fn test_not_found_when_nothing_is_valid() {
        // no connected dominating set exists in a disconnected graph
        let graph = indexed(&empty_graph(3));
        let oracle = ValidityOracle::Domination {
            k: 1,
            refinement: Refinement::Connected,
        };
        let outcome = search(&graph, oracle, Direction::Minimize, Bound::trivial(3));

        assert!(outcome.witness.is_none());
        assert_eq!(outcome.stats.sizes_visited, 4);
        assert_eq!(outcome.stats.candidates_tested, 8);
    }

    #[test]
    fn test_lower_bound_above_order_finds_nothing() {
        let graph = indexed(&cycle_graph(4));
        let outcome = search(
            &graph,
            ValidityOracle::VertexCover,
            Direction::Minimize,
            Bound { lower: 5, upper: 5 },
        );
        assert!(outcome.witness.is_none());
        assert_eq!(outcome.stats.sizes_visited, 0);
    }
}
