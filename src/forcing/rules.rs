//! The k-forcing color-change rule

use crate::graph::{IndexedGraph, NodeSet};

/// Color-change rule engine.
///
/// A black vertex with between 1 and `k` white neighbors is *active* and
/// turns all of those neighbors black. `k = 1` is classical zero forcing.
pub struct ForcingRules;

impl ForcingRules {
    /// White neighbors of `node` relative to the black set
    #[inline]
    pub fn white_neighbors<N>(graph: &IndexedGraph<N>, node: usize, black: NodeSet) -> NodeSet {
        graph.neighbors(node).difference(black)
    }

    /// Whether a white-neighbor count lets a black vertex force
    #[inline]
    pub fn can_force(white_count: usize, k: usize) -> bool {
        white_count >= 1 && white_count <= k
    }

    /// Whether `node` is black and can k-force relative to `black`
    pub fn is_forcing_vertex<N>(graph: &IndexedGraph<N>, node: usize, black: NodeSet, k: usize) -> bool {
        black.contains(node) && Self::can_force(Self::white_neighbors(graph, node, black).len(), k)
    }

    /// Whether some vertex of `black` can k-force
    pub fn is_forcing_active_set<N>(graph: &IndexedGraph<N>, black: NodeSet, k: usize) -> bool {
        black
            .iter()
            .any(|node| Self::is_forcing_vertex(graph, node, black, k))
    }

    /// Vertices `node` turns black, empty when it is not active
    pub fn forced_by<N>(graph: &IndexedGraph<N>, node: usize, black: NodeSet, k: usize) -> NodeSet {
        if !black.contains(node) {
            return NodeSet::empty();
        }
        let white = Self::white_neighbors(graph, node, black);
        if Self::can_force(white.len(), k) {
            white
        } else {
            NodeSet::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::star_graph;

    fn star(leaves: usize) -> IndexedGraph<usize> {
        IndexedGraph::from_view(&star_graph(leaves)).unwrap()
    }

    #[test]
    fn test_leaf_forces_center_of_star() {
        let graph = star(2);
        assert!(ForcingRules::is_forcing_vertex(&graph, 1, NodeSet::singleton(1), 1));
        assert!(!ForcingRules::is_forcing_vertex(&graph, 0, NodeSet::singleton(0), 1));
        assert_eq!(
            ForcingRules::forced_by(&graph, 1, NodeSet::singleton(1), 1),
            NodeSet::singleton(0)
        );
    }

    #[test]
    fn test_center_of_star_needs_large_k() {
        let graph = star(3);
        assert!(ForcingRules::is_forcing_vertex(&graph, 0, NodeSet::singleton(0), 3));
        assert!(!ForcingRules::is_forcing_vertex(&graph, 0, NodeSet::singleton(0), 2));
    }

    #[test]
    fn test_empty_set_has_no_forcing_vertex() {
        let graph = star(2);
        for node in 0..3 {
            assert!(!ForcingRules::is_forcing_vertex(&graph, node, NodeSet::empty(), 1));
        }
        assert!(!ForcingRules::is_forcing_active_set(&graph, NodeSet::empty(), 1));
    }

    #[test]
    fn test_active_sets() {
        let graph = star(2);
        assert!(ForcingRules::is_forcing_active_set(&graph, NodeSet::singleton(1), 1));
        assert!(!ForcingRules::is_forcing_active_set(&graph, NodeSet::singleton(0), 1));
    }

    #[test]
    fn test_rule_counts() {
        assert!(!ForcingRules::can_force(0, 3));
        assert!(ForcingRules::can_force(1, 1));
        assert!(ForcingRules::can_force(3, 3));
        assert!(!ForcingRules::can_force(4, 3));
        assert!(!ForcingRules::can_force(1, 0));
    }
}
