//! Read-only capability interface over an external graph

use std::fmt::Debug;
use std::hash::Hash;

/// The queries the invariant core needs from a graph.
///
/// Any representation can take part by implementing this trait. The core
/// never mutates a graph; it takes one validated snapshot per call.
///
/// `nodes()` must return every node exactly once and in a stable order: that
/// order fixes the enumeration order of candidate subsets, and therefore which
/// witness is reported when several are optimal.
pub trait GraphView {
    type Node: Clone + Eq + Hash + Debug;

    /// All nodes, in a stable order.
    fn nodes(&self) -> Vec<Self::Node>;

    /// Neighbors of `node`. For directed graphs these are the successors.
    fn neighbors(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Number of edges.
    fn size(&self) -> usize;

    fn degree(&self, node: &Self::Node) -> usize {
        self.neighbors(node).len()
    }

    fn order(&self) -> usize {
        self.nodes().len()
    }

    fn is_directed(&self) -> bool {
        false
    }

    fn is_multigraph(&self) -> bool {
        false
    }
}

impl<G: GraphView + ?Sized> GraphView for &G {
    type Node = G::Node;

    fn nodes(&self) -> Vec<Self::Node> {
        (**self).nodes()
    }

    fn neighbors(&self, node: &Self::Node) -> Vec<Self::Node> {
        (**self).neighbors(node)
    }

    fn size(&self) -> usize {
        (**self).size()
    }

    fn degree(&self, node: &Self::Node) -> usize {
        (**self).degree(node)
    }

    fn order(&self) -> usize {
        (**self).order()
    }

    fn is_directed(&self) -> bool {
        (**self).is_directed()
    }

    fn is_multigraph(&self) -> bool {
        (**self).is_multigraph()
    }
}
