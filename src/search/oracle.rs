//! Validity predicates over candidate subsets
//!
//! Every predicate is pure and total: it accepts any subset, the empty and
//! the full node set included, and never mutates the graph.

use crate::forcing::PropagationSimulator;
use crate::graph::{IndexedGraph, NodeSet};
use serde::{Deserialize, Serialize};

/// Extra structural condition layered on top of a base predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Refinement {
    Plain,
    /// Every member has a neighbor inside the subset
    Total,
    /// The induced subgraph on the subset is connected
    Connected,
    /// No two members are adjacent
    Independent,
}

impl Refinement {
    pub fn holds<N>(self, graph: &IndexedGraph<N>, subset: NodeSet) -> bool {
        match self {
            Refinement::Plain => true,
            Refinement::Total => is_total(graph, subset),
            Refinement::Connected => graph.is_connected_within(subset),
            Refinement::Independent => is_independent(graph, subset),
        }
    }
}

/// The defining condition of one invariant, with its parameters bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidityOracle {
    /// Every member has fewer than `k` neighbors inside the subset
    Independence { k: usize },
    Clique,
    VertexCover,
    /// Every node outside the subset has at least `k` neighbors inside it
    Domination { k: usize, refinement: Refinement },
    /// The subset k-forces the whole graph
    Forcing { k: usize, refinement: Refinement },
    /// The closed neighborhood of the subset k-forces the whole graph
    PowerDomination { k: usize },
}

impl ValidityOracle {
    /// Whether `subset` satisfies this condition; bits beyond the graph order are ignored
    pub fn is_valid<N>(&self, graph: &IndexedGraph<N>, subset: NodeSet) -> bool {
        let subset = subset.intersection(graph.all());
        match *self {
            ValidityOracle::Independence { k } => is_k_independent(graph, subset, k),
            ValidityOracle::Clique => is_clique(graph, subset),
            ValidityOracle::VertexCover => is_vertex_cover(graph, subset),
            ValidityOracle::Domination { k, refinement } => {
                is_k_dominating(graph, subset, k) && refinement.holds(graph, subset)
            }
            ValidityOracle::Forcing { k, refinement } => {
                refinement.holds(graph, subset)
                    && PropagationSimulator::new(graph, k).forces_all(subset)
            }
            ValidityOracle::PowerDomination { k } => {
                PropagationSimulator::new(graph, k).forces_all(graph.closed_neighborhood(subset))
            }
        }
    }
}

pub fn is_independent<N>(graph: &IndexedGraph<N>, subset: NodeSet) -> bool {
    subset
        .iter()
        .all(|node| graph.neighbors(node).intersection(subset).is_empty())
}

pub fn is_k_independent<N>(graph: &IndexedGraph<N>, subset: NodeSet, k: usize) -> bool {
    subset
        .iter()
        .all(|node| graph.neighbors(node).intersection(subset).len() < k)
}

pub fn is_clique<N>(graph: &IndexedGraph<N>, subset: NodeSet) -> bool {
    subset.iter().all(|node| {
        let others = subset.difference(NodeSet::singleton(node));
        others.is_subset(graph.neighbors(node))
    })
}

pub fn is_vertex_cover<N>(graph: &IndexedGraph<N>, subset: NodeSet) -> bool {
    // an uncovered edge has both ends outside the subset
    let outside = graph.all().difference(subset);
    is_independent(graph, outside)
}

pub fn is_k_dominating<N>(graph: &IndexedGraph<N>, subset: NodeSet, k: usize) -> bool {
    graph
        .all()
        .difference(subset)
        .iter()
        .all(|node| graph.neighbors(node).intersection(subset).len() >= k)
}

/// Every member of `subset` has a neighbor inside `subset`
pub fn is_total<N>(graph: &IndexedGraph<N>, subset: NodeSet) -> bool {
    subset
        .iter()
        .all(|node| !graph.neighbors(node).intersection(subset).is_empty())
}
