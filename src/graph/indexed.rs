//! Validated index-based snapshot of a graph
//!
//! The search core works on node positions `0..n` and on subsets packed into a
//! single machine word. Labels are mapped back only when results leave the core.

use super::{Graph, GraphView};
use crate::error::{InvariantError, Result};
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// Largest graph the exact search accepts.
pub const MAX_ORDER: usize = 64;

/// A set of node positions, one bit per node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NodeSet(u64);

impl NodeSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    /// The set `{0, .., n - 1}`
    pub const fn full(n: usize) -> Self {
        if n >= 64 {
            Self(u64::MAX)
        } else {
            Self((1u64 << n) - 1)
        }
    }

    pub const fn singleton(node: usize) -> Self {
        Self(1u64 << node)
    }

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn contains(self, node: usize) -> bool {
        self.0 & (1u64 << node) != 0
    }

    #[inline]
    pub fn insert(&mut self, node: usize) {
        self.0 |= 1u64 << node;
    }

    #[inline]
    pub fn remove(&mut self, node: usize) {
        self.0 &= !(1u64 << node);
    }

    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    #[inline]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    /// Lowest member, if any
    pub const fn first(self) -> Option<usize> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros() as usize)
        }
    }

    /// Members in increasing order
    pub fn iter(self) -> NodeSetIter {
        NodeSetIter(self.0)
    }
}

impl FromIterator<usize> for NodeSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = Self::empty();
        for node in iter {
            set.insert(node);
        }
        set
    }
}

impl IntoIterator for NodeSet {
    type Item = usize;
    type IntoIter = NodeSetIter;

    fn into_iter(self) -> NodeSetIter {
        self.iter()
    }
}

impl fmt::Debug for NodeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Iterator over the members of a [`NodeSet`]
#[derive(Debug, Clone)]
pub struct NodeSetIter(u64);

impl Iterator for NodeSetIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let node = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.0.count_ones() as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for NodeSetIter {}

/// Immutable snapshot of a simple undirected graph with positional nodes.
///
/// Construction rejects directed graphs, multigraphs, self-loops and
/// asymmetric adjacency, so every query afterwards is total.
#[derive(Debug, Clone)]
pub struct IndexedGraph<N> {
    labels: Vec<N>,
    positions: HashMap<N, usize>,
    adjacency: Vec<NodeSet>,
    size: usize,
}

impl<N: Clone + Eq + std::hash::Hash + fmt::Debug> IndexedGraph<N> {
    /// Snapshot `graph`, accepting at most [`MAX_ORDER`] nodes
    pub fn from_view<G>(graph: &G) -> Result<Self>
    where
        G: GraphView<Node = N> + ?Sized,
    {
        Self::from_view_with_limit(graph, MAX_ORDER)
    }

    /// Snapshot `graph`, accepting at most `limit` nodes (capped at [`MAX_ORDER`])
    pub fn from_view_with_limit<G>(graph: &G, limit: usize) -> Result<Self>
    where
        G: GraphView<Node = N> + ?Sized,
    {
        if graph.is_directed() {
            return Err(InvariantError::UnsupportedGraphType(
                "directed graphs are not supported".to_string(),
            ));
        }
        if graph.is_multigraph() {
            return Err(InvariantError::UnsupportedGraphType(
                "multigraphs are not supported".to_string(),
            ));
        }

        let labels = graph.nodes();
        let limit = limit.min(MAX_ORDER);
        if labels.len() > limit {
            return Err(InvariantError::GraphTooLarge {
                order: labels.len(),
                limit,
            });
        }

        let mut positions = HashMap::with_capacity(labels.len());
        for (position, label) in labels.iter().enumerate() {
            if positions.insert(label.clone(), position).is_some() {
                return Err(InvariantError::UnsupportedGraphType(format!(
                    "node {:?} is listed more than once",
                    label
                )));
            }
        }

        let mut adjacency = vec![NodeSet::empty(); labels.len()];
        for (position, label) in labels.iter().enumerate() {
            for neighbor in graph.neighbors(label) {
                let Some(&other) = positions.get(&neighbor) else {
                    return Err(InvariantError::UnsupportedGraphType(format!(
                        "neighbor {:?} of {:?} is not a node of the graph",
                        neighbor, label
                    )));
                };
                if other == position {
                    return Err(InvariantError::UnsupportedGraphType(format!(
                        "self-loop at node {:?}",
                        label
                    )));
                }
                if adjacency[position].contains(other) {
                    return Err(InvariantError::UnsupportedGraphType(format!(
                        "parallel edges between {:?} and {:?}",
                        label, neighbor
                    )));
                }
                adjacency[position].insert(other);
            }
        }

        let mut degree_sum = 0;
        for (position, neighbors) in adjacency.iter().enumerate() {
            for other in neighbors.iter() {
                if !adjacency[other].contains(position) {
                    return Err(InvariantError::UnsupportedGraphType(format!(
                        "edge {:?} -> {:?} has no reverse; graph is not undirected",
                        labels[position], labels[other]
                    )));
                }
            }
            degree_sum += neighbors.len();
        }

        Ok(Self {
            labels,
            positions,
            adjacency,
            size: degree_sum / 2,
        })
    }
}

impl<N> IndexedGraph<N> {
    pub fn order(&self) -> usize {
        self.labels.len()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn all(&self) -> NodeSet {
        NodeSet::full(self.order())
    }

    #[inline]
    pub fn neighbors(&self, node: usize) -> NodeSet {
        self.adjacency[node]
    }

    #[inline]
    pub fn degree(&self, node: usize) -> usize {
        self.adjacency[node].len()
    }

    /// Degrees in node order
    pub fn degrees(&self) -> Vec<usize> {
        self.adjacency.iter().map(|neighbors| neighbors.len()).collect()
    }

    pub fn max_degree(&self) -> usize {
        self.adjacency.iter().map(|n| n.len()).max().unwrap_or(0)
    }

    pub fn min_degree(&self) -> usize {
        self.adjacency.iter().map(|n| n.len()).min().unwrap_or(0)
    }

    pub fn are_adjacent(&self, u: usize, v: usize) -> bool {
        self.adjacency[u].contains(v)
    }

    /// Union of the open neighborhoods of `set`
    pub fn open_neighborhood(&self, set: NodeSet) -> NodeSet {
        set.iter()
            .fold(NodeSet::empty(), |acc, node| acc.union(self.adjacency[node]))
    }

    /// `set` together with all its neighbors
    pub fn closed_neighborhood(&self, set: NodeSet) -> NodeSet {
        set.union(self.open_neighborhood(set))
    }

    pub fn isolated_nodes(&self) -> NodeSet {
        (0..self.order())
            .filter(|&node| self.adjacency[node].is_empty())
            .collect()
    }

    /// Whether the subgraph induced by `set` is connected. The empty set is not.
    pub fn is_connected_within(&self, set: NodeSet) -> bool {
        let Some(start) = set.first() else {
            return false;
        };

        let mut reached = NodeSet::singleton(start);
        let mut queue = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            let fresh = self.adjacency[node].intersection(set).difference(reached);
            reached = reached.union(fresh);
            queue.extend(fresh.iter());
        }

        reached == set
    }

    /// Whether the whole graph is connected. The null graph is not.
    pub fn is_connected(&self) -> bool {
        self.is_connected_within(self.all())
    }

    pub fn label(&self, node: usize) -> &N {
        &self.labels[node]
    }

    pub fn labels(&self) -> &[N] {
        &self.labels
    }
}

impl<N: Clone + Eq + std::hash::Hash> IndexedGraph<N> {
    pub fn position(&self, label: &N) -> Option<usize> {
        self.positions.get(label).copied()
    }

    /// Labels of `set`, in node order
    pub fn labels_of(&self, set: NodeSet) -> Vec<N> {
        set.iter().map(|node| self.labels[node].clone()).collect()
    }

    /// Positions of the given labels; labels that are not nodes are skipped
    pub fn subset_of<'a, I>(&self, labels: I) -> NodeSet
    where
        I: IntoIterator<Item = &'a N>,
        N: 'a,
    {
        labels
            .into_iter()
            .filter_map(|label| self.position(label))
            .collect()
    }

    /// Edges as position pairs `(u, v)` with `u < v`, ordered by `u` then `v`
    pub fn edges(&self) -> Vec<(usize, usize)> {
        (0..self.order())
            .flat_map(|u| {
                self.neighbors(u)
                    .iter()
                    .filter(move |&v| v > u)
                    .map(move |v| (u, v))
            })
            .collect()
    }

    /// The line graph: one node per edge, labelled by its endpoints in
    /// [`edges`](Self::edges) order, two nodes adjacent when their edges
    /// share an endpoint
    pub fn line_graph(&self) -> Graph<(N, N)> {
        let edges = self.edges();
        let endpoints = |(u, v): (usize, usize)| (self.labels[u].clone(), self.labels[v].clone());

        let mut line = Graph::new();
        for &edge in &edges {
            line.add_node(endpoints(edge));
        }
        for (i, &(a, b)) in edges.iter().enumerate() {
            for &(c, d) in &edges[i + 1..] {
                if a == c || a == d || b == c || b == d {
                    line.add_edge(endpoints((a, b)), endpoints((c, d)));
                }
            }
        }
        line
    }
}
