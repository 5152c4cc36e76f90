//! Labelled adjacency-list graph

use super::GraphView;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::hash::Hash;

/// Which edge semantics a [`Graph`] was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphKind {
    /// Undirected; repeated edges are collapsed.
    Simple,
    /// Edges are ordered pairs.
    Directed,
    /// Undirected; repeated edges are kept.
    Multi,
}

/// A graph over arbitrary hashable node labels.
///
/// Nodes keep their insertion order, which is the order reported by
/// [`GraphView::nodes`].
#[derive(Clone)]
pub struct Graph<N = usize> {
    kind: GraphKind,
    nodes: Vec<N>,
    index: HashMap<N, usize>,
    adjacency: Vec<Vec<usize>>,
    edges: Vec<(usize, usize)>,
}

impl<N: Clone + Eq + Hash> Default for Graph<N> {
    fn default() -> Self {
        Self::with_kind(GraphKind::Simple)
    }
}

impl<N: Clone + Eq + Hash> Graph<N> {
    /// Create an empty undirected simple graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty directed graph
    pub fn new_directed() -> Self {
        Self::with_kind(GraphKind::Directed)
    }

    /// Create an empty undirected multigraph
    pub fn new_multi() -> Self {
        Self::with_kind(GraphKind::Multi)
    }

    pub fn with_kind(kind: GraphKind) -> Self {
        Self {
            kind,
            nodes: Vec::new(),
            index: HashMap::new(),
            adjacency: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Build a simple graph from an edge list
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (N, N)>,
    {
        let mut graph = Self::new();
        for (u, v) in edges {
            graph.add_edge(u, v);
        }
        graph
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    /// Add a node if absent and return its position
    pub fn add_node(&mut self, node: N) -> usize {
        if let Some(&position) = self.index.get(&node) {
            return position;
        }
        let position = self.nodes.len();
        self.index.insert(node.clone(), position);
        self.nodes.push(node);
        self.adjacency.push(Vec::new());
        position
    }

    /// Add an edge, inserting missing endpoints.
    ///
    /// Simple graphs ignore an edge that is already present.
    pub fn add_edge(&mut self, u: N, v: N) {
        let a = self.add_node(u);
        let b = self.add_node(v);

        if self.kind == GraphKind::Simple && self.adjacency[a].contains(&b) {
            return;
        }

        self.adjacency[a].push(b);
        if self.kind != GraphKind::Directed && a != b {
            self.adjacency[b].push(a);
        }
        self.edges.push((a, b));
    }

    pub fn contains(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    pub fn has_edge(&self, u: &N, v: &N) -> bool {
        match (self.index.get(u), self.index.get(v)) {
            (Some(&a), Some(&b)) => self.adjacency[a].contains(&b),
            _ => false,
        }
    }

    /// Edges as label pairs, in insertion order
    pub fn edges(&self) -> Vec<(N, N)> {
        self.edges
            .iter()
            .map(|&(a, b)| (self.nodes[a].clone(), self.nodes[b].clone()))
            .collect()
    }
}

impl<N: Clone + Eq + Hash + Debug> GraphView for Graph<N> {
    type Node = N;

    fn nodes(&self) -> Vec<N> {
        self.nodes.clone()
    }

    fn neighbors(&self, node: &N) -> Vec<N> {
        match self.index.get(node) {
            Some(&position) => self.adjacency[position]
                .iter()
                .map(|&other| self.nodes[other].clone())
                .collect(),
            None => Vec::new(),
        }
    }

    fn size(&self) -> usize {
        self.edges.len()
    }

    fn degree(&self, node: &N) -> usize {
        self.index
            .get(node)
            .map_or(0, |&position| self.adjacency[position].len())
    }

    fn order(&self) -> usize {
        self.nodes.len()
    }

    fn is_directed(&self) -> bool {
        self.kind == GraphKind::Directed
    }

    fn is_multigraph(&self) -> bool {
        self.kind == GraphKind::Multi
    }
}

impl<N: Debug> fmt::Debug for Graph<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("kind", &self.kind)
            .field("order", &self.nodes.len())
            .field("size", &self.edges.len())
            .finish()
    }
}
