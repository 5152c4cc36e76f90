//! Standard graph families with `usize` labels

use super::Graph;

/// Graph with `n` nodes and no edges
pub fn empty_graph(n: usize) -> Graph {
    let mut graph = Graph::new();
    for node in 0..n {
        graph.add_node(node);
    }
    graph
}

/// The single-node graph
pub fn trivial_graph() -> Graph {
    empty_graph(1)
}

/// Path `0 - 1 - .. - (n-1)`
pub fn path_graph(n: usize) -> Graph {
    let mut graph = empty_graph(n);
    for node in 1..n {
        graph.add_edge(node - 1, node);
    }
    graph
}

/// Cycle `0 - 1 - .. - (n-1) - 0`; fewer than three nodes gives a path
pub fn cycle_graph(n: usize) -> Graph {
    let mut graph = path_graph(n);
    if n >= 3 {
        graph.add_edge(n - 1, 0);
    }
    graph
}

/// Star with center `0` and leaves `1..=leaves`
pub fn star_graph(leaves: usize) -> Graph {
    let mut graph = empty_graph(leaves + 1);
    for leaf in 1..=leaves {
        graph.add_edge(0, leaf);
    }
    graph
}

pub fn complete_graph(n: usize) -> Graph {
    let mut graph = empty_graph(n);
    for u in 0..n {
        for v in (u + 1)..n {
            graph.add_edge(u, v);
        }
    }
    graph
}

/// The Petersen graph: outer 5-cycle `0..5`, inner pentagram `5..10`, spokes `i - i+5`
pub fn petersen_graph() -> Graph {
    let mut graph = empty_graph(10);
    for i in 0..5 {
        graph.add_edge(i, (i + 1) % 5);
        graph.add_edge(i, i + 5);
        graph.add_edge(5 + i, 5 + (i + 2) % 5);
    }
    graph
}

/// Two copies of `K_bell` joined by a path of `bridge` extra nodes.
///
/// Nodes `0..bell` form the left bell, `bell..bell+bridge` the path and the
/// remaining `bell` nodes the right bell.
pub fn barbell_graph(bell: usize, bridge: usize) -> Graph {
    let mut graph = empty_graph(2 * bell + bridge);
    let right = bell + bridge;
    for u in 0..bell {
        for v in (u + 1)..bell {
            graph.add_edge(u, v);
            graph.add_edge(right + u, right + v);
        }
    }
    if bell > 0 {
        for node in (bell - 1)..right {
            graph.add_edge(node, node + 1);
        }
    }
    graph
}
