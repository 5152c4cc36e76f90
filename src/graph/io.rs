//! Edge-list file format for graphs
//!
//! Format: one edge `u v` per line, a single token declares an isolated node,
//! `#` starts a comment. An optional first line `directed` or `multi` selects
//! the graph kind; the default is a simple undirected graph.

use super::{Graph, GraphKind, GraphView};
use anyhow::{Context, Result};
use std::path::Path;

/// Load a graph from an edge-list file
pub fn load_graph_from_file<P: AsRef<Path>>(path: P) -> Result<Graph<String>> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read graph file: {}", path.as_ref().display()))?;

    parse_graph_from_string(&content)
        .with_context(|| format!("Failed to parse graph from file: {}", path.as_ref().display()))
}

/// Parse a graph from its edge-list representation
pub fn parse_graph_from_string(content: &str) -> Result<Graph<String>> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(number, line)| (number + 1, strip_comment(line).trim()))
        .filter(|(_, line)| !line.is_empty())
        .peekable();

    let kind = match lines.peek() {
        Some((_, "directed")) => Some(GraphKind::Directed),
        Some((_, "multi")) => Some(GraphKind::Multi),
        Some((_, "simple")) => Some(GraphKind::Simple),
        _ => None,
    };
    if kind.is_some() {
        lines.next();
    }
    let mut graph = Graph::with_kind(kind.unwrap_or(GraphKind::Simple));

    for (number, line) in lines {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [node] => {
                graph.add_node(node.to_string());
            }
            [u, v] => graph.add_edge(u.to_string(), v.to_string()),
            _ => anyhow::bail!(
                "Line {} has {} tokens, expected a node or an edge `u v`",
                number,
                tokens.len()
            ),
        }
    }

    Ok(graph)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(position) => &line[..position],
        None => line,
    }
}

/// Save a graph in edge-list form
pub fn save_graph_to_file<G, P>(graph: &G, path: P) -> Result<()>
where
    G: GraphView,
    G::Node: std::fmt::Display,
    P: AsRef<Path>,
{
    let content = graph_to_string(graph);

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write graph to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Render a graph as an edge list. Each undirected edge is written once.
pub fn graph_to_string<G>(graph: &G) -> String
where
    G: GraphView,
    G::Node: std::fmt::Display,
{
    let nodes = graph.nodes();
    let mut result = String::new();

    if graph.is_directed() {
        result.push_str("directed\n");
    } else if graph.is_multigraph() {
        result.push_str("multi\n");
    }

    for (position, node) in nodes.iter().enumerate() {
        let neighbors = graph.neighbors(node);
        if neighbors.is_empty() && !nodes.iter().any(|other| graph.neighbors(other).contains(node)) {
            result.push_str(&format!("{}\n", node));
            continue;
        }
        for neighbor in neighbors {
            let keep = graph.is_directed()
                || nodes
                    .iter()
                    .position(|other| *other == neighbor)
                    .is_some_and(|other| other >= position);
            if keep {
                result.push_str(&format!("{} {}\n", node, neighbor));
            }
        }
    }

    result
}

/// Write a few small example graphs into `dir`
pub fn create_example_graphs<P: AsRef<Path>>(dir: P) -> Result<()> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    save_graph_to_file(&super::cycle_graph(5), dir.join("cycle5.txt"))?;
    save_graph_to_file(&super::petersen_graph(), dir.join("petersen.txt"))?;
    save_graph_to_file(&super::star_graph(4), dir.join("star4.txt"))?;
    save_graph_to_file(&super::path_graph(4), dir.join("path4.txt"))?;
    save_graph_to_file(&super::empty_graph(3), dir.join("empty3.txt"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::petersen_graph;
    use tempfile::tempdir;

    #[test]
    fn test_parse_edges_and_isolated_nodes() {
        let content = "# a triangle with a pendant and a loner\n\
                       a b\n\
                       b c\n\
                       c a  # closing edge\n\
                       c d\n\
                       e\n";
        let graph = parse_graph_from_string(content).unwrap();

        assert_eq!(graph.order(), 5);
        assert_eq!(graph.size(), 4);
        assert_eq!(graph.degree(&"c".to_string()), 3);
        assert_eq!(graph.degree(&"e".to_string()), 0);
    }

    #[test]
    fn test_parse_kind_header() {
        let graph = parse_graph_from_string("directed\n0 1\n").unwrap();
        assert!(graph.is_directed());

        let graph = parse_graph_from_string("multi\n0 1\n0 1\n").unwrap();
        assert!(graph.is_multigraph());
        assert_eq!(graph.size(), 2);
    }

    #[test]
    fn test_parse_rejects_long_lines() {
        assert!(parse_graph_from_string("0 1 2\n").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("petersen.txt");
        save_graph_to_file(&petersen_graph(), &path).unwrap();

        let loaded = load_graph_from_file(&path).unwrap();
        assert_eq!(loaded.order(), 10);
        assert_eq!(loaded.size(), 15);
    }

    #[test]
    fn test_create_example_graphs() {
        let temp_dir = tempdir().unwrap();
        create_example_graphs(temp_dir.path()).unwrap();

        let empty = load_graph_from_file(temp_dir.path().join("empty3.txt")).unwrap();
        assert_eq!(empty.order(), 3);
        assert_eq!(empty.size(), 0);
    }
}
