//! Graph access for the invariant core

pub mod degree;
pub mod generators;
pub mod indexed;
pub mod io;
pub mod simple;
pub mod view;

pub use generators::{
    barbell_graph, complete_graph, cycle_graph, empty_graph, path_graph, petersen_graph,
    star_graph, trivial_graph,
};
pub use indexed::{IndexedGraph, NodeSet, MAX_ORDER};
pub use io::{create_example_graphs, load_graph_from_file, parse_graph_from_string, save_graph_to_file};
pub use simple::{Graph, GraphKind};
pub use view::GraphView;
