//! Function-per-invariant surface over [`InvariantSolver`]
//!
//! For each invariant there is a `<name>_number`, a `min_`/`max_` witness
//! function and an `is_<name>` membership check. Parameterized variants take
//! `k` as `i64` so that non-positive values are reported instead of wrapped.
//! Every function runs a fresh computation with the default search settings.

use super::registry::{Invariant, Params};
use super::solver::InvariantSolver;
use crate::config::SearchConfig;
use crate::error::Result;
use crate::forcing::{ForcingRules, PropagationSimulator};
use crate::graph::degree::{self, HavelHakimi};
use crate::graph::{Graph, GraphView, IndexedGraph, MAX_ORDER};

fn default_solver() -> InvariantSolver {
    InvariantSolver::new(SearchConfig {
        max_order: MAX_ORDER,
        ..SearchConfig::default()
    })
}

macro_rules! invariant_functions {
    ($invariant:ident(k): $number:ident, $optimal_set:ident, $is_set:ident) => {
        pub fn $number<G: GraphView + ?Sized>(graph: &G, k: i64) -> Result<usize> {
            default_solver().value(graph, Invariant::$invariant, Params::with_k(k))
        }

        pub fn $optimal_set<G: GraphView + ?Sized>(graph: &G, k: i64) -> Result<Vec<G::Node>> {
            default_solver()
                .witness(graph, Invariant::$invariant, Params::with_k(k))
                .map(|result| result.witness)
        }

        pub fn $is_set<G: GraphView + ?Sized>(graph: &G, subset: &[G::Node], k: i64) -> Result<bool> {
            default_solver().is_valid(graph, Invariant::$invariant, subset, Params::with_k(k))
        }
    };
    ($invariant:ident: $number:ident, $optimal_set:ident, $is_set:ident) => {
        pub fn $number<G: GraphView + ?Sized>(graph: &G) -> Result<usize> {
            default_solver().value(graph, Invariant::$invariant, Params::new())
        }

        pub fn $optimal_set<G: GraphView + ?Sized>(graph: &G) -> Result<Vec<G::Node>> {
            default_solver()
                .witness(graph, Invariant::$invariant, Params::new())
                .map(|result| result.witness)
        }

        pub fn $is_set<G: GraphView + ?Sized>(graph: &G, subset: &[G::Node]) -> Result<bool> {
            default_solver().is_valid(graph, Invariant::$invariant, subset, Params::new())
        }
    };
}

invariant_functions!(Independence: independence_number, max_independent_set, is_independent_set);
invariant_functions!(Independence(k): k_independence_number, max_k_independent_set, is_k_independent_set);
invariant_functions!(Clique: clique_number, max_clique, is_clique);
invariant_functions!(VertexCover: vertex_cover_number, min_vertex_cover, is_vertex_cover);
invariant_functions!(Domination: domination_number, min_dominating_set, is_dominating_set);
invariant_functions!(Domination(k): k_domination_number, min_k_dominating_set, is_k_dominating_set);
invariant_functions!(TotalDomination: total_domination_number, min_total_dominating_set, is_total_dominating_set);
invariant_functions!(ConnectedDomination: connected_domination_number, min_connected_dominating_set, is_connected_dominating_set);
invariant_functions!(ConnectedDomination(k): connected_k_domination_number, min_connected_k_dominating_set, is_connected_k_dominating_set);
invariant_functions!(IndependentDomination: independent_domination_number, min_independent_dominating_set, is_independent_dominating_set);
invariant_functions!(IndependentDomination(k): independent_k_domination_number, min_independent_k_dominating_set, is_independent_k_dominating_set);
invariant_functions!(ZeroForcing: zero_forcing_number, min_zero_forcing_set, is_zero_forcing_set);
invariant_functions!(ZeroForcing(k): k_forcing_number, min_k_forcing_set, is_k_forcing_set);
invariant_functions!(TotalZeroForcing: total_zero_forcing_number, min_total_zero_forcing_set, is_total_zero_forcing_set);
invariant_functions!(ConnectedForcing: connected_zero_forcing_number, min_connected_zero_forcing_set, is_connected_zero_forcing_set);
invariant_functions!(ConnectedForcing(k): connected_k_forcing_number, min_connected_k_forcing_set, is_connected_k_forcing_set);
invariant_functions!(PowerDomination: power_domination_number, min_power_dominating_set, is_power_dominating_set);
invariant_functions!(PowerDomination(k): k_power_domination_number, min_k_power_dominating_set, is_k_power_dominating_set);

/// Fixpoint of the k-forcing process from a labelled initial set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForcingClosure<N> {
    /// Black nodes at the fixpoint, in node order
    pub final_black: Vec<N>,
    pub forces_all: bool,
    pub passes: usize,
}

fn forcing_k(k: i64) -> Result<usize> {
    Params::with_k(k).resolve_k(Invariant::ZeroForcing)
}

/// Run k-forcing from `initial`; labels that are not nodes are ignored
pub fn forcing_closure<G>(graph: &G, initial: &[G::Node], k: i64) -> Result<ForcingClosure<G::Node>>
where
    G: GraphView + ?Sized,
{
    let k = forcing_k(k)?;
    let snapshot = IndexedGraph::from_view(graph)?;
    let outcome = PropagationSimulator::new(&snapshot, k).simulate(snapshot.subset_of(initial));

    Ok(ForcingClosure {
        final_black: snapshot.labels_of(outcome.final_black),
        forces_all: outcome.forces_all,
        passes: outcome.passes,
    })
}

/// Whether `node` is black and has between 1 and `k` white neighbors
pub fn is_k_forcing_vertex<G>(graph: &G, node: &G::Node, black: &[G::Node], k: i64) -> Result<bool>
where
    G: GraphView + ?Sized,
{
    let k = forcing_k(k)?;
    let snapshot = IndexedGraph::from_view(graph)?;
    Ok(snapshot.position(node).is_some_and(|position| {
        ForcingRules::is_forcing_vertex(&snapshot, position, snapshot.subset_of(black), k)
    }))
}

/// Whether some member of `black` can k-force
pub fn is_k_forcing_active_set<G>(graph: &G, black: &[G::Node], k: i64) -> Result<bool>
where
    G: GraphView + ?Sized,
{
    let k = forcing_k(k)?;
    let snapshot = IndexedGraph::from_view(graph)?;
    Ok(ForcingRules::is_forcing_active_set(
        &snapshot,
        snapshot.subset_of(black),
        k,
    ))
}

pub fn is_zero_forcing_vertex<G>(graph: &G, node: &G::Node, black: &[G::Node]) -> Result<bool>
where
    G: GraphView + ?Sized,
{
    is_k_forcing_vertex(graph, node, black, 1)
}

pub fn is_zero_forcing_active_set<G>(graph: &G, black: &[G::Node]) -> Result<bool>
where
    G: GraphView + ?Sized,
{
    is_k_forcing_active_set(graph, black, 1)
}

/// Degrees in the graph's node order
pub fn degree_sequence<G: GraphView + ?Sized>(graph: &G) -> Result<Vec<usize>> {
    Ok(IndexedGraph::from_view(graph)?.degrees())
}

/// Havel–Hakimi process on the degree sequence
pub fn havel_hakimi<G: GraphView + ?Sized>(graph: &G) -> Result<HavelHakimi> {
    Ok(HavelHakimi::new(&degree_sequence(graph)?))
}

pub fn residue<G: GraphView + ?Sized>(graph: &G) -> Result<usize> {
    Ok(degree::residue(&degree_sequence(graph)?))
}

pub fn annihilation_number<G: GraphView + ?Sized>(graph: &G) -> Result<usize> {
    let snapshot = IndexedGraph::from_view(graph)?;
    Ok(degree::annihilation_number(&snapshot.degrees(), snapshot.size()))
}

pub fn slater<G: GraphView + ?Sized>(graph: &G) -> Result<usize> {
    Ok(degree::slater(&degree_sequence(graph)?))
}

pub fn sub_k_domination_number<G: GraphView + ?Sized>(graph: &G, k: i64) -> Result<usize> {
    let k = Params::with_k(k).resolve_k(Invariant::Domination)?;
    Ok(degree::sub_k_domination_number(&degree_sequence(graph)?, k))
}

/// `None` when no prefix of the sorted degrees reaches the order
pub fn sub_total_domination_number<G: GraphView + ?Sized>(graph: &G) -> Result<Option<usize>> {
    Ok(degree::sub_total_domination_number(&degree_sequence(graph)?))
}

pub fn k_residue<G: GraphView + ?Sized>(graph: &G, k: i64) -> Result<f64> {
    let k = Params::with_k(k).resolve_k(Invariant::Domination)?;
    Ok(havel_hakimi(graph)?.k_residue(k))
}

/// Smallest `k` whose k-residue reaches the independence number
pub fn k_residual_index<G: GraphView + ?Sized>(graph: &G) -> Result<usize> {
    let independence = independence_number(graph)?;
    let process = havel_hakimi(graph)?;

    let mut k = 1;
    while process.scaled_k_residue(k) < k * independence {
        k += 1;
    }
    Ok(k)
}

/// Edges are searched as the nodes of the line graph, so the edge count is
/// limited the way the order is for node invariants.
fn line_graph<G: GraphView + ?Sized>(graph: &G) -> Result<Graph<(G::Node, G::Node)>> {
    Ok(IndexedGraph::from_view(graph)?.line_graph())
}

/// A largest set of pairwise disjoint edges, as endpoint pairs in node order
pub fn max_matching<G: GraphView + ?Sized>(graph: &G) -> Result<Vec<(G::Node, G::Node)>> {
    let line = line_graph(graph)?;
    let result = default_solver().witness(&line, Invariant::Independence, Params::new())?;
    Ok(result.witness)
}

pub fn matching_number<G: GraphView + ?Sized>(graph: &G) -> Result<usize> {
    Ok(max_matching(graph)?.len())
}

/// A smallest matching that no edge can extend.
///
/// Maximal matchings are the independent dominating sets of the line graph.
pub fn min_maximal_matching<G: GraphView + ?Sized>(graph: &G) -> Result<Vec<(G::Node, G::Node)>> {
    let line = line_graph(graph)?;
    let result = default_solver().witness(&line, Invariant::IndependentDomination, Params::new())?;
    Ok(result.witness)
}

pub fn min_maximal_matching_number<G: GraphView + ?Sized>(graph: &G) -> Result<usize> {
    Ok(min_maximal_matching(graph)?.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvariantError;
    use crate::graph::{
        complete_graph, cycle_graph, empty_graph, path_graph, petersen_graph, star_graph, Graph,
    };

    #[test]
    fn test_labelled_graph() {
        let graph = Graph::from_edges([("a", "b"), ("b", "c"), ("c", "d")]);
        assert_eq!(zero_forcing_number(&graph).unwrap(), 1);
        assert_eq!(min_zero_forcing_set(&graph).unwrap(), vec!["a"]);
        assert_eq!(max_independent_set(&graph).unwrap(), vec!["a", "c"]);
        assert!(is_dominating_set(&graph, &["b", "c"]).unwrap());
        // unknown labels are ignored
        assert!(is_dominating_set(&graph, &["b", "c", "z"]).unwrap());
        assert!(!is_dominating_set(&graph, &["z"]).unwrap());
    }

    #[test]
    fn test_independence_family() {
        let cycle = cycle_graph(5);
        assert_eq!(independence_number(&cycle).unwrap(), 2);
        assert_eq!(max_independent_set(&cycle).unwrap(), vec![0, 2]);
        assert_eq!(k_independence_number(&cycle, 2).unwrap(), 3);
        assert!(is_k_independent_set(&cycle, &[0, 1, 3], 2).unwrap());
        assert!(!is_independent_set(&cycle, &[0, 1]).unwrap());
        assert_eq!(independence_number(&petersen_graph()).unwrap(), 4);
    }

    #[test]
    fn test_clique_and_vertex_cover() {
        assert_eq!(clique_number(&complete_graph(5)).unwrap(), 5);
        assert_eq!(clique_number(&petersen_graph()).unwrap(), 2);
        assert_eq!(max_clique(&empty_graph(3)).unwrap().len(), 1);
        assert!(is_clique(&complete_graph(4), &[0, 2, 3]).unwrap());

        assert_eq!(vertex_cover_number(&star_graph(4)).unwrap(), 1);
        assert_eq!(min_vertex_cover(&path_graph(4)).unwrap().len(), 2);
        assert!(is_vertex_cover(&cycle_graph(4), &[1, 3]).unwrap());
    }

    #[test]
    fn test_domination_family() {
        let star = star_graph(4);
        assert_eq!(domination_number(&star).unwrap(), 1);
        assert_eq!(min_dominating_set(&star).unwrap(), vec![0]);
        assert_eq!(k_domination_number(&star, 2).unwrap(), 4);
        assert!(is_k_dominating_set(&star, &[1, 2, 3, 4], 2).unwrap());

        assert_eq!(connected_domination_number(&star_graph(3)).unwrap(), 1);
        assert_eq!(connected_domination_number(&path_graph(5)).unwrap(), 3);
        assert!(!is_connected_k_dominating_set(&cycle_graph(4), &[0, 2], 2).unwrap());

        assert_eq!(total_domination_number(&cycle_graph(6)).unwrap(), 4);
        assert!(is_total_dominating_set(&star_graph(3), &[0, 1]).unwrap());

        assert!(is_independent_dominating_set(&star_graph(3), &[1, 2, 3]).unwrap());
        assert!(!is_independent_dominating_set(&star_graph(3), &[0, 1]).unwrap());
    }

    #[test]
    fn test_forcing_family() {
        assert_eq!(zero_forcing_number(&petersen_graph()).unwrap(), 5);
        assert_eq!(k_forcing_number(&petersen_graph(), 2).unwrap(), 2);
        assert_eq!(total_zero_forcing_number(&path_graph(5)).unwrap(), 2);
        assert!(is_total_zero_forcing_set(&path_graph(6), &[2, 3]).unwrap());
        assert!(!is_total_zero_forcing_set(&path_graph(3), &[0]).unwrap());
        assert!(is_connected_zero_forcing_set(&path_graph(2), &[0]).unwrap());

        for leaves in 3..8 {
            let star = star_graph(leaves);
            let k = leaves as i64 - 1;
            assert!(is_k_forcing_set(&star, &[1], k).unwrap());
            assert_eq!(zero_forcing_number(&star).unwrap(), leaves - 1);
        }
    }

    #[test]
    fn test_power_domination() {
        for n in 1..8 {
            assert_eq!(power_domination_number(&complete_graph(n)).unwrap(), 1);
        }
        assert!(is_power_dominating_set(&star_graph(6), &[0]).unwrap());
        assert!(!is_power_dominating_set(&star_graph(6), &[1]).unwrap());
        assert_eq!(k_power_domination_number(&star_graph(6), 6).unwrap(), 1);
    }

    #[test]
    fn test_undefined_and_invalid_inputs() {
        assert_eq!(total_zero_forcing_number(&path_graph(2)).unwrap(), 2);
        let single = crate::graph::trivial_graph();
        assert!(matches!(
            total_zero_forcing_number(&single),
            Err(InvariantError::DomainUndefined { .. })
        ));
        assert!(matches!(
            connected_zero_forcing_number(&empty_graph(5)),
            Err(InvariantError::DomainUndefined { .. })
        ));
        assert!(matches!(
            k_forcing_number(&star_graph(2), 0),
            Err(InvariantError::Parameter { .. })
        ));
        assert!(matches!(
            is_connected_k_dominating_set(&star_graph(2), &[0], 0),
            Err(InvariantError::Parameter { .. })
        ));

        let mut directed = Graph::new_directed();
        directed.add_edge(0, 1);
        assert!(matches!(
            independence_number(&directed),
            Err(InvariantError::UnsupportedGraphType(_))
        ));
    }

    #[test]
    fn test_residues() {
        for n in 1..=10 {
            assert_eq!(residue(&complete_graph(n)).unwrap(), 1);
        }
        for n in 3..=12 {
            assert_eq!(residue(&cycle_graph(n)).unwrap(), n.div_ceil(3));
        }
        for n in 3..=12 {
            assert_eq!(k_residue(&complete_graph(n), 2).unwrap(), 1.5);
        }
        assert!(matches!(
            k_residue(&cycle_graph(4), 0),
            Err(InvariantError::Parameter { .. })
        ));

        assert_eq!(k_residual_index(&petersen_graph()).unwrap(), 2);
        assert_eq!(k_residual_index(&crate::graph::trivial_graph()).unwrap(), 1);
        assert_eq!(k_residual_index(&empty_graph(4)).unwrap(), 1);
    }

    #[test]
    fn test_matchings() {
        for n in 1..=10 {
            assert_eq!(matching_number(&empty_graph(n)).unwrap(), 0);
            assert!(min_maximal_matching(&empty_graph(n)).unwrap().is_empty());
        }
        for n in 2..=11 {
            assert_eq!(matching_number(&path_graph(n)).unwrap(), (n - 1).div_ceil(2));
        }
        for leaves in 1..=10 {
            assert_eq!(matching_number(&star_graph(leaves)).unwrap(), 1);
            assert_eq!(min_maximal_matching_number(&star_graph(leaves)).unwrap(), 1);
        }
        for n in 2..=4 {
            assert_eq!(min_maximal_matching_number(&path_graph(n)).unwrap(), 1);
        }

        assert_eq!(min_maximal_matching(&path_graph(4)).unwrap(), vec![(1, 2)]);
        assert_eq!(max_matching(&path_graph(4)).unwrap(), vec![(0, 1), (2, 3)]);
        // P6 needs two edges: one middle edge leaves an end edge free
        assert_eq!(min_maximal_matching_number(&path_graph(6)).unwrap(), 2);

        let graph = Graph::from_edges([("a", "b"), ("b", "c")]);
        assert_eq!(max_matching(&graph).unwrap(), vec![("a", "b")]);
    }

    #[test]
    fn test_forcing_helpers() {
        let path = path_graph(4);
        let closure = forcing_closure(&path, &[0], 1).unwrap();
        assert!(closure.forces_all);
        assert_eq!(closure.final_black, vec![0, 1, 2, 3]);
        assert_eq!(closure.passes, 3);

        let star = star_graph(3);
        let stuck = forcing_closure(&star, &[1], 1).unwrap();
        assert!(!stuck.forces_all);
        assert_eq!(stuck.final_black, vec![0, 1]);

        assert!(is_zero_forcing_vertex(&path, &0, &[0]).unwrap());
        assert!(!is_zero_forcing_vertex(&star, &0, &[0]).unwrap());
        assert!(is_k_forcing_vertex(&star, &0, &[0], 3).unwrap());
        assert!(!is_zero_forcing_vertex(&path, &9, &[0]).unwrap());
        assert!(is_zero_forcing_active_set(&star, &[0, 1, 2]).unwrap());
        assert!(!is_zero_forcing_active_set(&star, &[0]).unwrap());
        assert!(forcing_closure(&path, &[0], -1).is_err());
    }

    #[test]
    fn test_degree_helpers() {
        let star = star_graph(4);
        assert_eq!(degree_sequence(&star).unwrap(), vec![4, 1, 1, 1, 1]);
        assert_eq!(residue(&star).unwrap(), 4);
        assert_eq!(annihilation_number(&star).unwrap(), 4);
        assert!(havel_hakimi(&petersen_graph()).unwrap().is_graphic());
        assert_eq!(sub_k_domination_number(&cycle_graph(8), 2).unwrap(), 4);
        assert!(sub_k_domination_number(&star, 0).is_err());
        assert_eq!(sub_total_domination_number(&star).unwrap(), Some(2));
        assert!(slater(&star).unwrap() >= 1);
    }
}
