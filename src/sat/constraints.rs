//! CNF constraints for subset properties and cardinality

use super::{VariableManager, VariableStatistics};
use crate::error::{InvariantError, Result};
use crate::graph::IndexedGraph;
use crate::search::{Refinement, ValidityOracle};
use itertools::Itertools;

/// Represents a SAT clause (disjunction of literals)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub literals: Vec<i32>, // Positive for variable, negative for negation
}

impl Clause {
    pub fn new(literals: Vec<i32>) -> Self {
        Self { literals }
    }

    pub fn unit(literal: i32) -> Self {
        Self {
            literals: vec![literal],
        }
    }

    pub fn binary(lit1: i32, lit2: i32) -> Self {
        Self {
            literals: vec![lit1, lit2],
        }
    }

    /// Check if clause is empty (unsatisfiable)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }
}

/// Generates the clauses of one subset problem over a graph.
///
/// Node `i` of the graph is SAT variable `i + 1`; counters allocate fresh
/// variables above the node block.
pub struct ConstraintGenerator<'g, N> {
    graph: &'g IndexedGraph<N>,
    variable_manager: VariableManager,
}

impl<'g, N> ConstraintGenerator<'g, N> {
    pub fn new(graph: &'g IndexedGraph<N>) -> Self {
        Self {
            graph,
            variable_manager: VariableManager::new(graph.order()),
        }
    }

    /// Whether `oracle` has a CNF encoding
    pub fn supports(oracle: &ValidityOracle) -> bool {
        match oracle {
            ValidityOracle::Independence { k } => *k == 1,
            ValidityOracle::Clique | ValidityOracle::VertexCover => true,
            ValidityOracle::Domination { refinement, .. } => {
                *refinement != Refinement::Connected
            }
            ValidityOracle::Forcing { .. } | ValidityOracle::PowerDomination { .. } => false,
        }
    }

    /// Clauses satisfied exactly by the node assignments valid under `oracle`,
    /// or `None` when the oracle has no encoding
    pub fn property_constraints(&mut self, oracle: &ValidityOracle) -> Result<Option<Vec<Clause>>> {
        if !Self::supports(oracle) {
            return Ok(None);
        }

        let clauses = match *oracle {
            ValidityOracle::Independence { .. } => self.generate_edge_constraints(|u, v| {
                Clause::binary(-u, -v)
            })?,
            ValidityOracle::Clique => self.generate_non_edge_constraints()?,
            ValidityOracle::VertexCover => {
                self.generate_edge_constraints(|u, v| Clause::binary(u, v))?
            }
            ValidityOracle::Domination { k, refinement } => {
                let mut clauses = self.generate_domination_constraints(k)?;
                match refinement {
                    Refinement::Total => clauses.extend(self.generate_total_constraints()?),
                    Refinement::Independent => {
                        clauses.extend(self.generate_edge_constraints(|u, v| Clause::binary(-u, -v))?)
                    }
                    _ => {}
                }
                clauses
            }
            _ => return Ok(None),
        };

        Ok(Some(clauses))
    }

    /// One clause per edge `{u, v}` with `u < v`
    fn generate_edge_constraints<F>(&mut self, clause: F) -> Result<Vec<Clause>>
    where
        F: Fn(i32, i32) -> Clause,
    {
        let mut clauses = Vec::new();
        for u in 0..self.graph.order() {
            for v in self.graph.neighbors(u).iter().filter(|&v| v > u) {
                let x_u = self.variable_manager.node_variable(u)?;
                let x_v = self.variable_manager.node_variable(v)?;
                clauses.push(clause(x_u, x_v));
            }
        }
        Ok(clauses)
    }

    /// Non-adjacent pairs cannot both be chosen
    fn generate_non_edge_constraints(&mut self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();
        for (u, v) in (0..self.graph.order()).tuple_combinations() {
            if !self.graph.are_adjacent(u, v) {
                let x_u = self.variable_manager.node_variable(u)?;
                let x_v = self.variable_manager.node_variable(v)?;
                clauses.push(Clause::binary(-x_u, -x_v));
            }
        }
        Ok(clauses)
    }

    /// Each node is chosen or has at least `k` chosen neighbors.
    ///
    /// At least `k` of `d` neighbors are chosen iff at most `d - k` of them
    /// are not, counted by a sequential counter that only binds while the
    /// node itself is unchosen.
    fn generate_domination_constraints(&mut self, k: usize) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();
        for v in 0..self.graph.order() {
            let x_v = self.variable_manager.node_variable(v)?;
            let neighbors = self.neighbor_variables(v)?;

            if neighbors.len() < k {
                clauses.push(Clause::unit(x_v));
                continue;
            }
            let unchosen: Vec<i32> = neighbors.iter().map(|&literal| -literal).collect();
            clauses.extend(self.guarded_at_most(&unchosen, neighbors.len() - k, Some(x_v))?);
        }
        Ok(clauses)
    }

    /// Each chosen node has a chosen neighbor
    fn generate_total_constraints(&mut self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();
        for v in 0..self.graph.order() {
            let x_v = self.variable_manager.node_variable(v)?;
            let mut literals = vec![-x_v];
            literals.extend(self.neighbor_variables(v)?);
            clauses.push(Clause::new(literals));
        }
        Ok(clauses)
    }

    fn neighbor_variables(&mut self, node: usize) -> Result<Vec<i32>> {
        self.graph
            .neighbors(node)
            .iter()
            .map(|u| self.variable_manager.node_variable(u))
            .collect()
    }

    /// Unary counter over the node variables, shared by every size of a
    /// search.
    ///
    /// Register `(i, j)` holds iff at least `j` of the first `i + 1` nodes
    /// are chosen, so the last column counts the whole subset.
    pub fn cardinality_counter(&mut self) -> Result<(Vec<Clause>, CardinalityCounter)> {
        let literals = self.variable_manager.node_variables()?;
        let n = literals.len();
        let counter = self.variable_manager.new_counter();
        let mut register = |item: usize, count: usize| {
            self.variable_manager.counter_variable(counter, item, count)
        };
        let mut clauses = Vec::new();

        for (item, &x) in literals.iter().enumerate() {
            for count in 1..=item + 1 {
                let current = register(item, count)?;
                let carried = if count <= item {
                    Some(register(item - 1, count)?)
                } else {
                    None
                };
                // `None` reads as true: zero of the earlier nodes always holds
                let short = if count >= 2 {
                    Some(register(item - 1, count - 1)?)
                } else {
                    None
                };

                if let Some(carried) = carried {
                    clauses.push(Clause::binary(-carried, current));
                }
                clauses.push(Clause::new(
                    std::iter::once(-x)
                        .chain(short.map(|short| -short))
                        .chain(std::iter::once(current))
                        .collect(),
                ));
                clauses.push(Clause::new(
                    std::iter::once(-current)
                        .chain(carried)
                        .chain(std::iter::once(x))
                        .collect(),
                ));
                if let Some(short) = short {
                    clauses.push(Clause::new(
                        std::iter::once(-current)
                            .chain(carried)
                            .chain(std::iter::once(short))
                            .collect(),
                    ));
                }
            }
        }

        let registers = (1..=n)
            .map(|count| register(n - 1, count))
            .collect::<Result<Vec<_>>>()?;
        Ok((clauses, CardinalityCounter { registers }))
    }

    /// Sequential counter encoding of "at most `bound` of `literals` are true".
    ///
    /// Register `(i, j)` holds when at least `j` of the first `i + 1` literals
    /// are true.
    pub fn at_most(&mut self, literals: &[i32], bound: usize) -> Result<Vec<Clause>> {
        self.guarded_at_most(literals, bound, None)
    }

    /// [`at_most`](Self::at_most) with `guard` added to every clause, so the
    /// count only binds while `guard` is false
    fn guarded_at_most(
        &mut self,
        literals: &[i32],
        bound: usize,
        guard: Option<i32>,
    ) -> Result<Vec<Clause>> {
        let n = literals.len();
        if bound >= n {
            return Ok(Vec::new());
        }

        let mut clauses = Vec::new();
        if bound == 0 {
            clauses.extend(literals.iter().map(|&literal| Clause::unit(-literal)));
        } else {
            let counter = self.variable_manager.new_counter();
            let mut register = |item: usize, count: usize| {
                self.variable_manager.counter_variable(counter, item, count)
            };

            clauses.push(Clause::binary(-literals[0], register(0, 1)?));
            for count in 2..=bound {
                clauses.push(Clause::unit(-register(0, count)?));
            }

            for item in 1..n - 1 {
                let x = literals[item];
                clauses.push(Clause::binary(-x, register(item, 1)?));
                clauses.push(Clause::binary(-register(item - 1, 1)?, register(item, 1)?));
                for count in 2..=bound {
                    clauses.push(Clause::new(vec![
                        -x,
                        -register(item - 1, count - 1)?,
                        register(item, count)?,
                    ]));
                    clauses.push(Clause::binary(
                        -register(item - 1, count)?,
                        register(item, count)?,
                    ));
                }
                clauses.push(Clause::binary(-x, -register(item - 1, bound)?));
            }

            clauses.push(Clause::binary(-literals[n - 1], -register(n - 2, bound)?));
        }

        if let Some(guard) = guard {
            for clause in &mut clauses {
                clause.literals.insert(0, guard);
            }
        }
        Ok(clauses)
    }

    pub fn variable_count(&self) -> usize {
        self.variable_manager.variable_count()
    }

    pub fn variable_statistics(&self) -> VariableStatistics {
        self.variable_manager.statistics()
    }
}

/// Output registers of [`ConstraintGenerator::cardinality_counter`]
#[derive(Debug, Clone)]
pub struct CardinalityCounter {
    /// `registers[j - 1]` holds iff at least `j` nodes are chosen
    registers: Vec<i32>,
}

impl CardinalityCounter {
    /// Assumptions under which exactly `size` nodes are chosen
    pub fn exactly(&self, size: usize) -> Result<Vec<i32>> {
        let n = self.registers.len();
        if size > n {
            return Err(InvariantError::Backend(format!(
                "cannot choose {} of {} nodes",
                size, n
            )));
        }

        let mut assumptions = Vec::with_capacity(2);
        if size > 0 {
            assumptions.push(self.registers[size - 1]);
        }
        if size < n {
            assumptions.push(-self.registers[size]);
        }
        Ok(assumptions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{complete_graph, cycle_graph, empty_graph, star_graph};
    use crate::sat::SatSolver;

    /// Whether `clauses` have a model in which exactly `chosen` of the first
    /// `order` variables are true, under the extra `assumptions`
    fn admits(clauses: &[Clause], order: usize, chosen: &[usize], assumptions: &[i32]) -> bool {
        let mut solver = SatSolver::new();
        solver.add_clauses(clauses).unwrap();

        let mut fixed: Vec<i32> = (0..order)
            .map(|node| {
                let variable = node as i32 + 1;
                if chosen.contains(&node) {
                    variable
                } else {
                    -variable
                }
            })
            .collect();
        fixed.extend_from_slice(assumptions);
        solver.solve_with_assumptions(&fixed).unwrap().is_some()
    }

    #[test]
    fn test_clause_creation() {
        let clause = Clause::new(vec![1, -2, 3]);
        assert_eq!(clause.literals, vec![1, -2, 3]);
        assert!(!clause.is_empty());
        assert!(!clause.is_unit());

        let unit_clause = Clause::unit(5);
        assert!(unit_clause.is_unit());
        assert_eq!(unit_clause.literals, vec![5]);
    }

    #[test]
    fn test_supported_oracles() {
        type Generator<'g> = ConstraintGenerator<'g, usize>;
        assert!(Generator::supports(&ValidityOracle::Clique));
        assert!(Generator::supports(&ValidityOracle::Independence { k: 1 }));
        assert!(!Generator::supports(&ValidityOracle::Independence { k: 2 }));
        assert!(Generator::supports(&ValidityOracle::Domination {
            k: 3,
            refinement: Refinement::Independent
        }));
        assert!(!Generator::supports(&ValidityOracle::Domination {
            k: 1,
            refinement: Refinement::Connected
        }));
        assert!(!Generator::supports(&ValidityOracle::PowerDomination { k: 1 }));
    }

    #[test]
    fn test_vertex_cover_constraints() {
        let graph = IndexedGraph::from_view(&cycle_graph(4)).unwrap();
        let mut generator = ConstraintGenerator::new(&graph);
        let clauses = generator
            .property_constraints(&ValidityOracle::VertexCover)
            .unwrap()
            .unwrap();

        assert_eq!(clauses.len(), 4);
        assert!(admits(&clauses, 4, &[0, 2], &[]));
        assert!(!admits(&clauses, 4, &[0, 1], &[]));
    }

    #[test]
    fn test_clique_constraints() {
        let graph = IndexedGraph::from_view(&complete_graph(4)).unwrap();
        let mut generator = ConstraintGenerator::new(&graph);
        let clauses = generator
            .property_constraints(&ValidityOracle::Clique)
            .unwrap()
            .unwrap();
        assert!(clauses.is_empty());
    }

    #[test]
    fn test_domination_constraints_match_oracle() {
        let graph = IndexedGraph::from_view(&star_graph(3)).unwrap();
        for k in 1..=3 {
            let oracle = ValidityOracle::Domination {
                k,
                refinement: Refinement::Plain,
            };
            let mut generator = ConstraintGenerator::new(&graph);
            let clauses = generator.property_constraints(&oracle).unwrap().unwrap();

            for size in 0..=4 {
                for chosen in (0..4).combinations(size) {
                    let subset = chosen.iter().copied().collect();
                    assert_eq!(
                        admits(&clauses, 4, &chosen, &[]),
                        oracle.is_valid(&graph, subset),
                        "k = {}, subset {:?}",
                        k,
                        chosen
                    );
                }
            }
        }
    }

    #[test]
    fn test_domination_constraints_stay_small_on_dense_graphs() {
        let graph = IndexedGraph::from_view(&complete_graph(20)).unwrap();
        let mut generator = ConstraintGenerator::new(&graph);
        let clauses = generator
            .property_constraints(&ValidityOracle::Domination {
                k: 10,
                refinement: Refinement::Plain,
            })
            .unwrap()
            .unwrap();

        // one counter of 19 literals and bound 9 per node
        assert!(clauses.len() < 20 * 19 * 2 * 10, "{} clauses", clauses.len());
        let ten: Vec<usize> = (0..10).collect();
        assert!(admits(&clauses, 20, &ten, &[]));
        assert!(!admits(&clauses, 20, &ten[..9], &[]));
    }

    #[test]
    fn test_isolated_node_must_be_chosen() {
        let graph = IndexedGraph::from_view(&empty_graph(2)).unwrap();
        let mut generator = ConstraintGenerator::new(&graph);
        let clauses = generator
            .property_constraints(&ValidityOracle::Domination {
                k: 1,
                refinement: Refinement::Plain,
            })
            .unwrap()
            .unwrap();
        assert_eq!(clauses, vec![Clause::unit(1), Clause::unit(2)]);
    }

    #[test]
    fn test_cardinality_counter_fixes_size() {
        let graph = IndexedGraph::from_view(&empty_graph(3)).unwrap();
        let mut generator = ConstraintGenerator::new(&graph);
        let (clauses, counter) = generator.cardinality_counter().unwrap();

        for size in 0..=3 {
            let assumptions = counter.exactly(size).unwrap();
            for subset_size in 0..=3 {
                for chosen in (0..3).combinations(subset_size) {
                    assert_eq!(
                        admits(&clauses, 3, &chosen, &assumptions),
                        subset_size == size,
                        "size {}, subset {:?}",
                        size,
                        chosen
                    );
                }
            }
        }
        assert!(counter.exactly(4).is_err());
    }

    #[test]
    fn test_guarded_counter_binds_only_without_guard() {
        let graph = IndexedGraph::from_view(&empty_graph(4)).unwrap();
        let mut generator = ConstraintGenerator::new(&graph);
        let clauses = generator.guarded_at_most(&[1, 2, 3], 1, Some(4)).unwrap();

        assert!(clauses.iter().all(|clause| clause.literals[0] == 4));
        assert!(admits(&clauses, 4, &[0], &[]));
        assert!(!admits(&clauses, 4, &[0, 1], &[]));
        assert!(admits(&clauses, 4, &[0, 1, 2, 3], &[]));
    }

    #[test]
    fn test_counter_allocates_registers() {
        let graph = IndexedGraph::from_view(&empty_graph(5)).unwrap();
        let mut generator = ConstraintGenerator::new(&graph);
        let literals = [1, 2, 3, 4, 5];

        assert!(generator.at_most(&literals, 5).unwrap().is_empty());
        let clauses = generator.at_most(&literals, 2).unwrap();
        assert!(!clauses.is_empty());
        // registers (item, count) for items 0..4 and counts 1..=2
        assert_eq!(generator.variable_count(), 5 + 4 * 2);
        assert_eq!(generator.variable_statistics().counter_variables, 4 * 2);
    }
}
