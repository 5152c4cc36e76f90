//! Size-walking optimizer on top of CaDiCaL

use super::{CardinalityCounter, ConstraintGenerator, SatSolver};
use crate::error::{InvariantError, Result};
use crate::graph::{IndexedGraph, NodeSet};
use crate::search::{Bound, Direction, SearchOutcome, SearchStats, ValidityOracle};
use log::debug;
use std::time::Instant;

/// Finds an extremal valid subset by asking CaDiCaL for a valid subset of
/// each exact size, walking sizes in the same order as
/// [`SubsetSearch`](crate::search::SubsetSearch).
///
/// The property clauses and a unary counter over the nodes are loaded into
/// one solver; each size is a pair of assumptions on the counter. Every
/// model is decoded and re-checked against the oracle.
pub struct SatEncoder<'g, N> {
    graph: &'g IndexedGraph<N>,
    oracle: ValidityOracle,
}

impl<'g, N> SatEncoder<'g, N> {
    pub fn new(graph: &'g IndexedGraph<N>, oracle: ValidityOracle) -> Self {
        Self { graph, oracle }
    }

    pub fn supports(&self) -> bool {
        ConstraintGenerator::<N>::supports(&self.oracle)
    }

    /// Optimize, or `Ok(None)` when the oracle has no encoding
    pub fn solve(&self, direction: Direction, bound: Bound) -> Result<Option<SearchOutcome>> {
        let start_time = Instant::now();
        let mut generator = ConstraintGenerator::new(self.graph);
        let Some(mut clauses) = generator.property_constraints(&self.oracle)? else {
            return Ok(None);
        };
        let property_clauses = clauses.len();
        let (counting, counter) = generator.cardinality_counter()?;
        clauses.extend(counting);

        let mut solver = SatSolver::new();
        solver.add_clauses(&clauses)?;
        let variables = generator.variable_statistics();
        debug!(
            "{} property and {} counting clauses over {} variables ({} counter registers)",
            property_clauses,
            solver.clause_count() - property_clauses,
            variables.total_variables,
            variables.counter_variables
        );

        let n = self.graph.order();
        let mut stats = SearchStats::default();
        let sizes: Box<dyn Iterator<Item = usize>> = match direction {
            Direction::Minimize => Box::new(bound.lower..=n),
            Direction::Maximize => Box::new((0..=bound.upper.min(n)).rev()),
        };

        let mut witness = None;
        for size in sizes {
            stats.sizes_visited += 1;
            stats.candidates_tested += 1;

            if let Some(found) = self.solve_size(&mut solver, &counter, size)? {
                witness = Some(found);
                break;
            }
        }

        stats.elapsed = start_time.elapsed();
        Ok(Some(SearchOutcome { witness, stats }))
    }

    /// A valid subset of exactly `size` nodes, if one exists
    fn solve_size(
        &self,
        solver: &mut SatSolver,
        counter: &CardinalityCounter,
        size: usize,
    ) -> Result<Option<NodeSet>> {
        let Some(solution) = solver.solve_with_assumptions(&counter.exactly(size)?)? else {
            debug!("Size {}: unsatisfiable", size);
            return Ok(None);
        };
        debug!("Size {}: model found in {:?}", size, solution.solve_time);

        let chosen: NodeSet = (0..self.graph.order())
            .filter(|&node| solution.value(node as i32 + 1))
            .collect();

        if chosen.len() != size || !self.oracle.is_valid(self.graph, chosen) {
            return Err(InvariantError::Backend(format!(
                "model {:?} of size {} is not a valid subset of size {} under {:?}",
                chosen,
                chosen.len(),
                size,
                self.oracle
            )));
        }
        Ok(Some(chosen))
    }
}
