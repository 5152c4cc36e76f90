//! SAT solver integration using CaDiCaL

use super::constraints::Clause;
use crate::error::{InvariantError, Result};
use cadical::Solver;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// SAT solver wrapper for CaDiCaL
pub struct SatSolver {
    solver: Solver,
    variable_count: usize,
    clause_count: usize,
}

/// Result of SAT solving
#[derive(Debug, Clone)]
pub struct SolverSolution {
    pub assignment: HashMap<i32, bool>,
    pub solve_time: Duration,
}

impl SolverSolution {
    /// Value of `variable`; unassigned variables read as false
    pub fn value(&self, variable: i32) -> bool {
        self.assignment.get(&variable).copied().unwrap_or(false)
    }
}

impl Default for SatSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SatSolver {
    pub fn new() -> Self {
        Self {
            solver: Solver::new(),
            variable_count: 0,
            clause_count: 0,
        }
    }

    pub fn add_clauses(&mut self, clauses: &[Clause]) -> Result<()> {
        for clause in clauses {
            self.add_clause(clause)?;
        }
        Ok(())
    }

    pub fn add_clause(&mut self, clause: &Clause) -> Result<()> {
        if clause.is_empty() {
            return Err(InvariantError::Backend(
                "cannot add an empty clause".to_string(),
            ));
        }

        for &literal in &clause.literals {
            let var = literal.unsigned_abs() as usize;
            if var > self.variable_count {
                self.variable_count = var;
            }
        }

        self.solver.add_clause(clause.literals.iter().copied());
        self.clause_count += 1;
        Ok(())
    }

    /// Solve the formula; `None` when it is unsatisfiable
    pub fn solve(&mut self) -> Result<Option<SolverSolution>> {
        self.solve_with_assumptions(&[])
    }

    /// Solve under `assumptions`, which only hold for this call.
    ///
    /// Learned clauses survive, so a sequence of calls over the same formula
    /// reuses earlier work.
    pub fn solve_with_assumptions(&mut self, assumptions: &[i32]) -> Result<Option<SolverSolution>> {
        let start_time = Instant::now();
        let result = self.solver.solve_with(assumptions.iter().copied());
        let solve_time = start_time.elapsed();

        match result {
            Some(true) => Ok(Some(SolverSolution {
                assignment: self.extract_assignment(),
                solve_time,
            })),
            Some(false) => Ok(None),
            None => Err(InvariantError::Backend(
                "CaDiCaL stopped without a verdict".to_string(),
            )),
        }
    }

    fn extract_assignment(&self) -> HashMap<i32, bool> {
        let mut assignment = HashMap::new();

        for var in 1..=self.variable_count as i32 {
            if let Some(value) = self.solver.value(var) {
                assignment.insert(var, value);
            }
        }

        assignment
    }

    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    pub fn clause_count(&self) -> usize {
        self.clause_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solver_creation() {
        let solver = SatSolver::new();
        assert_eq!(solver.variable_count(), 0);
        assert_eq!(solver.clause_count(), 0);
    }

    #[test]
    fn test_simple_satisfiable() {
        let mut solver = SatSolver::new();

        // x1 ∨ x2 and ¬x1 ∨ x2
        solver.add_clause(&Clause::new(vec![1, 2])).unwrap();
        solver.add_clause(&Clause::new(vec![-1, 2])).unwrap();

        let solution = solver.solve().unwrap().unwrap();
        assert!(solution.value(2));
    }

    #[test]
    fn test_unsatisfiable() {
        let mut solver = SatSolver::new();
        solver.add_clause(&Clause::unit(1)).unwrap();
        solver.add_clause(&Clause::unit(-1)).unwrap();

        assert!(solver.solve().unwrap().is_none());
    }

    #[test]
    fn test_assumptions_do_not_persist() {
        let mut solver = SatSolver::new();
        solver.add_clause(&Clause::new(vec![1, 2])).unwrap();

        assert!(solver.solve_with_assumptions(&[-1, -2]).unwrap().is_none());
        let solution = solver.solve_with_assumptions(&[-1]).unwrap().unwrap();
        assert!(solution.value(2));
        assert!(solver.solve().unwrap().is_some());
    }

    #[test]
    fn test_empty_clause_error() {
        let mut solver = SatSolver::new();
        let error = solver.add_clause(&Clause::new(vec![])).unwrap_err();
        assert!(error.is_internal());
    }

    #[test]
    fn test_variable_count_tracking() {
        let mut solver = SatSolver::new();

        solver.add_clause(&Clause::new(vec![1, -5, 3])).unwrap();
        assert_eq!(solver.variable_count(), 5);

        solver.add_clause(&Clause::new(vec![2, -7])).unwrap();
        assert_eq!(solver.variable_count(), 7);
        assert_eq!(solver.clause_count(), 2);
    }
}
