//! SAT backend for the invariants that have a CNF encoding

pub mod constraints;
pub mod encoder;
pub mod solver;
pub mod variables;

pub use constraints::{CardinalityCounter, Clause, ConstraintGenerator};
pub use encoder::SatEncoder;
pub use solver::{SatSolver, SolverSolution};
pub use variables::{VariableManager, VariableStatistics, VariableType};
