//! Invariant registry, solver and the per-invariant function surface

pub mod api;
pub mod registry;
pub mod solver;

pub use registry::{Invariant, InvariantSpec, Params};
pub use solver::{InvariantResult, InvariantSolver, ResultSummary};
