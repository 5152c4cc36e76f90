//! Exact graph invariants with witness sets
//!
//! Computes NP-hard invariants (independence, domination, zero forcing and
//! their variants) by bounded exhaustive search over node subsets, with an
//! optional SAT backend. Every value comes with a witness set realizing it.

pub mod config;
pub mod error;
pub mod forcing;
pub mod graph;
pub mod invariants;
pub mod sat;
pub mod search;
pub mod utils;

pub use config::Settings;
pub use error::{InvariantError, Result};
pub use graph::{Graph, GraphView};
pub use invariants::api::*;
pub use invariants::{Invariant, InvariantResult, InvariantSolver, Params};
