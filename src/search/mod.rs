//! Exact combinatorial search: oracles, bounds and the subset enumerator

pub mod bounds;
pub mod combinations;
pub mod oracle;
pub mod subset;

pub use bounds::{Bound, BoundEstimator};
pub use combinations::{binomial, Combinations};
pub use oracle::{Refinement, ValidityOracle};
pub use subset::{search, Direction, SearchOutcome, SearchStats, SubsetSearch};
