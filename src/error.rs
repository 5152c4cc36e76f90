//! Error taxonomy for invariant computations

use crate::invariants::Invariant;
use thiserror::Error;

/// Errors raised at the invariant solver boundary.
///
/// Input problems (`UnsupportedGraphType`, `GraphTooLarge`, `Parameter`,
/// `DomainUndefined`, `UnknownInvariant`) are kept apart from internal
/// consistency failures (`SearchExhausted`, `Backend`) so callers can tell
/// "your input is invalid" from "the library has a bug".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("unsupported graph type: {0}")]
    UnsupportedGraphType(String),

    #[error("graph has {order} nodes, exact search supports at most {limit}")]
    GraphTooLarge { order: usize, limit: usize },

    #[error("invalid parameter `{name}` = {value}: {reason}")]
    Parameter {
        name: &'static str,
        value: i64,
        reason: String,
    },

    #[error("search for {invariant} exhausted every admissible size without a valid subset")]
    SearchExhausted { invariant: Invariant },

    #[error("{invariant} is undefined for this graph: {reason}")]
    DomainUndefined { invariant: Invariant, reason: String },

    #[error("unknown invariant `{0}`")]
    UnknownInvariant(String),

    #[error("solver backend failure: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, InvariantError>;

impl InvariantError {
    /// True for errors that point at a defect in the library rather than the input.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::SearchExhausted { .. } | Self::Backend(_))
    }
}
