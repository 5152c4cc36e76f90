//! Zero forcing and k-forcing propagation

pub mod rules;
pub mod simulator;

pub use rules::ForcingRules;
pub use simulator::{ForcingOutcome, PropagationSimulator};
