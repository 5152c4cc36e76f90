//! Output formatting for the command-line front end

pub mod display;

pub use display::{Color, ColorOutput, ResultFormatter};
