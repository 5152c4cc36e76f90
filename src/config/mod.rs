//! Configuration management for invariant computations

pub mod settings;

pub use settings::{Backend, CliOverrides, OutputConfig, OutputFormat, SearchConfig, Settings};
