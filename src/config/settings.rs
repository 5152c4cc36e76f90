//! Configuration settings for invariant computations

use crate::graph::MAX_ORDER;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub search: SearchConfig,
    pub output: OutputConfig,
}

/// How an [`InvariantSolver`](crate::invariants::InvariantSolver) searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub backend: Backend,
    /// When false every search starts from the trivial bound
    pub use_bounds: bool,
    pub max_order: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    BruteForce,
    Sat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub show_stats: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            backend: Backend::BruteForce,
            use_bounds: true,
            max_order: 24,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            show_stats: false,
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::BruteForce => write!(f, "brute_force"),
            Backend::Sat => write!(f, "sat"),
        }
    }
}

impl std::str::FromStr for Backend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "brute_force" | "brute-force" => Ok(Backend::BruteForce),
            "sat" | "cadical" => Ok(Backend::Sat),
            other => anyhow::bail!("Unknown backend: {}", other),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => anyhow::bail!("Unknown output format: {}", other),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.search.max_order == 0 {
            anyhow::bail!("Maximum graph order must be positive");
        }

        if self.search.max_order > MAX_ORDER {
            anyhow::bail!(
                "Maximum graph order {} exceeds the supported limit of {}",
                self.search.max_order,
                MAX_ORDER
            );
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(backend) = cli_overrides.backend {
            self.search.backend = backend;
        }
        if cli_overrides.no_bounds {
            self.search.use_bounds = false;
        }
        if let Some(max_order) = cli_overrides.max_order {
            self.search.max_order = max_order;
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if cli_overrides.show_stats {
            self.output.show_stats = true;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub backend: Option<Backend>,
    pub no_bounds: bool,
    pub max_order: Option<usize>,
    pub format: Option<OutputFormat>,
    pub show_stats: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.search.backend, Backend::BruteForce);
        assert!(settings.search.use_bounds);
    }

    #[test]
    fn test_roundtrip_through_yaml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config").join("default.yaml");

        let mut settings = Settings::default();
        settings.search.backend = Backend::Sat;
        settings.output.format = OutputFormat::Json;
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_yaml_uses_snake_case_names() {
        let yaml = "search:\n  backend: brute_force\n  use_bounds: false\n  max_order: 12\noutput:\n  format: json\n  show_stats: true\n";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.search.max_order, 12);
        assert!(!settings.search.use_bounds);
        assert_eq!(settings.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_validation_rejects_oversized_order() {
        let mut settings = Settings::default();
        settings.search.max_order = MAX_ORDER + 1;
        assert!(settings.validate().is_err());

        settings.search.max_order = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = Settings::default();
        let overrides = CliOverrides {
            backend: Some(Backend::Sat),
            no_bounds: true,
            max_order: Some(30),
            format: None,
            show_stats: true,
        };
        settings.merge_with_cli(&overrides);

        assert_eq!(settings.search.backend, Backend::Sat);
        assert!(!settings.search.use_bounds);
        assert_eq!(settings.search.max_order, 30);
        assert_eq!(settings.output.format, OutputFormat::Text);
        assert!(settings.output.show_stats);
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!("sat".parse::<Backend>().unwrap(), Backend::Sat);
        assert_eq!("brute-force".parse::<Backend>().unwrap(), Backend::BruteForce);
        assert!("ilp".parse::<Backend>().is_err());
    }
}
