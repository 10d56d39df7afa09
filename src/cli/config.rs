//! TOML configuration file support for unattended runs.
//!
//! Instead of passing CLI flags, a submission pipeline can carry its
//! settings in a config file:
//!
//! ```toml
//! # rdepack.toml
//! [structuring]
//! mode = "rdeformat"
//! schema_path = "tasksupport/invoice.schema.json"
//! ```

use anyhow::{Context, Result};
use rdepack::modes::InputMode;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration structure for rdepack.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Structuring-specific settings.
    #[serde(default)]
    pub structuring: StructuringConfig,
}

/// Configuration for the structure command.
#[derive(Debug, Default, Deserialize)]
pub struct StructuringConfig {
    /// Explicit input mode ("rdeformat" or "multifile").
    pub mode: Option<String>,

    /// Invoice schema path handed to downstream processors.
    pub schema_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Resolve the configured mode flag, if any.
    pub fn mode(&self) -> Result<Option<InputMode>> {
        match self.structuring.mode.as_deref() {
            None => Ok(None),
            Some("rdeformat") => Ok(Some(InputMode::RdeFormat)),
            Some("multifile") => Ok(Some(InputMode::MultiFile)),
            Some(other) => anyhow::bail!("Unknown input mode in config: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [structuring]
            mode = "rdeformat"
            schema_path = "tasksupport/invoice.schema.json"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.mode().unwrap(), Some(InputMode::RdeFormat));
        assert_eq!(
            config.structuring.schema_path,
            Some(PathBuf::from("tasksupport/invoice.schema.json"))
        );
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [structuring]
            mode = "multifile"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.mode().unwrap(), Some(InputMode::MultiFile));
        assert_eq!(config.structuring.schema_path, None);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.mode().unwrap(), None);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let config = Config::from_str("[structuring]\nmode = \"excel\"").unwrap();
        assert!(config.mode().is_err());
    }
}
