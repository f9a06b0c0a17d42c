//! Configuration management for Smolar CLI

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use smolar_array::ArrayConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Construction settings for arrays built by commands
    pub array: ArrayConfig,

    /// Element printing
    pub display: DisplayConfig,

    /// Benchmark configuration
    pub bench: BenchConfig,
}

/// Element printing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Decimal places per element
    pub precision: usize,
}

/// Benchmark configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Number of timed iterations
    pub iterations: u32,

    /// Untimed iterations before measuring
    pub warmup_iterations: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { precision: 3 }
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            iterations: 5,
            warmup_iterations: 1,
        }
    }
}

impl Config {
    /// Load configuration from an explicit file, else the default location,
    /// else built-in defaults. The default location is never created.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file not found: {}", path.display());
                }
                path.to_path_buf()
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => path,
                _ => {
                    debug!("No config file found, using defaults");
                    return Ok(Config::default());
                }
            },
        };

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let content = self.to_toml()?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Serialize as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Get default configuration file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("smolar").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smolar_array::Order;

    #[test]
    fn test_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [array]
            order = "f"
            seed = 11

            [display]
            precision = 1
            "#,
        )
        .unwrap();
        assert_eq!(config.array.order, Order::F);
        assert_eq!(config.array.seed, Some(11));
        assert_eq!(config.display.precision, 1);
        assert_eq!(config.bench, BenchConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.bench.iterations = 9;
        config.save(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
