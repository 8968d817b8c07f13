//! Configuration management for shipbill
//!
//! Config stored at: ~/.config/shipbill/config.json

use serde::{Deserialize, Serialize};
use shipbill_types::{ConfigError, OutputFormat, Result};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Rate snapshot exported from the backend (JSON or TOML)
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,

    /// Extra rate-table CSV files merged into the snapshot
    #[serde(default)]
    pub rate_cell_csvs: Vec<PathBuf>,

    /// Currency quotes are expressed in unless overridden
    #[serde(default = "default_currency")]
    pub default_currency: String,

    /// Volumetric divisor used when the snapshot has none for a carrier/supplier
    #[serde(default)]
    pub default_divisor: Option<f64>,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            rate_cell_csvs: Vec::new(),
            default_currency: default_currency(),
            default_divisor: None,
            output_format: default_output_format(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("shipbill");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default
    ///
    /// Platforms without a config directory get the defaults.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Ok(path) => Self::load_from(&path),
            Err(_) => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::SaveError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Shipbill Configuration")?;
        writeln!(f, "======================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Snapshot:         {}",
            self.snapshot_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(not set)".to_string())
        )?;
        if !self.rate_cell_csvs.is_empty() {
            writeln!(f, "Rate cell CSVs:")?;
            for path in &self.rate_cell_csvs {
                writeln!(f, "  - {}", path.display())?;
            }
        }
        writeln!(f, "Default currency: {}", self.default_currency)?;
        writeln!(
            f,
            "Default divisor:  {}",
            self.default_divisor
                .map(|d| d.to_string())
                .unwrap_or_else(|| "(none)".to_string())
        )?;
        writeln!(f, "Output format:    {}", self.output_format)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:      {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_currency, "USD");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            snapshot_path: Some(PathBuf::from("/data/rates.json")),
            default_divisor: Some(6000.0),
            default_currency: "VND".to_string(),
            output_format: OutputFormat::Json,
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"default_divisor": 5000}"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.default_divisor, Some(5000.0));
        assert_eq!(config.output_format, OutputFormat::Table);
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(
            err,
            shipbill_types::Error::Config(ConfigError::ParseError(_))
        ));
    }
}
