//! Configuration management for Sift.
//!
//! This module provides configuration loading, saving, and defaults.
//! Configuration is stored in TOML format in a platform-appropriate location.

use crate::error::{Result, SiftError};
use crate::types::TextSource;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main configuration structure for Sift.
///
/// ## Example Configuration File (sift.toml)
///
/// ```toml
/// [general]
/// log_level = "info"
///
/// [query]
/// expr = "video and (emotion or affect*)"
/// fold_case = true
///
/// [filter]
/// source = "abstract"
/// extract_code_urls = true
///
/// [performance]
/// parallel = true
/// parallel_threshold = 256
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Default query settings
    pub query: QueryConfig,

    /// Document filtering settings
    pub filter: FilterConfig,

    /// Performance tuning
    pub performance: PerformanceConfig,
}

/// General configuration options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            log_level: "info".to_string(),
        }
    }
}

/// Query configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Expression used when none is given on the command line (empty = keep all)
    pub expr: String,

    /// Lowercase the expression before parsing, to line up with normalized text
    pub fold_case: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        QueryConfig {
            expr: String::new(),
            fold_case: true,
        }
    }
}

/// Filtering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Which field the query is evaluated against
    pub source: TextSource,

    /// Collect http(s) links from the abstract of kept documents
    pub extract_code_urls: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            source: TextSource::Title,
            extract_code_urls: true,
        }
    }
}

/// Performance configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Evaluate large batches on the rayon thread pool
    pub parallel: bool,

    /// Batch size above which filtering goes parallel
    pub parallel_threshold: usize,
}

impl PerformanceConfig {
    /// Whether a batch of `len` documents should be filtered in parallel.
    pub fn use_parallel(&self, len: usize) -> bool {
        self.parallel && len > self.parallel_threshold
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        PerformanceConfig {
            parallel: true,
            parallel_threshold: 256,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default config if no config file exists.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Config::default());
        }

        info!(path = %path.display(), "Loading configuration");
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents).map_err(|e| SiftError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
        })?;

        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        info!(path = %path.display(), "Saving configuration");
        let contents = toml::to_string_pretty(self).map_err(|e| SiftError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "sift").ok_or_else(|| SiftError::ConfigError {
            reason: "Could not determine config directory".to_string(),
        })?;

        Ok(dirs.config_dir().join("sift.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.query.expr.is_empty());
        assert!(config.query.fold_case);
        assert_eq!(config.filter.source, TextSource::Title);
        assert_eq!(config.performance.parallel_threshold, 256);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("test.toml");

        let mut config = Config::default();
        config.query.expr = "video and not audio".to_string();
        config.filter.source = TextSource::Abstract;

        config.save_to(&config_path).unwrap();
        let loaded = Config::load_from(&config_path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("partial.toml");
        fs::write(&config_path, "[filter]\nsource = \"abstract\"\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.filter.source, TextSource::Abstract);
        assert!(config.filter.extract_code_urls);
        assert!(config.query.fold_case);
    }

    #[test]
    fn test_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bad.toml");
        fs::write(&config_path, "[filter\nsource = 3").unwrap();

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(matches!(err, SiftError::ConfigError { .. }));
    }

    #[test]
    fn test_use_parallel() {
        let mut config = Config::default();
        assert!(!config.performance.use_parallel(10));
        assert!(config.performance.use_parallel(1000));

        config.performance.parallel = false;
        assert!(!config.performance.use_parallel(1000));
    }
}
