//! Configuration loading and persistence with atomic file operations.

use crate::schema::Config;
use plotline_common::{PlotlineError, Result as PlotlineResult};
use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_VAR: &str = "PLOTLINE_CONFIG_PATH";

/// Files probed, in order, when no explicit path is given.
pub const DEFAULT_CONFIG_FILES: [&str; 3] = ["config.yaml", "config.yml", "config.toml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading or writing the configuration file
    #[error("Failed to access configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("Failed to serialize TOML configuration: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(PlotlineError),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// File extension is neither YAML nor TOML
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(PathBuf),
}

impl From<ConfigError> for PlotlineError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ValidationError(inner) => inner,
            other => Self::config_with_source("Configuration loading error", other),
        }
    }
}

/// On-disk configuration format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("toml") => Ok(Self::Toml),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML or TOML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content, format)?;

        Self::apply_env_overrides(&mut config)?;
        config.validate().map_err(ConfigError::ValidationError)?;

        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load configuration from the environment and well-known files.
    ///
    /// `PLOTLINE_CONFIG_PATH` wins, then the first of [`DEFAULT_CONFIG_FILES`]
    /// that exists, then built-in defaults.
    pub fn load() -> PlotlineResult<Config> {
        if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            return Ok(Self::load_config(config_path)?);
        }

        if let Some(found) = DEFAULT_CONFIG_FILES.into_iter().map(Path::new).find(|p| p.exists()) {
            return Ok(Self::load_config(found)?);
        }

        debug!("no configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> PlotlineResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Saves configuration to file atomically.
    ///
    /// The document is written to a temporary file in the target directory
    /// and renamed over the destination.
    pub fn save<P: AsRef<Path>>(config: &Config, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let rendered = match Format::from_path(path)? {
            Format::Yaml => serde_yaml::to_string(config)?,
            Format::Toml => toml::to_string_pretty(config)?,
        };

        let directory = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut staged = tempfile::NamedTempFile::new_in(directory)?;
        staged.write_all(rendered.as_bytes())?;
        staged.flush()?;
        staged.persist(path).map_err(|e| ConfigError::IoError(e.error))?;

        info!(path = %path.display(), "saved configuration");
        Ok(())
    }

    fn parse(content: &str, format: Format) -> Result<Config, ConfigError> {
        Ok(match format {
            Format::Yaml => serde_yaml::from_str(content)?,
            Format::Toml => toml::from_str(content)?,
        })
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides(config, |var| env::var(var).ok())
    }

    /// Apply overrides read through `lookup`, keyed by environment variable name.
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
        where
            T: std::str::FromStr,
            T::Err: std::error::Error + Send + Sync + 'static,
        {
            value.trim().parse().map_err(|e| ConfigError::EnvParseError {
                var: var.to_string(),
                source: Box::new(e),
            })
        }

        if let Some(address) = lookup("PLOTLINE_BIND_ADDRESS") {
            config.server.bind_address = address;
        }

        if let Some(level) = lookup("PLOTLINE_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(width) = lookup("PLOTLINE_CHART_WIDTH") {
            config.chart.width = parse_var("PLOTLINE_CHART_WIDTH", &width)?;
        }

        if let Some(height) = lookup("PLOTLINE_CHART_HEIGHT") {
            config.chart.height = parse_var("PLOTLINE_CHART_HEIGHT", &height)?;
        }

        if let Some(color) = lookup("PLOTLINE_LINE_COLOR") {
            config.chart.line_color = color;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotline_common::test_utils::config_fixtures;
    use std::collections::HashMap;

    fn write_config(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).expect("Failed to write config file");
        path
    }

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_parse_full_yaml() {
        let config = ConfigLoader::parse(config_fixtures::full_config_yaml(), Format::Yaml).unwrap();

        assert_eq!(config.chart.width, 800);
        assert_eq!(config.chart.line_color, "#ff7f0e");
        assert_eq!(config.chart.series_label, "requests");
        assert_eq!(config.server.bind_address, "127.0.0.1:8080");
        assert_eq!(config.server.default_samples, vec![3.0, 1.0, 4.0, 1.0, 5.0]);
        assert_eq!(config.logging.format, "json");
        assert!(config.logging.include_spans);
    }

    #[test]
    fn test_parse_minimal_yaml_uses_defaults() {
        let config = ConfigLoader::parse(config_fixtures::minimal_config_yaml(), Format::Yaml).unwrap();

        assert_eq!(config.chart.width, 320);
        assert_eq!(config.chart.height, 240);
        assert_eq!(config.chart.line_color, "#0000ff");
        assert_eq!(config.server, crate::ServerConfig::default());
    }

    #[test]
    fn test_parse_toml() {
        let config = ConfigLoader::parse(config_fixtures::full_config_toml(), Format::Toml).unwrap();

        assert_eq!(config.chart.width, 1024);
        assert_eq!(config.chart.line_color, "#2ca02c");
        assert_eq!(config.server.bind_address, "0.0.0.0:9000");
        assert_eq!(config.server.default_samples, vec![2.0, 7.0, 1.0]);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, "compact");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "broken.yaml", "chart:\n  width: [unclosed");

        let result = ConfigLoader::load_config(&path);
        assert!(matches!(result.unwrap_err(), ConfigError::ParseError(_)));
    }

    #[test]
    fn test_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "bad.yaml", "chart:\n  line_color: \"blue\"\n");

        let result = ConfigLoader::load_config(&path);
        assert!(matches!(result.unwrap_err(), ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "config.ini", "[chart]");

        let result = ConfigLoader::load_config(&path);
        assert!(matches!(result.unwrap_err(), ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_config_file() {
        let result = ConfigLoader::load_config("/nonexistent/path/config.yaml");
        assert!(matches!(result.unwrap_err(), ConfigError::IoError(_)));
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        let lookup = lookup_from(&[
            ("PLOTLINE_BIND_ADDRESS", "127.0.0.1:7000"),
            ("PLOTLINE_CHART_WIDTH", "1200"),
            ("PLOTLINE_LOG_LEVEL", "debug"),
            ("PLOTLINE_LINE_COLOR", "#123456"),
        ]);

        ConfigLoader::apply_overrides(&mut config, lookup).unwrap();

        assert_eq!(config.server.bind_address, "127.0.0.1:7000");
        assert_eq!(config.chart.width, 1200);
        assert_eq!(config.chart.height, crate::DEFAULT_HEIGHT);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.chart.line_color, "#123456");
    }

    #[test]
    fn test_override_parse_error() {
        let mut config = Config::default();
        let lookup = lookup_from(&[("PLOTLINE_CHART_HEIGHT", "tall")]);

        let result = ConfigLoader::apply_overrides(&mut config, lookup);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::EnvParseError { ref var, .. } if var == "PLOTLINE_CHART_HEIGHT"
        ));
    }

    #[test]
    fn test_save_then_parse_yaml_and_toml() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.chart.series_label = "latency".to_string();

        for name in ["saved.yaml", "saved.toml"] {
            let path = dir.path().join(name);
            ConfigLoader::save(&config, &path).unwrap();

            let content = std::fs::read_to_string(&path).unwrap();
            let format = Format::from_path(&path).unwrap();
            let reloaded = ConfigLoader::parse(&content, format).unwrap();
            assert_eq!(reloaded, config);
        }
    }

    #[test]
    fn test_validation_error_converts_unwrapped() {
        let inner = PlotlineError::validation_field("bad", "chart.width");
        let converted: PlotlineError = ConfigError::ValidationError(inner).into();
        assert!(converted.is_client_error());
    }
}
