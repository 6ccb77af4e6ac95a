//! Configuration module for rustible-utils
//!
//! Handles loading and merging configuration from multiple sources:
//! - Default values
//! - User configuration (~/.rustible-utils.toml)
//! - Project configuration (./rustible-utils.toml)
//! - Environment variables
//! - Command-line arguments

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "RUSTIBLE_UTILS_CONFIG";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default arguments for the path operations
    pub defaults: Defaults,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Problems found while loading, reported once logging is initialised
    #[serde(skip)]
    pub warnings: Vec<String>,
}

/// Default argument values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Prefix applied by `to-paths` when none is given
    pub prepend: Option<String>,

    /// Wrap results in a list
    pub wantlist: bool,

    /// Output format for command results
    pub output: OutputFormat,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// YAML
    Yaml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            other => bail!("Unknown output format '{}', expected json or yaml", other),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when neither `-v` nor `RUST_LOG` is given
    pub level: String,

    /// Log format: `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "text".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Whether log lines should be emitted as JSON
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from all sources
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Config::default();

        for path in Self::get_config_paths(config_path) {
            if path.exists() {
                config = config.merge_from_file(&path)?;
            } else if config_path == Some(&path) {
                bail!("Config file not found: {}", path.display());
            }
        }

        config.apply_env_overrides();

        Ok(config)
    }

    /// Get the list of configuration file paths to check, lowest precedence first
    fn get_config_paths(explicit_path: Option<&PathBuf>) -> Vec<PathBuf> {
        // Explicit path takes priority
        if let Some(path) = explicit_path {
            return vec![path.clone()];
        }

        if let Ok(env_config) = std::env::var(CONFIG_ENV) {
            return vec![PathBuf::from(env_config)];
        }

        let mut paths = Vec::new();

        // User config
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".rustible-utils.toml"));
        }

        // Project config (current directory)
        paths.push(PathBuf::from("rustible-utils.toml"));

        paths
    }

    /// Merge configuration from a file
    fn merge_from_file(&self, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let file_config: Config = match extension {
            "yml" | "yaml" => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?,
            "json" => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?,
            _ => toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?,
        };

        Ok(self.merge(file_config))
    }

    /// Merge another config into this one; `other` wins for non-default values
    fn merge(&self, other: Config) -> Config {
        let defaults = LoggingConfig::default();
        Config {
            defaults: Defaults {
                prepend: other
                    .defaults
                    .prepend
                    .or_else(|| self.defaults.prepend.clone()),
                wantlist: other.defaults.wantlist || self.defaults.wantlist,
                output: if other.defaults.output != OutputFormat::default() {
                    other.defaults.output
                } else {
                    self.defaults.output
                },
            },
            logging: LoggingConfig {
                level: if other.logging.level != defaults.level {
                    other.logging.level
                } else {
                    self.logging.level.clone()
                },
                format: if other.logging.format != defaults.format {
                    other.logging.format
                } else {
                    self.logging.format.clone()
                },
            },
            warnings: self.warnings.clone(),
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // RUSTIBLE_UTILS_PREPEND
        if let Some(prepend) = var("RUSTIBLE_UTILS_PREPEND") {
            self.defaults.prepend = Some(prepend).filter(|p| !p.is_empty());
        }

        // RUSTIBLE_UTILS_OUTPUT
        if let Some(output) = var("RUSTIBLE_UTILS_OUTPUT") {
            match output.parse() {
                Ok(format) => self.defaults.output = format,
                Err(e) => self
                    .warnings
                    .push(format!("Ignoring RUSTIBLE_UTILS_OUTPUT: {e}")),
            }
        }

        // RUSTIBLE_UTILS_LOG_LEVEL
        if let Some(level) = var("RUSTIBLE_UTILS_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Load from a specific file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Config::default().merge_from_file(path.as_ref())
    }
}
