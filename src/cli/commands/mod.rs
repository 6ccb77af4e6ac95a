//! Subcommands module for rustible-utils CLI
//!
//! This module contains all the subcommand implementations.

pub mod get_path;
pub mod plugins;
pub mod render;
pub mod to_paths;

use crate::cli::output::OutputFormatter;
use anyhow::{Context, Result};
use rustible_utils::config::Config;
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Common context shared between commands
pub struct CommandContext {
    /// Configuration
    pub config: Config,
    /// Output formatter
    pub output: OutputFormatter,
}

impl CommandContext {
    /// Create a new command context from CLI arguments
    pub fn new(cli: &crate::cli::Cli, config: Config) -> Self {
        let format = cli.output.unwrap_or(config.defaults.output);
        let output = OutputFormatter::new(!cli.no_color, format, cli.verbosity());

        Self { config, output }
    }
}

/// Read a file, or stdin when `path` is `-`
pub fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read from stdin")?;
        return Ok(content);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))
}

/// Load a JSON or YAML document from a file, or stdin when `path` is `-`
///
/// `.json` files are parsed as JSON and `.yml`/`.yaml` files as YAML. Other
/// files and stdin are tried as JSON first, then YAML.
pub fn read_document(path: &Path) -> Result<Value> {
    let content = read_source(path)?;
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    let document = match extension {
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON: {}", path.display()))?,
        "yml" | "yaml" => serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML: {}", path.display()))?,
        _ => match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(_) => serde_yaml::from_str(&content).with_context(|| {
                format!("Failed to parse input as JSON or YAML: {}", path.display())
            })?,
        },
    };

    Ok(document)
}
