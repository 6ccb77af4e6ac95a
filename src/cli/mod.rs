//! CLI module for rustible-utils
//!
//! This module provides the command-line interface: argument parsing and
//! subcommand handling for flattening data into paths, resolving paths,
//! rendering templates and listing the available plugins.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use rustible_utils::config::OutputFormat;
use std::path::PathBuf;

/// rustible-utils - Flatten nested data into paths and resolve them back
#[derive(Parser, Debug, Clone)]
#[command(name = "rustible-utils")]
#[command(author = "Rustible Contributors")]
#[command(version)]
#[command(about = "Flatten nested data into dot/bracket paths and resolve them back", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output format (defaults to the configured format, then json)
    #[arg(short = 'o', long, global = true)]
    pub output: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true, env = "RUSTIBLE_UTILS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Flatten a JSON or YAML document into paths and values
    #[command(name = "to-paths")]
    ToPaths(commands::to_paths::ToPathsArgs),

    /// Retrieve the value at a path in a JSON or YAML document
    #[command(name = "get-path")]
    GetPath(commands::get_path::GetPathArgs),

    /// Render a template with the path filters and lookups available
    Render(commands::render::RenderArgs),

    /// List the available lookup and filter plugins
    Plugins(commands::plugins::PluginsArgs),
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Get the effective verbosity level (0-3)
    pub fn verbosity(&self) -> u8 {
        self.verbose.min(3)
    }
}
