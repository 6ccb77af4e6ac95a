//! get-path command
//!
//! Resolves a path expression against a JSON or YAML document.

use super::{read_document, CommandContext};
use anyhow::Result;
use clap::Parser;
use rustible_utils::paths;
use std::path::PathBuf;

/// Arguments for the get-path command
#[derive(Parser, Debug, Clone)]
pub struct GetPathArgs {
    /// JSON or YAML file to read (`-` for stdin)
    pub input: PathBuf,

    /// Path expression, e.g. `interfaces[0].config['auto-negotiate']`
    pub path: String,

    /// Wrap the result in a single-element list
    #[arg(short = 'w', long)]
    pub wantlist: bool,
}

impl GetPathArgs {
    /// Execute the get-path command
    pub fn execute(&self, ctx: &CommandContext) -> Result<i32> {
        let document = read_document(&self.input)?;
        let wantlist = self.wantlist || ctx.config.defaults.wantlist;

        ctx.output
            .debug(&format!("Resolving '{}' in {}", self.path, self.input.display()));

        let value = paths::get_path_wantlist(&document, &self.path, wantlist)?;
        ctx.output.emit(&value)?;
        Ok(0)
    }
}
