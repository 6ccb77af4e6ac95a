//! to-paths command
//!
//! Flattens a JSON or YAML document into a mapping of paths to leaf values.

use super::{read_document, CommandContext};
use anyhow::Result;
use clap::Parser;
use rustible_utils::paths;
use std::path::PathBuf;

/// Arguments for the to-paths command
#[derive(Parser, Debug, Clone)]
pub struct ToPathsArgs {
    /// JSON or YAML file to flatten (`-` for stdin)
    pub input: PathBuf,

    /// Prefix for every path, usually the variable name
    #[arg(short = 'p', long)]
    pub prepend: Option<String>,

    /// Wrap the result in a single-element list
    #[arg(short = 'w', long)]
    pub wantlist: bool,
}

impl ToPathsArgs {
    /// Execute the to-paths command
    pub fn execute(&self, ctx: &CommandContext) -> Result<i32> {
        let document = read_document(&self.input)?;

        let prepend = self
            .prepend
            .as_deref()
            .or(ctx.config.defaults.prepend.as_deref());
        let wantlist = self.wantlist || ctx.config.defaults.wantlist;

        ctx.output.debug(&format!(
            "Flattening {} (prepend: {:?}, wantlist: {})",
            self.input.display(),
            prepend,
            wantlist
        ));

        let result = paths::to_paths(&document, prepend, wantlist);
        ctx.output.emit(&result)?;
        Ok(0)
    }
}
