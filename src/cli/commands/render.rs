//! render command
//!
//! Renders a template with the path filters and the `lookup`/`query`
//! functions available, against variables loaded from a JSON or YAML file.

use super::{read_document, read_source, CommandContext};
use anyhow::{bail, Result};
use clap::Parser;
use rustible_utils::template::TemplateEngine;
use serde_json::Value;
use std::path::PathBuf;

/// Arguments for the render command
#[derive(Parser, Debug, Clone)]
pub struct RenderArgs {
    /// Template file to render (`-` for stdin)
    pub template: PathBuf,

    /// JSON or YAML file with the template variables
    #[arg(long)]
    pub vars: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command
    pub fn execute(&self, ctx: &CommandContext) -> Result<i32> {
        if self.vars.as_deref() == Some(std::path::Path::new("-"))
            && self.template == PathBuf::from("-")
        {
            bail!("Template and variables cannot both be read from stdin");
        }

        let source = read_source(&self.template)?;
        let vars = match &self.vars {
            Some(path) => read_document(path)?,
            None => Value::Object(Default::default()),
        };
        if !vars.is_object() {
            bail!("Template variables must be a mapping");
        }

        let engine = TemplateEngine::new();
        ctx.output.debug(&format!(
            "Rendering {} with lookups {:?}",
            self.template.display(),
            engine.registry().list()
        ));

        let rendered = engine.render_str(&source, &vars)?;
        ctx.output.text(&rendered)?;
        if !rendered.ends_with('\n') {
            ctx.output.text("\n")?;
        }
        Ok(0)
    }
}
