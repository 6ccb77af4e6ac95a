//! plugins command
//!
//! Lists the lookup and filter plugins with their options.

use super::CommandContext;
use anyhow::Result;
use clap::Parser;
use rustible_utils::plugins::filter::FilterRegistry;
use rustible_utils::plugins::lookup::{LookupRegistry, COLLECTION_NAMESPACES};
use serde_json::{json, Value};

/// Arguments for the plugins command
#[derive(Parser, Debug, Clone)]
pub struct PluginsArgs {
    /// Include usage examples
    #[arg(long)]
    pub examples: bool,
}

impl PluginsArgs {
    /// Execute the plugins command
    pub fn execute(&self, ctx: &CommandContext) -> Result<i32> {
        ctx.output.emit(&self.describe(&LookupRegistry::with_builtins()))?;
        Ok(0)
    }

    fn describe(&self, registry: &LookupRegistry) -> Value {
        let namespace = COLLECTION_NAMESPACES.first().copied().unwrap_or_default();

        let lookups: Vec<Value> = registry
            .list()
            .into_iter()
            .filter_map(|name| registry.get(name))
            .map(|plugin| {
                let options: Vec<Value> = plugin
                    .available_options()
                    .iter()
                    .map(|o| {
                        json!({
                            "name": o.name,
                            "type": o.option_type,
                            "required": o.required,
                            "default": o.default,
                            "description": o.description,
                        })
                    })
                    .collect();

                let mut entry = json!({
                    "name": plugin.name(),
                    "fqcn": format!("{}.{}", namespace, plugin.name()),
                    "description": plugin.description(),
                    "options": options,
                });
                if self.examples {
                    entry["examples"] = json!(plugin.examples());
                }
                entry
            })
            .collect();

        json!({
            "lookups": lookups,
            "filters": FilterRegistry::names(),
        })
    }
}
