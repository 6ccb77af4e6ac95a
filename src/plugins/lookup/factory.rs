//! Lookup Plugin Factory
//!
//! Creates built-in lookup plugins by name.

use super::{short_name, GetPathLookup, LookupPlugin, ToPathsLookup};
use std::sync::Arc;

/// Factory for creating lookup plugins
#[derive(Debug, Default)]
pub struct LookupFactory;

impl LookupFactory {
    /// Create a new factory
    pub fn new() -> Self {
        Self
    }

    /// Names of the built-in lookups
    pub fn builtin_names() -> &'static [&'static str] {
        &["to_paths", "get_path"]
    }

    /// Create a lookup plugin by short or fully qualified name
    pub fn create(&self, name: &str) -> Option<Arc<dyn LookupPlugin>> {
        match short_name(name) {
            "to_paths" => Some(Arc::new(ToPathsLookup::new())),
            "get_path" => Some(Arc::new(GetPathLookup::new())),
            _ => None,
        }
    }
}
