//! Plugin System for rustible-utils
//!
//! # Plugin Categories
//!
//! ## Filter Plugins
//!
//! Jinja2-compatible filters for template processing: `to_paths` and
//! `get_path`. See the [`filter`] module.
//!
//! ## Lookup Plugins
//!
//! The same operations exposed as lookups, callable through `lookup()` and
//! `query()` in templates under their short or fully qualified names
//! (`ansible.utils.to_paths`). See the [`lookup`] module.
//!
//! # Usage Example
//!
//! ```rust,ignore
//! use rustible_utils::plugins::filter::FilterRegistry;
//! use rustible_utils::plugins::lookup::prelude::*;
//! use minijinja::Environment;
//!
//! let mut env = Environment::new();
//! FilterRegistry::register_all(&mut env);
//!
//! let registry = LookupRegistry::with_builtins();
//! let context = LookupContext::default();
//! ```
//!
//! # Creating Custom Lookups
//!
//! Implement the [`lookup::LookupPlugin`] trait and register it:
//!
//! ```rust,ignore
//! use rustible_utils::plugins::lookup::prelude::*;
//!
//! #[derive(Debug, Default)]
//! struct KeysLookup;
//!
//! impl LookupPlugin for KeysLookup {
//!     fn name(&self) -> &'static str { "keys" }
//!     fn description(&self) -> &'static str { "List the paths of a value" }
//!     fn lookup(
//!         &self,
//!         terms: &LookupTerms,
//!         options: &LookupOptions,
//!         _context: &LookupContext,
//!     ) -> LookupResult<Vec<serde_json::Value>> {
//!         let args = bind_arguments(&self.available_options(), terms, options)?;
//!         let flat = rustible_utils::paths::flatten(args.required("var")?, None);
//!         Ok(flat.into_keys().map(Into::into).collect())
//!     }
//!     fn available_options(&self) -> Vec<LookupOptionInfo> {
//!         vec![LookupOptionInfo::new("var", "Value", "raw").required()]
//!     }
//! }
//!
//! let mut registry = LookupRegistry::with_builtins();
//! registry.register(KeysLookup);
//! ```

pub mod filter;
pub mod lookup;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use super::filter::FilterRegistry;
    pub use super::lookup::prelude::*;
}
