//! # rustible-utils - Path Flattening for Rustible
//!
//! Turns nested data (mappings and sequences) into a flat mapping from path
//! expressions to their scalar leaves, and resolves those paths back:
//!
//! ```text
//! {"b": {"c": {"d": [0, 1]}}}   --to_paths(prepend="a")-->   {"a.b.c.d[0]": 0,
//!                                                             "a.b.c.d[1]": 1}
//! ```
//!
//! Paths use dot notation for keys that are identifiers, bracketed quotes for
//! every other key (`['x-y']`), and bracketed integers for sequence indices.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     CLI (clap) / Template Engine                     │
//! │            to-paths, get-path, render  |  lookup(), query()          │
//! └─────────────────────────────────────────────────────────────────────┘
//!                  │                                  │
//!                  ▼                                  ▼
//! ┌─────────────────────────────────┐  ┌────────────────────────────────┐
//! │         Filter Plugins          │  │         Lookup Plugins         │
//! │     to_paths, get_path          │  │  to_paths, get_path (FQCN ok)  │
//! └─────────────────────────────────┘  └────────────────────────────────┘
//!                  │                                  │
//!                  └────────────────┬─────────────────┘
//!                                   ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                 paths: expr | flatten | resolve                      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use rustible_utils::prelude::*;
//! use serde_json::json;
//!
//! let data = json!({"b": {"c": {"d": [0, 1]}}});
//! let flat = flatten(&data, Some("a"));
//! assert_eq!(flat["a.b.c.d[1]"], json!(1));
//!
//! let engine = TemplateEngine::new();
//! let out = engine.render_str("{{ a | get_path('b.c.d[0]') }}", &json!({"a": data}))?;
//! assert_eq!(out, "0");
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export commonly used items in prelude
pub mod prelude {
    //! Convenient re-exports of commonly used types and traits.

    // Error handling
    pub use crate::error::{Error, Result};

    // Path core
    pub use crate::paths::{flatten, get_path, get_path_wantlist, to_paths, FlatPaths, Path, Segment};

    // Plugins
    pub use crate::plugins::filter::FilterRegistry;
    pub use crate::plugins::lookup::{
        ErrorBehavior, LookupContext, LookupError, LookupOptions, LookupPlugin, LookupRegistry,
        LookupTerms,
    };

    // Templates
    pub use crate::template::TemplateEngine;
}

// ============================================================================
// Core Modules
// ============================================================================

/// Error types and result aliases for rustible-utils operations.
pub mod error;

/// Path expressions, flattening and resolution.
///
/// - [`paths::expr`]: the path grammar, rendering and parsing
/// - [`paths::flatten`]: nested value to `path -> leaf` mapping
/// - [`paths::resolve`]: path expression to the value it addresses
pub mod paths;

// ============================================================================
// Plugins and Templates
// ============================================================================

/// Filter and lookup plugins exposing the path operations to templates.
pub mod plugins;

/// Template engine with the path filters and lookup functions registered.
pub mod template;

// ============================================================================
// Configuration
// ============================================================================

/// Configuration loading for the command-line tool.
pub mod config;

pub use error::{Error, Result};

// ============================================================================
// Version Information
// ============================================================================

/// Returns the current version of rustible-utils.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
