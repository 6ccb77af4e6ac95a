//! Path flattening and resolution for nested data.
//!
//! This module turns an arbitrary tree of mappings, sequences and scalars
//! into a flat mapping whose keys are dot/bracket path expressions, and
//! resolves such expressions back into the tree.
//!
//! ```text
//! {"b": {"c": {"d": [0, 1]}}}      flatten      {"b.c.d[0]": 0,
//!                              ─────────────▶    "b.c.d[1]": 1}
//!                              ◀─────────────
//!                                  get_path
//! ```
//!
//! - [`expr`]: the [`Segment`]/[`Path`] model, rendering and parsing
//! - [`flatten`](mod@flatten): depth-first flattening into [`FlatPaths`]
//! - [`resolve`]: [`get_path`] lookups of a rendered path

pub mod expr;
pub mod flatten;
pub mod resolve;

pub use expr::{is_identifier, Path, Segment};
pub use flatten::{flatten, to_paths, FlatPaths};
pub use resolve::{get_path, get_path_wantlist};
