//! Flatten nested data into a mapping of paths to leaf values.
//!
//! ```rust,ignore
//! use rustible_utils::paths::flatten;
//! use serde_json::json;
//!
//! let data = json!({"b": {"c": {"d": [0, 1]}}});
//! let flat = flatten(&data, Some("a"));
//! assert_eq!(flat["a.b.c.d[1]"], json!(1));
//! ```

use super::expr::{write_index, write_key};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

/// Flattened paths in traversal order.
pub type FlatPaths = IndexMap<String, Value>;

/// Flatten `value` into a mapping from rendered path to scalar leaf.
///
/// Traversal is depth-first in the input's own order. Every scalar yields
/// one entry; empty mappings and sequences produce none. A scalar root
/// produces a single entry keyed by `prepend` (or the empty string).
///
/// Top-level keys are written verbatim, as is `prepend`, so flattening an
/// already flat mapping returns it unchanged. The flip side is that a
/// top-level key containing `.` or `[` can render to the same string as a
/// nested path: `{"a.b": 1, "a": {"b": 2}}` yields the single entry
/// `{"a.b": 2}`, the later leaf replacing the earlier one in place.
pub fn flatten(value: &Value, prepend: Option<&str>) -> FlatPaths {
    let mut out = FlatPaths::new();
    let mut path = String::new();

    match prepend.filter(|p| !p.is_empty()) {
        Some(prefix) => {
            path.push_str(prefix);
            walk(value, &mut path, false, &mut out);
        }
        None => walk(value, &mut path, true, &mut out),
    }

    debug!(leaves = out.len(), prepend = ?prepend, "Flattened value into paths");
    out
}

/// Flatten `value` and shape the result the way the `to_paths` plugin
/// returns it: the mapping itself, or a one-element list holding the mapping
/// when `wantlist` is set.
pub fn to_paths(value: &Value, prepend: Option<&str>, wantlist: bool) -> Value {
    let flat = Value::Object(flatten(value, prepend).into_iter().collect());
    if wantlist {
        Value::Array(vec![flat])
    } else {
        flat
    }
}

fn walk(value: &Value, path: &mut String, first: bool, out: &mut FlatPaths) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let mark = path.len();
                write_key(path, key, first);
                // An empty top-level key leaves the path empty, so the next
                // key is still the first one written.
                let first = first && path.is_empty();
                walk(child, path, first, out);
                path.truncate(mark);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                let mark = path.len();
                write_index(path, index);
                walk(child, path, false, out);
                path.truncate(mark);
            }
        }
        leaf => {
            out.insert(path.clone(), leaf.clone());
        }
    }
}
