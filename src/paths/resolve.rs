//! Resolve a rendered path expression against nested data.
//!
//! This is the inverse of [`flatten`](super::flatten): every key produced by
//! flattening a value resolves back to the leaf it was paired with.

use super::expr::{Path, Segment};
use crate::error::{Error, Result};
use serde_json::Value;
use tracing::trace;

/// Resolve `path` against `value`.
///
/// The path is parsed and walked segment by segment. When that fails and
/// `value` is a mapping, keys of the root mapping are tried verbatim as the
/// first segment, matching the way flattening writes top-level keys. An
/// empty root key is transparent, since flattening writes nothing for it.
pub fn get_path<'a>(value: &'a Value, path: &str) -> Result<&'a Value> {
    let direct = Path::parse(path).and_then(|parsed| walk(value, &parsed, path));

    match direct {
        Ok(found) => Ok(found),
        Err(err) => match resolve_verbatim_root(value, path) {
            Some(found) => Ok(found),
            None => Err(err),
        },
    }
}

/// Resolve `path` and return an owned value, wrapped in a one-element list
/// when `wantlist` is set.
pub fn get_path_wantlist(value: &Value, path: &str, wantlist: bool) -> Result<Value> {
    let found = get_path(value, path)?.clone();
    if wantlist {
        Ok(Value::Array(vec![found]))
    } else {
        Ok(found)
    }
}

fn walk<'a>(value: &'a Value, parsed: &Path, original: &str) -> Result<&'a Value> {
    let mut current = value;

    for (depth, segment) in parsed.segments().iter().enumerate() {
        let next = match (segment, current) {
            (Segment::Key(key), Value::Object(map)) => map.get(key),
            (Segment::Index(index), Value::Array(items)) => items.get(*index),
            _ => None,
        };

        current = next.ok_or_else(|| {
            Error::path_not_found(original, parsed.prefix(depth + 1).to_string())
        })?;
    }

    Ok(current)
}

fn resolve_verbatim_root<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let Value::Object(map) = value else {
        return None;
    };

    let mut candidates: Vec<(&String, &Value)> = map
        .iter()
        .filter(|(key, _)| {
            !key.is_empty()
                && path.starts_with(key.as_str())
                && matches!(path.as_bytes().get(key.len()), None | Some(b'.') | Some(b'['))
        })
        .collect();
    candidates.sort_by_key(|(key, _)| std::cmp::Reverse(key.len()));

    let verbatim = candidates.into_iter().find_map(|(key, child)| {
        trace!(key = %key, "Trying root key verbatim");
        let rest = &path[key.len()..];
        if rest.is_empty() {
            return Some(child);
        }
        Path::parse(rest)
            .and_then(|parsed| walk(child, &parsed, path))
            .ok()
    });

    verbatim.or_else(|| {
        let child = map.get("")?;
        trace!("Trying empty root key");
        get_path(child, path).ok()
    })
}
