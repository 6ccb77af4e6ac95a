//! Path filters for Jinja2 templates.
//!
//! # Available Filters
//!
//! - `to_paths`: Flatten a value into a mapping of path expressions to leaves
//! - `get_path`: Resolve a path expression against a value
//!
//! # Examples
//!
//! ```jinja2
//! {{ a | to_paths }}
//! {{ a | to_paths(prepend='a') }}
//! {{ a | to_paths(wantlist=true) }}
//! {{ a | get_path('b.c.d[0]') }}
//! ```

use crate::error::Error;
use crate::paths;
use crate::template::{template_error, to_json};
use minijinja::value::Kwargs;
use minijinja::{Environment, Value};

type FilterResult = Result<Value, minijinja::Error>;

/// Register all path filters with the given environment.
pub fn register_filters(env: &mut Environment<'static>) {
    env.add_filter("to_paths", to_paths);
    env.add_filter("get_path", get_path);
}

/// Flatten a value into a mapping of paths to leaf values.
///
/// # Arguments
///
/// * `value` - The mapping or sequence to flatten
/// * `prepend` - Optional: prefix for every path, positional or keyword
/// * `wantlist` - Optional: wrap the mapping in a single-element list
fn to_paths(
    value: Value,
    prepend: Option<Value>,
    wantlist: Option<Value>,
    kwargs: Kwargs,
) -> FilterResult {
    let prepend = argument("prepend", prepend, &kwargs)?;
    let wantlist = argument("wantlist", wantlist, &kwargs)?;
    kwargs.assert_all_used()?;

    let prepend = match prepend {
        Some(v) if v.is_none() => None,
        Some(v) => match v.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                return Err(template_error(Error::invalid_argument(
                    "prepend",
                    format!("must be a string, got {}", v.kind()),
                )))
            }
        },
        None => None,
    };
    let wantlist = wantlist.is_some_and(|v| v.is_true());

    let var = to_json(&value).map_err(template_error)?;
    let result = paths::to_paths(&var, prepend.as_deref(), wantlist);
    Ok(Value::from_serialize(&result))
}

/// Resolve `path` against a value.
fn get_path(value: Value, path: String, wantlist: Option<Value>, kwargs: Kwargs) -> FilterResult {
    let wantlist = argument("wantlist", wantlist, &kwargs)?.is_some_and(|v| v.is_true());
    kwargs.assert_all_used()?;

    let var = to_json(&value).map_err(template_error)?;
    let result = paths::get_path_wantlist(&var, &path, wantlist).map_err(template_error)?;
    Ok(Value::from_serialize(&result))
}

/// Take an argument given either positionally or by keyword, but not both.
fn argument(
    name: &str,
    positional: Option<Value>,
    kwargs: &Kwargs,
) -> Result<Option<Value>, minijinja::Error> {
    let keyword: Option<Value> = kwargs.get(name)?;
    match (positional, keyword) {
        (Some(_), Some(_)) => Err(template_error(Error::invalid_argument(
            name,
            "given both positionally and by keyword",
        ))),
        (positional, keyword) => Ok(positional.or(keyword)),
    }
}
