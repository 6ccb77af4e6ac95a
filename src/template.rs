//! Template engine wiring for the path plugins.
//!
//! [`TemplateEngine`] wraps a minijinja environment with every filter from
//! [`FilterRegistry`] registered, plus the `lookup`, `query` and `q`
//! functions dispatching into a [`LookupRegistry`]:
//!
//! ```jinja2
//! {{ a | to_paths(prepend='a') }}
//! {{ lookup('ansible.utils.to_paths', a) }}
//! {{ query('ansible.utils.get_path', a, 'b.c.d[0]') }}
//! ```
//!
//! `lookup` unwraps its list result the way playbooks expect: a list of
//! strings is joined with commas, a single value is returned as is, and
//! anything else stays a list. `query`/`q` (or `wantlist=true`) always
//! return the list.

use crate::error::{Error, Result};
use crate::plugins::filter::FilterRegistry;
use crate::plugins::lookup::{LookupContext, LookupOptions, LookupRegistry, LookupTerms};
use minijinja::value::{Kwargs, Rest, ValueKind};
use minijinja::{Environment, ErrorKind, Value};
use std::sync::Arc;
use tracing::trace;

/// Template environment with the path filters and lookup functions.
#[derive(Clone)]
pub struct TemplateEngine {
    env: Environment<'static>,
    registry: Arc<LookupRegistry>,
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine")
            .field("lookups", &self.registry.list())
            .finish()
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine {
    /// Create an engine with the built-in lookups.
    pub fn new() -> Self {
        Self::with_registry(LookupRegistry::with_builtins())
    }

    /// Create an engine dispatching lookups into `registry`.
    pub fn with_registry(registry: LookupRegistry) -> Self {
        let mut env = Environment::new();
        FilterRegistry::register_all(&mut env);
        Self {
            env,
            registry: Arc::new(registry),
        }
    }

    /// The lookup registry used by `lookup` and `query`.
    pub fn registry(&self) -> &LookupRegistry {
        &self.registry
    }

    /// Render a template string against `vars` (a JSON object).
    pub fn render_str(&self, template: &str, vars: &serde_json::Value) -> Result<String> {
        let env = self.lookup_environment();
        env.render_str(template, vars)
            .map_err(|e| Error::template_render(template, e.to_string()))
    }

    /// Evaluate a single expression against `vars` and return its value.
    pub fn evaluate(&self, expression: &str, vars: &serde_json::Value) -> Result<serde_json::Value> {
        let env = self.lookup_environment();
        let value = env
            .compile_expression_owned(expression.to_string())
            .and_then(|expr| expr.eval(vars))
            .map_err(|e| Error::template_render(expression, e.to_string()))?;
        to_json(&value)
    }

    fn lookup_environment(&self) -> Environment<'static> {
        let context = Arc::new(LookupContext::new());

        let mut env = self.env.clone();
        for (name, always_list) in [("lookup", false), ("query", true), ("q", true)] {
            let registry = Arc::clone(&self.registry);
            let context = Arc::clone(&context);
            env.add_function(
                name,
                move |plugin: String, args: Rest<Value>, kwargs: Kwargs| {
                    run_lookup(&registry, &context, &plugin, &args, &kwargs, always_list)
                },
            );
        }
        env
    }
}

fn run_lookup(
    registry: &LookupRegistry,
    context: &LookupContext,
    plugin: &str,
    args: &[Value],
    kwargs: &Kwargs,
    always_list: bool,
) -> std::result::Result<Value, minijinja::Error> {
    let mut options = LookupOptions::new().with_wantlist(always_list);

    for key in kwargs.args() {
        let value: Value = kwargs.get(key)?;
        match key {
            "wantlist" => options.wantlist = always_list || value.is_true(),
            "errors" => {
                options.errors = value
                    .as_str()
                    .unwrap_or_default()
                    .parse()
                    .map_err(template_error)?;
            }
            _ => {
                options
                    .options
                    .insert(key.to_string(), to_json(&value).map_err(template_error)?);
            }
        }
    }
    kwargs.assert_all_used()?;

    let terms = args
        .iter()
        .map(to_json)
        .collect::<Result<Vec<_>>>()
        .map_err(template_error)?;

    trace!(plugin, terms = terms.len(), "Template lookup");

    let values = registry
        .lookup_with_options(plugin, &LookupTerms::from(terms), &options, context)
        .map_err(template_error)?;

    if options.wantlist {
        return Ok(Value::from_serialize(&values));
    }

    let strings: Option<Vec<&str>> = values.iter().map(|v| v.as_str()).collect();
    Ok(match (strings, values.as_slice()) {
        (Some(strings), _) => Value::from(strings.join(",")),
        (None, [single]) => Value::from_serialize(single),
        (None, _) => Value::from_serialize(&values),
    })
}

/// Convert a template error source into a `minijinja::Error`.
pub(crate) fn template_error(err: impl std::fmt::Display) -> minijinja::Error {
    minijinja::Error::new(ErrorKind::InvalidOperation, err.to_string())
}

/// Convert a template value into plain data.
///
/// Only mappings, sequences and scalars convert. Undefined values, callables,
/// byte strings and non-finite numbers are rejected with
/// [`Error::UnsupportedType`]. Non-string mapping keys are stringified.
pub fn to_json(value: &Value) -> Result<serde_json::Value> {
    match value.kind() {
        ValueKind::None => Ok(serde_json::Value::Null),
        ValueKind::Bool => Ok(serde_json::Value::Bool(value.is_true())),
        ValueKind::String => Ok(serde_json::Value::String(
            value.as_str().unwrap_or_default().to_string(),
        )),
        ValueKind::Number => match serde_json::to_value(value)? {
            serde_json::Value::Null => Err(Error::UnsupportedType(format!(
                "non-finite number {}",
                value
            ))),
            number => Ok(number),
        },
        ValueKind::Map => {
            let mut map = serde_json::Map::new();
            for key in value.try_iter().map_err(unsupported)? {
                let item = value.get_item(&key).map_err(unsupported)?;
                let key = match key.as_str() {
                    Some(s) => s.to_string(),
                    None => key.to_string(),
                };
                map.insert(key, to_json(&item)?);
            }
            Ok(serde_json::Value::Object(map))
        }
        ValueKind::Seq | ValueKind::Iterable => value
            .try_iter()
            .map_err(unsupported)?
            .map(|item| to_json(&item))
            .collect::<Result<Vec<_>>>()
            .map(serde_json::Value::Array),
        kind => Err(Error::UnsupportedType(format!("{} value", kind))),
    }
}

/// Convert plain data into a template value.
pub fn from_json(value: &serde_json::Value) -> Value {
    Value::from_serialize(value)
}

fn unsupported(err: minijinja::Error) -> Error {
    Error::UnsupportedType(err.to_string())
}
