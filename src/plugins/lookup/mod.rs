//! Lookup Plugin System for rustible-utils
//!
//! Lookups compute a value from their terms inside a template expression,
//! e.g. `lookup('ansible.utils.to_paths', a, prepend='a')`. A lookup always
//! returns a list of values; the template layer decides whether to unwrap it.
//!
//! # Architecture
//!
//! 1. **[`LookupPlugin`]** trait: Core trait for all lookup implementations
//! 2. **[`LookupRegistry`]**: Central registry for lookup plugin discovery
//! 3. **[`LookupContext`]**: Execution context passed to lookups
//! 4. **[`bind_arguments`]**: Maps positional and keyword terms onto the
//!    parameters a plugin declares through [`LookupPlugin::available_options`]
//!
//! # Example
//!
//! ```rust,ignore
//! use rustible_utils::plugins::lookup::prelude::*;
//! use serde_json::json;
//!
//! let registry = LookupRegistry::with_builtins();
//! let context = LookupContext::default();
//!
//! // Positional terms: var, prepend, wantlist
//! let terms = LookupTerms::from(vec![json!({"b": [1, 2]}), json!("a")]);
//! let result = registry.lookup("to_paths", &terms, &context)?;
//! assert_eq!(result, vec![json!({"a.b[0]": 1, "a.b[1]": 2})]);
//! ```

pub mod factory;
pub mod get_path;
pub mod to_paths;

pub use factory::LookupFactory;
pub use get_path::GetPathLookup;
pub use to_paths::ToPathsLookup;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during lookup operations
#[derive(Error, Debug)]
pub enum LookupError {
    /// The requested lookup plugin was not found
    #[error("Lookup plugin not found: {0}")]
    NotFound(String),

    /// A required term was not supplied
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// A term was supplied both positionally and by keyword
    #[error("Argument '{0}' was given both positionally and by keyword")]
    DuplicateArgument(String),

    /// A term the plugin does not accept
    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),

    /// Invalid option value
    #[error("Invalid option '{option}': {message}")]
    InvalidOption { option: String, message: String },

    /// Flattening or resolution failed
    #[error(transparent)]
    Paths(#[from] crate::error::Error),
}

impl LookupError {
    /// Returns true for the argument errors raised while binding terms.
    pub fn is_argument_error(&self) -> bool {
        match self {
            LookupError::MissingArgument(_)
            | LookupError::DuplicateArgument(_)
            | LookupError::UnexpectedArgument(_)
            | LookupError::InvalidOption { .. } => true,
            LookupError::Paths(err) => err.is_argument_error(),
            LookupError::NotFound(_) => false,
        }
    }

    fn invalid_option(option: &str, message: impl Into<String>) -> Self {
        LookupError::InvalidOption {
            option: option.to_string(),
            message: message.into(),
        }
    }
}

/// Result type for lookup operations
pub type LookupResult<T> = Result<T, LookupError>;

// ============================================================================
// Lookup Terms
// ============================================================================

/// The terms a lookup is invoked with.
///
/// Hosts either pass terms positionally, or pass a single mapping of
/// parameter name to value.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupTerms {
    /// Terms in parameter order
    Positional(Vec<Value>),
    /// Terms by parameter name
    Keyword(Map<String, Value>),
}

impl LookupTerms {
    /// Number of terms supplied
    pub fn len(&self) -> usize {
        match self {
            LookupTerms::Positional(values) => values.len(),
            LookupTerms::Keyword(map) => map.len(),
        }
    }

    /// Whether no terms were supplied
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for LookupTerms {
    fn default() -> Self {
        LookupTerms::Positional(Vec::new())
    }
}

impl From<Vec<Value>> for LookupTerms {
    fn from(values: Vec<Value>) -> Self {
        LookupTerms::Positional(values)
    }
}

impl From<Map<String, Value>> for LookupTerms {
    fn from(map: Map<String, Value>) -> Self {
        LookupTerms::Keyword(map)
    }
}

// ============================================================================
// Lookup Options
// ============================================================================

/// Options that can be passed to lookup plugins
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LookupOptions {
    /// Keyword options passed to the lookup
    #[serde(flatten)]
    pub options: IndexMap<String, Value>,

    /// Lookup-specific errors behavior (fail or return default)
    #[serde(default)]
    pub errors: ErrorBehavior,

    /// Whether the caller wants the result as a list
    #[serde(default)]
    pub wantlist: bool,
}

impl LookupOptions {
    /// Create new empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Set error behavior
    pub fn with_errors(mut self, behavior: ErrorBehavior) -> Self {
        self.errors = behavior;
        self
    }

    /// Set wantlist flag
    pub fn with_wantlist(mut self, wantlist: bool) -> Self {
        self.wantlist = wantlist;
        self
    }
}

/// Interpret a value as a boolean the way playbook options are interpreted.
pub fn parse_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.to_lowercase().as_str() {
            "true" | "yes" | "1" | "on" => Some(true),
            "false" | "no" | "0" | "off" => Some(false),
            _ => None,
        },
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Behavior when lookup encounters an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorBehavior {
    /// Raise an error (default)
    #[default]
    Strict,
    /// Return empty list on error
    Ignore,
    /// Log warning and return empty list
    Warn,
}

impl fmt::Display for ErrorBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorBehavior::Strict => write!(f, "strict"),
            ErrorBehavior::Ignore => write!(f, "ignore"),
            ErrorBehavior::Warn => write!(f, "warn"),
        }
    }
}

impl std::str::FromStr for ErrorBehavior {
    type Err = LookupError;

    fn from_str(s: &str) -> LookupResult<Self> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(ErrorBehavior::Strict),
            "ignore" => Ok(ErrorBehavior::Ignore),
            "warn" => Ok(ErrorBehavior::Warn),
            other => Err(LookupError::invalid_option(
                "errors",
                format!("expected strict, ignore or warn, got '{}'", other),
            )),
        }
    }
}

// ============================================================================
// Lookup Context
// ============================================================================

/// Per-call context handed to lookups.
///
/// Carries nothing yet; plugins receive it so new context can be added
/// without changing the trait.
#[derive(Debug, Clone, Default)]
pub struct LookupContext {}

impl LookupContext {
    /// Create a new context
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// Lookup Plugin Trait
// ============================================================================

/// Trait that all lookup plugins must implement
pub trait LookupPlugin: Send + Sync + fmt::Debug {
    /// Returns the name of the lookup plugin
    fn name(&self) -> &'static str;

    /// Returns a description of what the lookup does
    fn description(&self) -> &'static str;

    /// Execute the lookup with the given terms and options
    ///
    /// # Arguments
    ///
    /// * `terms` - The lookup terms, positional or by name
    /// * `options` - Keyword options passed to the lookup
    /// * `context` - Per-call execution context
    ///
    /// # Returns
    ///
    /// A vector of JSON values; lookups always return a list
    fn lookup(
        &self,
        terms: &LookupTerms,
        options: &LookupOptions,
        context: &LookupContext,
    ) -> LookupResult<Vec<Value>>;

    /// Returns example usage for documentation
    fn examples(&self) -> Vec<&'static str> {
        vec![]
    }

    /// Returns the accepted parameters, in positional order
    fn available_options(&self) -> Vec<LookupOptionInfo> {
        vec![]
    }
}

/// Information about a lookup option
#[derive(Debug, Clone)]
pub struct LookupOptionInfo {
    /// Option name
    pub name: &'static str,
    /// Option description
    pub description: &'static str,
    /// Option type
    pub option_type: &'static str,
    /// Default value as string
    pub default: Option<&'static str>,
    /// Whether the option is required
    pub required: bool,
}

impl LookupOptionInfo {
    /// Create a new option info
    pub fn new(
        name: &'static str,
        description: &'static str,
        option_type: &'static str,
    ) -> Self {
        Self {
            name,
            description,
            option_type,
            default: None,
            required: false,
        }
    }

    /// Set default value
    pub fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    /// Mark as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

// ============================================================================
// Argument Binding
// ============================================================================

/// Terms bound to parameter names.
#[derive(Debug, Clone, Default)]
pub struct BoundArguments {
    values: IndexMap<&'static str, Value>,
}

impl BoundArguments {
    /// Get a bound value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Get a bound value that must be present
    pub fn required(&self, name: &str) -> LookupResult<&Value> {
        self.get(name)
            .ok_or_else(|| LookupError::MissingArgument(name.to_string()))
    }

    /// Get a string parameter; `null` counts as absent
    pub fn string(&self, name: &str) -> LookupResult<Option<&str>> {
        match self.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(LookupError::invalid_option(
                name,
                format!("must be a string, got {}", other),
            )),
        }
    }

    /// Get a boolean parameter; `null` counts as absent
    pub fn bool(&self, name: &str) -> LookupResult<Option<bool>> {
        match self.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => parse_bool(value).map(Some).ok_or_else(|| {
                LookupError::invalid_option(name, format!("must be a boolean, got {}", value))
            }),
        }
    }

    /// Number of bound parameters
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing was bound
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Bind `terms` and keyword `options` to the declared `params`.
///
/// Positional terms fill parameters in declaration order. A keyword term
/// mapping is merged with the keyword options, the options taking precedence.
/// Keyword options may not repeat a parameter that was already given
/// positionally. Parameters marked required must end up bound.
pub fn bind_arguments(
    params: &[LookupOptionInfo],
    terms: &LookupTerms,
    options: &LookupOptions,
) -> LookupResult<BoundArguments> {
    let mut bound = BoundArguments::default();
    let param = |name: &str| {
        params
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| LookupError::UnexpectedArgument(name.to_string()))
    };

    match terms {
        LookupTerms::Positional(values) => {
            if values.len() > params.len() {
                return Err(LookupError::UnexpectedArgument(format!(
                    "expected at most {} positional terms, got {}",
                    params.len(),
                    values.len()
                )));
            }
            for (info, value) in params.iter().zip(values) {
                bound.values.insert(info.name, value.clone());
            }
        }
        LookupTerms::Keyword(map) => {
            for (name, value) in map {
                bound.values.insert(param(name)?.name, value.clone());
            }
        }
    }

    for (name, value) in &options.options {
        let info = param(name)?;
        if matches!(terms, LookupTerms::Positional(_)) && bound.values.contains_key(info.name) {
            return Err(LookupError::DuplicateArgument(name.clone()));
        }
        bound.values.insert(info.name, value.clone());
    }

    if let Some(missing) = params
        .iter()
        .find(|p| p.required && !bound.values.contains_key(p.name))
    {
        return Err(LookupError::MissingArgument(missing.name.to_string()));
    }

    Ok(bound)
}

// ============================================================================
// Lookup Registry
// ============================================================================

/// Collection namespaces whose plugins resolve to the built-in lookups.
pub const COLLECTION_NAMESPACES: &[&str] = &["ansible.utils", "rustible.utils"];

/// Strip a known collection namespace from a fully qualified plugin name.
pub fn short_name(name: &str) -> &str {
    COLLECTION_NAMESPACES
        .iter()
        .find_map(|ns| name.strip_prefix(*ns)?.strip_prefix('.'))
        .unwrap_or(name)
}

/// Registry for managing lookup plugins
#[derive(Debug, Default)]
pub struct LookupRegistry {
    plugins: HashMap<String, Arc<dyn LookupPlugin>>,
}

impl LookupRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with all built-in plugins
    pub fn with_builtins() -> Self {
        let factory = LookupFactory::new();
        let mut registry = Self::new();
        for name in LookupFactory::builtin_names() {
            if let Some(plugin) = factory.create(name) {
                registry.register_arc(plugin);
            }
        }
        registry
    }

    /// Register a lookup plugin
    pub fn register<P: LookupPlugin + 'static>(&mut self, plugin: P) {
        self.register_arc(Arc::new(plugin));
    }

    /// Register a shared lookup plugin
    pub fn register_arc(&mut self, plugin: Arc<dyn LookupPlugin>) {
        self.plugins.insert(plugin.name().to_string(), plugin);
    }

    /// Get a lookup plugin by name or fully qualified name
    pub fn get(&self, name: &str) -> Option<Arc<dyn LookupPlugin>> {
        self.plugins
            .get(name)
            .or_else(|| self.plugins.get(short_name(name)))
            .cloned()
    }

    /// List all registered plugin names, sorted
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.plugins.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Execute a lookup by plugin name
    pub fn lookup(
        &self,
        name: &str,
        terms: &LookupTerms,
        context: &LookupContext,
    ) -> LookupResult<Vec<Value>> {
        self.lookup_with_options(name, terms, &LookupOptions::default(), context)
    }

    /// Execute a lookup with options
    pub fn lookup_with_options(
        &self,
        name: &str,
        terms: &LookupTerms,
        options: &LookupOptions,
        context: &LookupContext,
    ) -> LookupResult<Vec<Value>> {
        let plugin = self
            .get(name)
            .ok_or_else(|| LookupError::NotFound(name.to_string()))?;

        debug!(
            lookup = plugin.name(),
            terms = terms.len(),
            errors = %options.errors,
            "Running lookup"
        );

        match (plugin.lookup(terms, options, context), options.errors) {
            (Ok(values), _) => Ok(values),
            (Err(e), ErrorBehavior::Strict) => Err(e),
            (Err(e), ErrorBehavior::Warn) => {
                warn!("Lookup '{}' failed: {}", plugin.name(), e);
                Ok(Vec::new())
            }
            (Err(_), ErrorBehavior::Ignore) => Ok(Vec::new()),
        }
    }
}

// ============================================================================
// Prelude Module
// ============================================================================

/// Convenient re-exports for lookup development and usage.
pub mod prelude {
    pub use super::{
        bind_arguments, BoundArguments, ErrorBehavior, GetPathLookup, LookupContext, LookupError,
        LookupFactory, LookupOptionInfo, LookupOptions, LookupPlugin, LookupRegistry,
        LookupResult, LookupTerms, ToPathsLookup,
    };
}

// ============================================================================
// Unit Tests
// ============================================================================
