//! to_paths Lookup Plugin
//!
//! Flattens a complex object into a dictionary of paths and values. Paths are
//! dot delimited whenever possible; brackets are used for list indices and
//! for keys that contain special characters.
//!
//! # Usage
//!
//! ```yaml
//! - set_fact:
//!     as_lookup: "{{ lookup('ansible.utils.to_paths', a) }}"
//!     with_prefix: "{{ lookup('ansible.utils.to_paths', a, prepend='a') }}"
//! ```
//!
//! # Options
//!
//! - `var` (raw, required): The value to flatten
//! - `prepend` (string): Prefix for every path, usually the variable name
//! - `wantlist` (bool): Always return a list

use super::{
    bind_arguments, LookupContext, LookupOptionInfo, LookupOptions, LookupPlugin, LookupResult,
    LookupTerms,
};
use crate::paths;
use serde_json::Value;

/// Path flattening lookup plugin
#[derive(Debug, Clone, Default)]
pub struct ToPathsLookup;

impl ToPathsLookup {
    /// Create a new ToPathsLookup instance
    pub fn new() -> Self {
        Self
    }
}

impl LookupPlugin for ToPathsLookup {
    fn name(&self) -> &'static str {
        "to_paths"
    }

    fn description(&self) -> &'static str {
        "Flatten a complex object into a dictionary of paths and values"
    }

    fn lookup(
        &self,
        terms: &LookupTerms,
        options: &LookupOptions,
        _context: &LookupContext,
    ) -> LookupResult<Vec<Value>> {
        let args = bind_arguments(&self.available_options(), terms, options)?;
        let var = args.required("var")?;
        let prepend = args.string("prepend")?;
        let wantlist = args.bool("wantlist")?.unwrap_or(false);

        // A list result is handed back as is; anything else becomes the sole
        // element of the lookup's list.
        match paths::to_paths(var, prepend, wantlist) {
            Value::Array(items) => Ok(items),
            other => Ok(vec![other]),
        }
    }

    fn examples(&self) -> Vec<&'static str> {
        vec![
            "{{ lookup('ansible.utils.to_paths', a) }}",
            "{{ lookup('ansible.utils.to_paths', a, prepend='a') }}",
            "{{ query('ansible.utils.to_paths', result.json) }}",
        ]
    }

    fn available_options(&self) -> Vec<LookupOptionInfo> {
        vec![
            LookupOptionInfo::new("var", "The value to flatten", "raw").required(),
            LookupOptionInfo::new("prepend", "Prepend each path entry", "str"),
            LookupOptionInfo::new("wantlist", "Always return a list", "bool")
                .with_default("false"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::lookup::LookupError;
    use serde_json::{json, Map};

    fn run(terms: Vec<Value>, options: LookupOptions) -> LookupResult<Vec<Value>> {
        ToPathsLookup::new().lookup(&LookupTerms::from(terms), &options, &LookupContext::new())
    }

    #[test]
    fn test_lookup_wraps_mapping() {
        let result = run(vec![json!({"b": {"c": [1]}})], LookupOptions::new()).unwrap();
        assert_eq!(result, vec![json!({"b.c[0]": 1})]);
    }

    #[test]
    fn test_lookup_wantlist_not_double_wrapped() {
        let terms = vec![json!({"b": 1}), json!(null), json!(true)];
        let result = run(terms, LookupOptions::new()).unwrap();
        assert_eq!(result, vec![json!({"b": 1})]);

        let options = LookupOptions::new().with_wantlist(true);
        let result = run(vec![json!({"b": 1})], options).unwrap();
        assert_eq!(result, vec![json!({"b": 1})]);
    }

    #[test]
    fn test_lookup_prepend_keyword() {
        let options = LookupOptions::new().with_option("prepend", "a");
        let result = run(vec![json!({"b": {"c": true}})], options).unwrap();
        assert_eq!(result, vec![json!({"a.b.c": true})]);
    }

    #[test]
    fn test_lookup_keyword_terms() {
        let mut map = Map::new();
        map.insert("var".to_string(), json!([1, 2]));
        map.insert("prepend".to_string(), json!("ports"));
        let result = ToPathsLookup::new()
            .lookup(
                &LookupTerms::from(map),
                &LookupOptions::new(),
                &LookupContext::new(),
            )
            .unwrap();
        assert_eq!(result, vec![json!({"ports[0]": 1, "ports[1]": 2})]);
    }

    #[test]
    fn test_lookup_empty_input() {
        assert_eq!(run(vec![json!({})], LookupOptions::new()).unwrap(), vec![json!({})]);
    }

    #[test]
    fn test_lookup_missing_var() {
        let err = run(vec![], LookupOptions::new()).unwrap_err();
        assert!(matches!(err, LookupError::MissingArgument(_)));
    }

    #[test]
    fn test_lookup_prepend_must_be_string() {
        let err = run(vec![json!({}), json!(["a"])], LookupOptions::new()).unwrap_err();
        assert!(matches!(err, LookupError::InvalidOption { ref option, .. } if option == "prepend"));
    }

    #[test]
    fn test_lookup_declares_parameters_in_order() {
        let names: Vec<&str> = ToPathsLookup::new()
            .available_options()
            .iter()
            .map(|o| o.name)
            .collect();
        assert_eq!(names, vec!["var", "prepend", "wantlist"]);
    }
}
