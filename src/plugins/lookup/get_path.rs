//! get_path Lookup Plugin
//!
//! Retrieves the value found at a path expression such as
//! `interfaces.interface[0].config['auto-negotiate']`; the counterpart of
//! `to_paths`.
//!
//! # Usage
//!
//! ```yaml
//! - set_fact:
//!     mtu: "{{ lookup('ansible.utils.get_path', result, 'interfaces.interface[0].config.mtu') }}"
//! ```

use super::{
    bind_arguments, LookupContext, LookupOptionInfo, LookupOptions, LookupPlugin, LookupResult,
    LookupTerms,
};
use crate::paths;
use serde_json::Value;

/// Path resolution lookup plugin
#[derive(Debug, Clone, Default)]
pub struct GetPathLookup;

impl GetPathLookup {
    /// Create a new GetPathLookup instance
    pub fn new() -> Self {
        Self
    }
}

impl LookupPlugin for GetPathLookup {
    fn name(&self) -> &'static str {
        "get_path"
    }

    fn description(&self) -> &'static str {
        "Retrieve the value in a variable using a path"
    }

    fn lookup(
        &self,
        terms: &LookupTerms,
        options: &LookupOptions,
        _context: &LookupContext,
    ) -> LookupResult<Vec<Value>> {
        let args = bind_arguments(&self.available_options(), terms, options)?;
        let var = args.required("var")?;
        let path = args
            .string("path")?
            .ok_or_else(|| super::LookupError::MissingArgument("path".to_string()))?;
        let wantlist = args.bool("wantlist")?.unwrap_or(false);

        match paths::get_path_wantlist(var, path, wantlist)? {
            Value::Array(items) => Ok(items),
            other => Ok(vec![other]),
        }
    }

    fn examples(&self) -> Vec<&'static str> {
        vec![
            "{{ lookup('ansible.utils.get_path', a, 'b.c.d[0]') }}",
            "{{ query('ansible.utils.get_path', a, path='b.c.e') }}",
        ]
    }

    fn available_options(&self) -> Vec<LookupOptionInfo> {
        vec![
            LookupOptionInfo::new("var", "The variable to read from", "raw").required(),
            LookupOptionInfo::new("path", "The path expression to resolve", "str").required(),
            LookupOptionInfo::new("wantlist", "Always return a list", "bool")
                .with_default("false"),
        ]
    }
}
