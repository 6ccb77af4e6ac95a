//! Jinja2-compatible filter plugins for rustible-utils.
//!
//! - **paths**: Path flattening and resolution (`to_paths`, `get_path`)
//!
//! # Usage
//!
//! ```rust,ignore
//! use rustible_utils::plugins::filter::FilterRegistry;
//! use minijinja::Environment;
//!
//! let mut env = Environment::new();
//! FilterRegistry::register_all(&mut env);
//! ```
//!
//! # Ansible Compatibility
//!
//! The filters mirror the `ansible.utils` collection's `to_paths` and
//! `get_path` filters, including their `prepend` and `wantlist` arguments.

pub mod paths;

use minijinja::Environment;

/// Registry for managing and registering filter plugins.
pub struct FilterRegistry;

impl FilterRegistry {
    /// Register all available filters with the given environment.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use minijinja::Environment;
    /// use rustible_utils::plugins::filter::FilterRegistry;
    ///
    /// let mut env = Environment::new();
    /// FilterRegistry::register_all(&mut env);
    /// ```
    pub fn register_all(env: &mut Environment<'static>) {
        paths::register_filters(env);
    }

    /// Register only the path filters.
    pub fn register_paths(env: &mut Environment<'static>) {
        paths::register_filters(env);
    }

    /// Names of the filters registered by [`FilterRegistry::register_all`].
    pub fn names() -> &'static [&'static str] {
        &["to_paths", "get_path"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_register_all_filters() {
        let mut env = Environment::new();
        FilterRegistry::register_all(&mut env);

        env.add_template("to_paths_test", "{{ a | to_paths(prepend='a') }}")
            .unwrap();
        env.add_template("get_path_test", "{{ a | get_path('b') }}")
            .unwrap();

        let tmpl = env.get_template("get_path_test").unwrap();
        let result = tmpl.render(context! { a => context! { b => 42 } }).unwrap();
        assert_eq!(result, "42");
    }

    #[test]
    fn test_selective_registration() {
        let mut env = Environment::new();
        FilterRegistry::register_paths(&mut env);

        for name in FilterRegistry::names() {
            let source = format!("{{{{ {{'k': [1]}} | {}('k') }}}}", name);
            assert!(env.render_str(&source, ()).is_ok(), "filter {} missing", name);
        }
    }
}
