//! Path flattening and resolution tests for rustible-utils
//!
//! This test suite covers:
//! - Flattening nested mappings and sequences into dot/bracket paths
//! - Prefixing paths with `prepend`
//! - `wantlist` result shaping
//! - Quoting of keys that are not identifiers
//! - Resolving every flattened path back with `get_path`
//! - Lookup plugin invocation through the registry

use pretty_assertions::assert_eq;
use rustible_utils::paths::{flatten, get_path, get_path_wantlist, to_paths, Path, Segment};
use rustible_utils::plugins::lookup::prelude::*;
use rustible_utils::Error;
use serde_json::{json, Map, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn nested() -> Value {
    json!({"b": {"c": {"d": [0, 1], "e": [true, false]}}})
}

fn openconfig_interfaces() -> Value {
    json!({
        "interfaces": {
            "interface": [
                {
                    "name": "eth1/71",
                    "config": {"name": "eth1/71", "mtu": "1500", "enabled": true},
                    "ethernet": {"config": {"auto-negotiate": "true", "port-speed": null}}
                },
                {
                    "name": "eth1/72",
                    "config": {"name": "eth1/72", "mtu": 9216, "enabled": false},
                    "ethernet": {"config": {"auto-negotiate": "false", "port-speed": 10.5}}
                }
            ]
        }
    })
}

fn as_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a mapping, got {}", other),
    }
}

// =============================================================================
// Flattening
// =============================================================================

#[test]
fn test_flatten_nested_mapping() {
    let result = to_paths(&nested(), None, false);
    assert_eq!(
        result,
        json!({
            "b.c.d[0]": 0,
            "b.c.d[1]": 1,
            "b.c.e[0]": true,
            "b.c.e[1]": false
        })
    );
}

#[test]
fn test_flatten_with_prepend() {
    let result = to_paths(&nested(), Some("a"), false);
    assert_eq!(
        result,
        json!({
            "a.b.c.d[0]": 0,
            "a.b.c.d[1]": 1,
            "a.b.c.e[0]": true,
            "a.b.c.e[1]": false
        })
    );
}

#[test]
fn test_flatten_hyphenated_key_uses_brackets() {
    let input = json!({"ethernet": {"config": {"auto-negotiate": "true"}}});
    assert_eq!(
        to_paths(&input, None, false),
        json!({"ethernet.config['auto-negotiate']": "true"})
    );
}

#[test]
fn test_flatten_bare_scalar() {
    assert_eq!(to_paths(&json!(42), None, false), json!({"": 42}));
    assert_eq!(to_paths(&json!("x"), Some("name"), false), json!({"name": "x"}));
}

#[test]
fn test_flatten_wantlist_wraps_mapping() {
    for input in [nested(), json!({}), json!([1]), json!(null)] {
        let result = to_paths(&input, None, true);
        let items = result.as_array().expect("wantlist returns a list");
        assert_eq!(items.len(), 1);
        assert!(items[0].is_object());
    }
}

#[test]
fn test_flatten_empty_containers() {
    assert!(flatten(&json!({}), None).is_empty());
    assert!(flatten(&json!([]), None).is_empty());
    assert!(flatten(&json!({"a": {}, "b": []}), Some("x")).is_empty());
}

#[test]
fn test_flatten_preserves_input_order() {
    let input = json!({"z": 1, "a": {"y": 2, "b": 3}, "m": [4]});
    let keys: Vec<String> = flatten(&input, None).into_keys().collect();
    assert_eq!(keys, vec!["z", "a.y", "a.b", "m[0]"]);
}

#[test]
fn test_flatten_openconfig_document() {
    let flat = flatten(&openconfig_interfaces(), None);

    assert_eq!(flat["interfaces.interface[0].config.mtu"], json!("1500"));
    assert_eq!(flat["interfaces.interface[1].config.mtu"], json!(9216));
    assert_eq!(
        flat["interfaces.interface[1].ethernet.config['auto-negotiate']"],
        json!("false")
    );
    assert_eq!(
        flat["interfaces.interface[0].ethernet.config['port-speed']"],
        json!(null)
    );
    assert_eq!(flat.len(), 12);
}

#[test]
fn test_flatten_quotes_awkward_keys() {
    let input = json!({"root": {"it's": 1, "back\\slash": 2, "0": 3, "": 4, "with space": 5}});
    let flat = flatten(&input, None);
    let keys: Vec<&str> = flat.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            r"root['it\'s']",
            r"root['back\\slash']",
            "root['0']",
            "root['']",
            "root['with space']",
        ]
    );
}

#[test]
fn test_flatten_is_idempotent() {
    let once = to_paths(&openconfig_interfaces(), Some("result"), false);
    let twice = to_paths(&once, None, false);
    assert_eq!(once, twice);
}

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn test_every_flattened_path_resolves() {
    let data = openconfig_interfaces();
    for (path, leaf) in flatten(&data, None) {
        assert_eq!(get_path(&data, &path).unwrap(), &leaf, "path {}", path);
    }
}

#[test]
fn test_get_path_containers_and_wantlist() {
    let data = nested();
    assert_eq!(get_path(&data, "b.c.e").unwrap(), &json!([true, false]));
    assert_eq!(get_path(&data, "b['c'][\"d\"]").unwrap(), &json!([0, 1]));
    assert_eq!(get_path_wantlist(&data, "b.c.d[0]", true).unwrap(), json!([0]));
}

#[test]
fn test_get_path_errors() {
    let data = nested();

    let err = get_path(&data, "b.c.x").unwrap_err();
    assert!(matches!(err, Error::PathNotFound { ref segment, .. } if segment == "b.c.x"));

    let err = get_path(&data, "b.c.d[5]").unwrap_err();
    assert!(matches!(err, Error::PathNotFound { .. }));

    let err = get_path(&data, "b.c.d[x]").unwrap_err();
    assert!(matches!(err, Error::InvalidPath { .. }));
    assert!(err.is_argument_error());
}

#[test]
fn test_path_model_round_trip() {
    let path = Path::from_segments(vec![
        Segment::from("interfaces"),
        Segment::Index(0),
        Segment::from("auto-negotiate"),
    ]);
    assert_eq!(path.to_string(), "interfaces[0]['auto-negotiate']");
    assert_eq!("interfaces[0]['auto-negotiate']".parse::<Path>().unwrap(), path);
}

// =============================================================================
// Lookup Plugins
// =============================================================================

#[test]
fn test_lookup_to_paths_by_fqcn() {
    let registry = LookupRegistry::with_builtins();
    let terms = LookupTerms::from(vec![nested(), json!("a")]);

    let result = registry
        .lookup("ansible.utils.to_paths", &terms, &LookupContext::new())
        .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(
        as_object(result[0].clone()).keys().collect::<Vec<_>>(),
        vec!["a.b.c.d[0]", "a.b.c.d[1]", "a.b.c.e[0]", "a.b.c.e[1]"]
    );
}

#[test]
fn test_lookup_to_paths_keyword_terms() {
    let mut terms = Map::new();
    terms.insert("var".to_string(), json!({"x-y": {"z": 1}}));
    terms.insert("wantlist".to_string(), json!(true));

    let result = LookupRegistry::with_builtins()
        .lookup("to_paths", &LookupTerms::from(terms), &LookupContext::new())
        .unwrap();
    assert_eq!(result, vec![json!({"x-y.z": 1})]);
}

#[test]
fn test_lookup_to_paths_argument_errors() {
    let registry = LookupRegistry::with_builtins();
    let ctx = LookupContext::new();

    let err = registry
        .lookup("to_paths", &LookupTerms::default(), &ctx)
        .unwrap_err();
    assert!(matches!(err, LookupError::MissingArgument(_)));

    let options = LookupOptions::new().with_option("prepend", "b");
    let terms = LookupTerms::from(vec![json!({}), json!("a")]);
    let err = registry
        .lookup_with_options("to_paths", &terms, &options, &ctx)
        .unwrap_err();
    assert!(matches!(err, LookupError::DuplicateArgument(_)));
    assert!(err.is_argument_error());
}

#[test]
fn test_lookup_to_paths_empty_input() {
    let result = LookupRegistry::with_builtins()
        .lookup(
            "to_paths",
            &LookupTerms::from(vec![json!({})]),
            &LookupContext::new(),
        )
        .unwrap();
    assert_eq!(result, vec![json!({})]);
}

#[test]
fn test_lookup_get_path() {
    let registry = LookupRegistry::with_builtins();
    let terms = LookupTerms::from(vec![
        openconfig_interfaces(),
        json!("interfaces.interface[1].config.enabled"),
    ]);
    let result = registry
        .lookup("rustible.utils.get_path", &terms, &LookupContext::new())
        .unwrap();
    assert_eq!(result, vec![json!(false)]);
}
