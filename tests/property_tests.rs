//! Property-based tests for rustible-utils using proptest.
//!
//! Generates arbitrary nested documents and checks the invariants that tie
//! flattening and path resolution together.

use proptest::prelude::*;
use rustible_utils::paths::{flatten, get_path, to_paths, Path};
use serde_json::{Map, Value};

// ============================================================================
// Strategies for generating test data
// ============================================================================

/// Strategy for scalar leaves
fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9_ -]{0,20}".prop_map(Value::String),
    ]
}

/// Strategy for keys below the top level, including awkward ones
fn nested_key() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z_][a-zA-Z0-9_]{0,8}",
        "[a-z0-9]{1,4}-[a-z0-9]{1,4}",
        "[0-9]{1,3}",
        "\\PC{0,6}",
        prop::string::string_regex("[.\\[\\]'\"\\\\ ]{1,4}").unwrap(),
    ]
}

/// Strategy for top-level keys, which are written verbatim
fn top_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9_-][a-zA-Z0-9_ -]{0,10}").unwrap()
}

/// Strategy for nested values
fn nested_value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::vec((nested_key(), inner), 0..5)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

/// Strategy for whole documents: a mapping with verbatim-safe top-level keys
fn document() -> impl Strategy<Value = Value> {
    prop::collection::vec((top_key(), nested_value()), 0..5)
        .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>()))
}

fn count_leaves(value: &Value) -> usize {
    match value {
        Value::Object(map) => map.values().map(count_leaves).sum(),
        Value::Array(items) => items.iter().map(count_leaves).sum(),
        _ => 1,
    }
}

fn is_prefix(shorter: &str, longer: &str) -> bool {
    longer.len() > shorter.len()
        && longer.starts_with(shorter)
        && matches!(longer.as_bytes()[shorter.len()], b'.' | b'[')
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_one_entry_per_leaf(value in nested_value()) {
        let flat = flatten(&value, Some("root"));
        prop_assert_eq!(flat.len(), count_leaves(&value));
    }

    #[test]
    fn prop_every_path_resolves_to_its_leaf(doc in document()) {
        for (path, leaf) in flatten(&doc, None) {
            let found = get_path(&doc, &path);
            prop_assert!(found.is_ok(), "path {:?} did not resolve: {:?}", path, found);
            prop_assert_eq!(found.unwrap(), &leaf);
        }
    }

    #[test]
    fn prop_prepended_paths_resolve_under_prefix(value in nested_value()) {
        for (path, leaf) in flatten(&value, Some("var")) {
            let rest = &path["var".len()..];
            prop_assert!(Path::parse(rest).is_ok(), "path {:?} did not parse", path);
            prop_assert_eq!(get_path(&value, rest).ok(), Some(&leaf));
        }
    }

    #[test]
    fn prop_flattening_is_idempotent(doc in document(), prepend in "[a-z]{0,4}") {
        let once = to_paths(&doc, Some(prepend.as_str()), false);
        let twice = to_paths(&once, None, false);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_no_path_is_a_prefix_of_another(value in nested_value()) {
        let flat = flatten(&value, Some("v"));
        let keys: Vec<&String> = flat.keys().collect();
        for a in &keys {
            for b in &keys {
                prop_assert!(!is_prefix(a, b), "{:?} is a prefix of {:?}", a, b);
            }
        }
    }

    #[test]
    fn prop_wantlist_always_single_element(value in nested_value()) {
        let result = to_paths(&value, None, true);
        let items = result.as_array().cloned().unwrap_or_default();
        prop_assert_eq!(items.len(), 1);
        prop_assert!(items[0].is_object());
    }
}
