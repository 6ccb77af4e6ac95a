//! Fuzz target for path flattening.
//!
//! Builds arbitrary nested documents and checks that every flattened path
//! resolves back to the leaf it was paired with.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rustible_utils::paths::{flatten, get_path};
use serde_json::{Map, Value};

/// Arbitrary document node
#[derive(Debug, Clone, Arbitrary)]
enum FuzzNode {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<FuzzNode>),
    Dict(Vec<(String, FuzzNode)>),
}

impl FuzzNode {
    fn into_value(self, depth: usize) -> Value {
        match self {
            FuzzNode::Null => Value::Null,
            FuzzNode::Bool(b) => Value::Bool(b),
            FuzzNode::Int(n) => Value::from(n),
            FuzzNode::Float(f) => serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FuzzNode::Str(s) => Value::String(s),
            _ if depth > 32 => Value::Null,
            FuzzNode::List(items) => {
                Value::Array(items.into_iter().map(|n| n.into_value(depth + 1)).collect())
            }
            FuzzNode::Dict(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(k, n)| (k, n.into_value(depth + 1)))
                    .collect::<Map<_, _>>(),
            ),
        }
    }
}

fuzz_target!(|node: FuzzNode| {
    let value = node.into_value(0);

    for (path, leaf) in flatten(&value, Some("v")) {
        let rest = &path[1..];
        match get_path(&value, rest) {
            Ok(found) => assert_eq!(found, &leaf, "path {:?}", path),
            Err(e) => panic!("path {:?} did not resolve: {}", path, e),
        }
    }
});
