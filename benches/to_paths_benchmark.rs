//! Path Flattening Benchmarks
//!
//! This benchmark suite measures:
//! - Flattening wide and deep documents
//! - Resolving flattened paths back with `get_path`
//! - The `to_paths` filter and lookup through the template engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rustible_utils::paths::{flatten, get_path};
use rustible_utils::template::TemplateEngine;
use serde_json::{json, Value};

// ============================================================================
// Test Data Generators
// ============================================================================

fn generate_interfaces(count: usize) -> Value {
    let interfaces: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "name": format!("eth1/{}", i),
                "config": {"name": format!("eth1/{}", i), "mtu": 1500, "enabled": i % 2 == 0},
                "ethernet": {"config": {"auto-negotiate": "true", "port-speed": "SPEED_10GB"}},
                "subinterfaces": {"subinterface": [{"index": 0, "ipv4": {"addresses": ["10.0.0.1"]}}]}
            })
        })
        .collect();
    json!({"interfaces": {"interface": interfaces}})
}

fn generate_deep(depth: usize) -> Value {
    let mut nested = json!("leaf_value");
    for i in (0..depth).rev() {
        nested = json!({ format!("level-{}", i): [nested] });
    }
    nested
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten");

    for count in [10, 100, 1000] {
        let data = generate_interfaces(count);
        let leaves = flatten(&data, None).len() as u64;
        group.throughput(Throughput::Elements(leaves));
        group.bench_with_input(BenchmarkId::new("interfaces", count), &data, |b, data| {
            b.iter(|| flatten(black_box(data), Some("result")));
        });
    }

    for depth in [8, 64] {
        let data = generate_deep(depth);
        group.bench_with_input(BenchmarkId::new("deep", depth), &data, |b, data| {
            b.iter(|| flatten(black_box(data), None));
        });
    }

    group.finish();
}

fn bench_get_path(c: &mut Criterion) {
    let data = generate_interfaces(100);
    let paths: Vec<String> = flatten(&data, None).into_keys().collect();

    c.bench_function("get_path/all_leaves", |b| {
        b.iter(|| {
            for path in &paths {
                black_box(get_path(&data, path).ok());
            }
        });
    });
}

fn bench_template(c: &mut Criterion) {
    let engine = TemplateEngine::new();
    let vars = json!({"result": generate_interfaces(50)});

    c.bench_function("template/filter", |b| {
        b.iter(|| engine.evaluate(black_box("result | to_paths(prepend='result')"), &vars));
    });

    c.bench_function("template/lookup", |b| {
        b.iter(|| engine.evaluate(black_box("lookup('ansible.utils.to_paths', result)"), &vars));
    });
}

criterion_group!(benches, bench_flatten, bench_get_path, bench_template);
criterion_main!(benches);
