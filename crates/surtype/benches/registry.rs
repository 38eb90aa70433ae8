// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use surtype::{ParamNode, SurfaceRegistry, TypeNode};

fn prim(name: &str) -> TypeNode {
    TypeNode::primitive(name, format!("bench.{}", name))
}

/// A medium product tree: 12 fields over a handful of shared primitives.
fn sensor_node() -> TypeNode {
    let params = (0..12)
        .map(|i| {
            let ty = match i % 3 {
                0 => prim("Id"),
                1 => prim("Float"),
                _ => TypeNode::generic("List", "bench.List", vec![prim("Str")]),
            };
            ParamNode::new(format!("field_{}", i), ty)
        })
        .collect();
    TypeNode::product("Sensor", "bench.Sensor", params)
}

/// Benchmark: hot-path lookup of an already-constructed surface.
fn bench_surface_of_hit(c: &mut Criterion) {
    c.bench_function("surface_of_hit", |b| {
        let registry = SurfaceRegistry::new();
        let node = sensor_node();
        registry.surface_of(&node).unwrap();
        b.iter(|| registry.surface_of(black_box(&node)).unwrap())
    });
}

/// Benchmark: first-time construction (key computation + pass + intern).
fn bench_surface_of_cold(c: &mut Criterion) {
    c.bench_function("surface_of_cold", |b| {
        let node = sensor_node();
        b.iter_batched(
            SurfaceRegistry::new,
            |registry| registry.surface_of(black_box(&node)).unwrap(),
            BatchSize::SmallInput,
        )
    });
}

/// Benchmark: recursive construction with cycle back-patching.
fn bench_surface_of_recursive(c: &mut Criterion) {
    c.bench_function("surface_of_recursive", |b| {
        let node = TypeNode::product(
            "Node",
            "bench.Node",
            vec![
                ParamNode::new("value", prim("Id")),
                ParamNode::new("next", TypeNode::reference("Node", "bench.Node")),
            ],
        );
        b.iter_batched(
            SurfaceRegistry::new,
            |registry| registry.surface_of(black_box(&node)).unwrap(),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_surface_of_hit,
    bench_surface_of_cold,
    bench_surface_of_recursive
);
criterion_main!(benches);
