//! Benchmarks for descriptor acquisition and lookups.
//!
//! - Warm lookups on a materialized descriptor (the interop fast path)
//! - Cache hits in `DescriptorCache::acquire`
//! - First-time member table construction over a deep hierarchy

extern crate classdesc;

use classdesc::prelude::*;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::{hint::black_box, sync::Arc};

/// A class with a few overloads, statics and constructors on top of a short superclass chain.
fn fixture(runtime: &HostRuntime, loader: &ClassLoader) -> HostClassRc {
    let mut parent = runtime.root().clone();
    for level in 0..4 {
        parent = ClassBuilder::new(format!("Base{level}"))
            .extends(&parent)
            .method(format!("inherited{level}"), |m| m.public().returns("int"))
            .method("shared", |m| m.public().param(format!("T{level}")))
            .build(loader)
            .unwrap();
    }

    ClassBuilder::new("Target")
        .extends(&parent)
        .default_constructor()
        .constructor(|c| c.public().param("int"))
        .method("get", |m| m.public().returns("int"))
        .method("set", |m| m.public().param("int"))
        .method("set", |m| m.public().param("long"))
        .method("valueOf", |m| m.public().static_().param("String").returns("Target"))
        .build(loader)
        .unwrap()
}

/// Lookups on an already materialized descriptor.
fn bench_warm_lookup(c: &mut Criterion) {
    let runtime = HostRuntime::new().unwrap();
    let loader = runtime.loader("bench");
    let class = fixture(&runtime, &loader);
    let desc = runtime.describe(&class);
    desc.member_table().unwrap();

    c.bench_function("lookup_method_hit", |b| {
        b.iter(|| black_box(desc.lookup_method(black_box("set")).unwrap()));
    });

    c.bench_function("lookup_method_miss", |b| {
        b.iter(|| black_box(desc.lookup_method(black_box("missing")).unwrap()));
    });

    c.bench_function("lookup_static_method", |b| {
        b.iter(|| black_box(desc.lookup_static_method(black_box("valueOf")).unwrap()));
    });

    c.bench_function("lookup_constructor", |b| {
        b.iter(|| black_box(desc.lookup_constructor().unwrap()));
    });
}

/// `acquire` on a class whose descriptor is already cached.
fn bench_cache_hit(c: &mut Criterion) {
    let runtime = HostRuntime::new().unwrap();
    let loader = runtime.loader("bench");
    let class = fixture(&runtime, &loader);
    runtime.describe(&class);

    c.bench_function("cache_acquire_hit", |b| {
        b.iter(|| black_box(runtime.descriptors().acquire(black_box(&class))));
    });
}

/// First lookup through a fresh cache, including the hierarchy walk.
fn bench_materialize(c: &mut Criterion) {
    let runtime = HostRuntime::new().unwrap();
    let loader = runtime.loader("bench");
    let class = fixture(&runtime, &loader);
    let reflector: Arc<dyn Reflector> = Arc::new(HierarchyReflector::new(runtime.root()));

    c.bench_function("materialize_member_table", |b| {
        b.iter_batched(
            || DescriptorCache::with_config(reflector.clone(), DescriptorConfig::default()),
            |cache| {
                let desc = cache.acquire(&class);
                black_box(desc.lookup_method("set").unwrap().map(MethodDesc::len));
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_warm_lookup,
    bench_cache_hit,
    bench_materialize
);
criterion_main!(benches);
