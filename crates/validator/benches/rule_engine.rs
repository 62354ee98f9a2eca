//! Benchmarks for rule evaluation
//!
//! Measures:
//! - Flat conjunctions over scalar members
//! - ALL / ANY expansion over growing lists
//! - Report rendering on failure vs. status-only passes
//! - Prevalidation overhead

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use serde_json::json;
use std::hint::black_box;
use verdict::prelude::*;

fn flat_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/flat");

    let validator = Validator::new(and([
        member("field1").gte(10),
        member("field2").lt(100),
        member("name").size().gte(3),
        member("mode").in_(range(["fast", "safe"])),
    ]));
    let passing = json!({"field1": 12, "field2": 50, "name": "abcd", "mode": "safe"});
    let failing = json!({"field1": 12, "field2": 500, "name": "abcd", "mode": "safe"});

    group.bench_function("pass", |b| {
        b.iter(|| black_box(validator.status(black_box(&passing))));
    });
    group.bench_function("fail_with_report", |b| {
        b.iter(|| black_box(validator.validate(black_box(&failing))));
    });

    group.finish();
}

fn quantifiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/quantifiers");

    let every = Validator::new(member("items").all().gte(0));
    let some = Validator::new(member("items").any().lt(0));

    for len in [10usize, 100, 1000] {
        let doc = json!({"items": (0..len as i64).collect::<Vec<_>>()});

        group.bench_with_input(BenchmarkId::new("all", len), &doc, |b, doc| {
            b.iter(|| black_box(every.status(doc)));
        });
        group.bench_with_input(BenchmarkId::new("any_miss", len), &doc, |b, doc| {
            b.iter(|| black_box(some.validate(doc)));
        });
    }

    group.finish();
}

fn prevalidation(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/prevalidation");

    let validator = Validator::new(and([
        member("min").lte(member("max")),
        member("max").lte(100),
        member("tags").all().ne(""),
    ]));
    let doc = json!({"min": 1, "max": 10, "tags": ["a", "b", "c"]});
    let candidate = json!(50);
    let at = member("max");

    group.bench_function("scalar_candidate", |b| {
        b.iter(|| black_box(validator.prevalidate(&doc, &at, black_box(&candidate))));
    });
    group.bench_function("full_pass", |b| {
        b.iter(|| black_box(validator.validate(&doc)));
    });

    group.finish();
}

criterion_group!(benches, flat_rules, quantifiers, prevalidation);
criterion_main!(benches);
