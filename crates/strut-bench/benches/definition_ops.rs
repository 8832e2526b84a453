//! Criterion micro-benchmarks for definition construction and lookup.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use strut_bench::wide_profile;
use strut_core::FieldNumber;

fn bench_layout(c: &mut Criterion) {
    c.bench_function("layout_96_fields", |b| {
        b.iter(|| black_box(wide_profile(96, 16)))
    });
}

fn bench_lookup(c: &mut Criterion) {
    let def = wide_profile(96, 16);

    c.bench_function("find_field_by_name_last", |b| {
        b.iter(|| black_box(def.find_field_by_name(black_box("f95"))))
    });

    c.bench_function("find_field_by_number_last", |b| {
        b.iter(|| black_box(def.find_field_by_number(black_box(FieldNumber(96)))))
    });
}

criterion_group!(benches, bench_layout, bench_lookup);
criterion_main!(benches);
