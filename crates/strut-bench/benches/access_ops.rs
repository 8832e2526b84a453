//! Criterion micro-benchmarks for field access and presence operations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use strut_access::{presence, raw, MessageMut, Value};
use strut_bench::{scalar_profile, wide_profile};

fn bench_raw_triad(c: &mut Criterion) {
    let def = scalar_profile();
    let mut buf = vec![0u8; def.size()];
    let score = def.find_field_by_name("score").unwrap();

    c.bench_function("raw_set_get_double", |b| {
        b.iter(|| unsafe {
            raw::set::<f64>(buf.as_mut_ptr(), black_box(score), black_box(1.5));
            black_box(raw::get::<f64>(buf.as_ptr(), score))
        })
    });
}

fn bench_tagged_triad(c: &mut Criterion) {
    let def = scalar_profile();
    let mut buf = vec![0u8; def.size()];
    let score = def.find_field_by_name("score").unwrap();
    let mut msg = MessageMut::new(&mut buf, &def).unwrap();

    c.bench_function("tagged_set_get_double", |b| {
        b.iter(|| {
            msg.set(black_box(score), Value::Double(black_box(1.5))).unwrap();
            black_box(msg.get(score).unwrap())
        })
    });
}

fn bench_presence(c: &mut Criterion) {
    let def = scalar_profile();
    let mut buf = vec![0u8; def.size()];
    let id = def.find_field_by_name("id").unwrap();

    c.bench_function("presence_set_test_unset", |b| {
        b.iter(|| unsafe {
            presence::set_flag(buf.as_mut_ptr(), black_box(id));
            let hit = presence::is_set(buf.as_ptr(), id);
            presence::unset_flag(buf.as_mut_ptr(), id);
            black_box(hit)
        })
    });
}

fn bench_required_scan(c: &mut Criterion) {
    let def = wide_profile(96, 64);
    let mut buf = vec![0u8; def.size()];
    for f in def.fields() {
        unsafe { presence::set_flag(buf.as_mut_ptr(), f) };
    }

    c.bench_function("required_scan_64_of_96", |b| {
        b.iter(|| unsafe { black_box(presence::all_required_fields_set(buf.as_ptr(), &def)) })
    });
}

criterion_group!(
    benches,
    bench_raw_triad,
    bench_tagged_triad,
    bench_presence,
    bench_required_scan
);
criterion_main!(benches);
