use criterion::{criterion_group, criterion_main, Criterion};
use flat_tree::{AncestorResolver, IdIndex, ParentsOptions, Record};
use serde_json::json;

fn build_chain(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| {
            let mut rec = Record::from([("id".to_string(), json!(format!("n{i:05}")))]);
            if i > 0 {
                rec.insert("parent".into(), json!(format!("n{:05}", i - 1)));
            }
            rec
        })
        .collect()
}

fn build_wide(n: usize) -> Vec<Record> {
    let mut records = vec![Record::from([("id".to_string(), json!("root"))])];
    for i in 0..n {
        records.push(Record::from([
            ("id".to_string(), json!(format!("leaf-{i}"))),
            ("parent".to_string(), json!("root")),
        ]));
    }
    records
}

fn bench_index_10k(c: &mut Criterion) {
    let records = build_chain(10_000);
    c.bench_function("id_index_build_10k", |b| {
        b.iter(|| IdIndex::build(&records, "id"))
    });
}

fn bench_parents_from_tip_10k(c: &mut Criterion) {
    let records = build_chain(10_000);
    let resolver = AncestorResolver::new(ParentsOptions::new(9_999));
    c.bench_function("parents_from_tip_10k_chain", |b| {
        b.iter(|| resolver.resolve(&records).unwrap())
    });
}

fn bench_parents_reused_index_10k(c: &mut Criterion) {
    let records = build_chain(10_000);
    let index = IdIndex::build(&records, "id");
    let resolver = AncestorResolver::new(ParentsOptions::new(9_999));
    c.bench_function("parents_from_tip_10k_chain_reused_index", |b| {
        b.iter(|| resolver.resolve_with_index(&records, &index).unwrap())
    });
}

fn bench_parents_wide_10k(c: &mut Criterion) {
    let records = build_wide(10_000);
    let index = IdIndex::build(&records, "id");
    let resolver = AncestorResolver::new(ParentsOptions::new(10_000));
    c.bench_function("parents_leaf_10k_wide", |b| {
        b.iter(|| resolver.resolve_with_index(&records, &index).unwrap())
    });
}

criterion_group!(
    benches,
    bench_index_10k,
    bench_parents_from_tip_10k,
    bench_parents_reused_index_10k,
    bench_parents_wide_10k,
);
criterion_main!(benches);
