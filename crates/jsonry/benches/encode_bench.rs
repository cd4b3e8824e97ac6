use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use jsonry::reflect::{Accessor, TypeInfo, Typed};
use jsonry::{Options, Registry};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
struct Row {
    id: u64,
    name: String,
    score: f64,
    tags: Vec<String>,
    active: bool,
}

impl Typed for Row {
    fn type_info() -> TypeInfo {
        TypeInfo::class::<Row>().with_accessors(|| {
            vec![
                Accessor::borrowed("get_id", |r: &Row| &r.id),
                Accessor::borrowed("get_name", |r: &Row| &r.name),
                Accessor::borrowed("get_score", |r: &Row| &r.score),
                Accessor::borrowed("get_tags", |r: &Row| &r.tags),
                Accessor::borrowed("is_active", |r: &Row| &r.active),
            ]
        })
    }
}

jsonry::impl_reflect!(Row);

fn rows(n: usize) -> Vec<Row> {
    (0..n)
        .map(|i| Row {
            id: i as u64,
            name: format!("row \"{i}\"\n"),
            score: i as f64 * 0.25,
            tags: vec!["a".into(), format!("t{}", i % 7)],
            active: i % 2 == 0,
        })
        .collect()
}

fn nested(depth: usize, breadth: usize) -> Value {
    if depth == 0 {
        return Value::from(1);
    }
    let mut m = serde_json::Map::new();
    for i in 0..breadth {
        m.insert(format!("k{i}"), nested(depth - 1, breadth));
    }
    Value::Object(m)
}

fn registries() -> [(&'static str, Registry); 3] {
    [
        ("compact", Registry::new()),
        ("pretty", Registry::with_options(Options::pretty())),
        ("fast", Registry::with_options(Options::fast())),
    ]
}

pub fn encode_benchmarks(c: &mut Criterion) {
    let data = rows(1000);
    let tree = nested(4, 4);
    let bytes = Registry::new().to_vec(&data).map(|v| v.len()).unwrap_or(0);

    let mut group = c.benchmark_group("encode");
    group.throughput(Throughput::Bytes(bytes as u64));
    for (name, registry) in registries() {
        group.bench_function(format!("beans::{name}"), |b| {
            b.iter(|| black_box(registry.to_vec(black_box(&data)).unwrap()))
        });
        group.bench_function(format!("serde::{name}"), |b| {
            b.iter(|| {
                let mut out = Vec::with_capacity(bytes);
                jsonry::ser::to_writer(&registry, &mut out, black_box(&data)).unwrap();
                black_box(out)
            })
        });
        group.bench_function(format!("value::{name}"), |b| {
            b.iter(|| black_box(registry.to_vec(black_box(&tree)).unwrap()))
        });
    }
    group.bench_function("serde_json::reference", |b| {
        b.iter(|| black_box(serde_json::to_vec(black_box(&data)).unwrap()))
    });
    group.finish();
}

criterion_group!(benches, encode_benchmarks);
criterion_main!(benches);
