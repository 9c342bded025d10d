use ajson::{convert, value, Encoder, Value};
use chrono::TimeZone;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn flat_object(fields: usize) -> Value {
    Value::object((0..fields).map(|i| (format!("field{}", i), Value::from(i as i64))))
}

fn deep_chain(depth: usize) -> Value {
    let mut node = value!({ "leaf": true });
    for _ in 0..depth {
        node = Value::object([("next", node)]);
    }
    node
}

fn shared_fanout(width: usize) -> Value {
    // One shared sub-object referenced from every slot; everything past
    // the first visit collapses to a back-reference.
    let shared = value!({ "payload": [1, 2, 3] });
    Value::array((0..width).map(|_| shared.clone()))
}

fn benchmark_convert_simple(c: &mut Criterion) {
    let user = value!({
        "id": 123,
        "name": "Alice",
        "email": "alice@example.com",
        "active": true
    });

    c.bench_function("convert_simple_object", |b| {
        b.iter(|| convert(black_box(&user)))
    });
}

fn benchmark_convert_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_wide_object");

    for size in [10, 50, 100, 500].iter() {
        let obj = flat_object(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &obj, |b, obj| {
            b.iter(|| convert(black_box(obj)))
        });
    }
    group.finish();
}

fn benchmark_convert_deep(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_deep_chain");

    for depth in [10, 50, 100].iter() {
        let obj = deep_chain(*depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &obj, |b, obj| {
            b.iter(|| convert(black_box(obj)))
        });
    }
    group.finish();
}

fn benchmark_convert_shared(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_shared_fanout");

    for width in [10, 100, 1000].iter() {
        let arr = shared_fanout(*width);
        group.bench_with_input(BenchmarkId::from_parameter(width), &arr, |b, arr| {
            b.iter(|| convert(black_box(arr)))
        });
    }
    group.finish();
}

fn benchmark_convert_cyclic(c: &mut Criterion) {
    let root = value!({ "name": "loop" });
    root.insert("me", root.clone());

    c.bench_function("convert_cyclic_object", |b| {
        b.iter(|| convert(black_box(&root)))
    });
}

fn benchmark_convert_exotics(c: &mut Criterion) {
    let dt = chrono::Utc.timestamp_millis_opt(1_000_000_000_000).unwrap();
    let exotic = Value::array([
        Value::date(dt),
        Value::pattern("[a-z]+", "gi"),
        Value::symbol("token"),
        Value::bytes(vec![0u8; 64]),
        Value::from(f64::NAN),
        Value::Undefined,
        Value::map([(Value::from("k"), Value::from(1))]),
        Value::set([Value::from(1), Value::from(2)]),
    ]);

    c.bench_function("convert_exotic_leaves", |b| {
        b.iter(|| convert(black_box(&exotic)))
    });
}

fn benchmark_encoder_reuse(c: &mut Criterion) {
    let obj = flat_object(100);

    let mut group = c.benchmark_group("encoder_setup");

    group.bench_function("fresh_encoder_per_call", |b| {
        b.iter(|| Encoder::standard().convert(black_box(&obj)))
    });

    let encoder = Encoder::standard();
    group.bench_function("reused_encoder", |b| {
        b.iter(|| encoder.convert(black_box(&obj)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_convert_simple,
    benchmark_convert_wide,
    benchmark_convert_deep,
    benchmark_convert_shared,
    benchmark_convert_cyclic,
    benchmark_convert_exotics,
    benchmark_encoder_reuse
);
criterion_main!(benches);
