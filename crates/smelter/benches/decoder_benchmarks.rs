//! Decoder performance benchmarks.
//!
//! Measures scanning and full decode-and-normalize throughput on
//! synthetic model output of various sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use smelter::{decode_and_normalize, extract};

/// Generate a table response with the specified number of columns,
/// wrapped in prose and a code fence like real model output.
fn generate_response(cols: usize) -> String {
    let mut columns = String::new();
    for i in 0..cols {
        if i > 0 {
            columns.push(',');
        }
        columns.push_str(&format!(
            r#"{{"name": "column_{i}", "type": "varchar", "isNullable": true}}"#
        ));
    }
    format!(
        "Sure! Here is the schema you asked for.\n```json\n{{\"label\": \"bench\", \"columns\": [{columns}]}}\n```\nLet me know if you need changes."
    )
}

/// Benchmark the balanced-value scan alone.
fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");

    for cols in [10, 100, 1_000].iter() {
        let text = generate_response(*cols);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("columns", cols), &text, |b, text| {
            b.iter(|| extract::scan(black_box(text)));
        });
    }

    group.finish();
}

/// Benchmark the full pipeline, clean and well-formed input.
fn bench_decode_and_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_and_normalize");

    for cols in [10, 100, 1_000].iter() {
        let text = generate_response(*cols);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("columns", cols), &text, |b, text| {
            b.iter(|| decode_and_normalize(black_box(text), "create bench table", ""));
        });
    }

    group.finish();
}

/// Benchmark the repair retry path on input with missing commas.
fn bench_repair_path(c: &mut Criterion) {
    let broken = generate_response(100).replace("},{", "} {");

    c.bench_function("decode_with_repair", |b| {
        b.iter(|| decode_and_normalize(black_box(&broken), "create bench table", ""));
    });
}

criterion_group!(
    benches,
    bench_scan,
    bench_decode_and_normalize,
    bench_repair_path
);
criterion_main!(benches);
