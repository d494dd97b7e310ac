//! Streaming unpack and value lane benchmarks.

use bytes::Bytes;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use ironstruct::StreamBuilder;
use ironstruct_bench::fixtures::sample_buffer;
use ironstruct_channel::lane;
use ironstruct_schema::CompiledSchema;
use std::hint::black_box;

fn benchmark_iter_unpack(c: &mut Criterion) {
    let schema = CompiledSchema::compile("<4096I").expect("Failed to compile");
    let buffer = Bytes::from(sample_buffer(&schema).expect("Failed to pack"));

    let mut group = c.benchmark_group("iter_unpack");
    group.throughput(Throughput::Elements(schema.value_count() as u64));
    for capacity in [1usize, 64, 1024] {
        let builder = StreamBuilder::new().capacity(capacity);
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &builder, |b, builder| {
            b.iter(|| builder.spawn(&schema, buffer.clone()).count())
        });
    }
    group.finish();
}

fn benchmark_lane(c: &mut Criterion) {
    let mut group = c.benchmark_group("value_lane");
    group.throughput(Throughput::Elements(1));

    group.bench_function("send_recv", |b| {
        let (tx, rx) = lane::<u64>(1024);
        b.iter(|| {
            let _ = tx.send(black_box(42));
            black_box(rx.recv())
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_iter_unpack, benchmark_lane);
criterion_main!(benches);
