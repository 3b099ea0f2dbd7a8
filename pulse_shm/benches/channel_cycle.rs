//! Locked publish/snapshot cycle benchmarks

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use pulse::consts::SAMPLE_COUNT;
use pulse_shm::SampleChannel;

/// Benchmark the full producer cycle: acquire, overwrite record, release
fn bench_publish_cycle(c: &mut Criterion) {
    let name = format!("bench_publish_{}", std::process::id());
    let mut channel = SampleChannel::create(&name).unwrap();

    let values = [1.5f32; SAMPLE_COUNT];

    c.bench_function("publish_cycle", |b| {
        b.iter(|| {
            black_box(channel.publish(black_box(values), 1_700_000_000_000).unwrap());
        });
    });
}

/// Benchmark the full consumer cycle: acquire, copy record out, release
fn bench_snapshot_cycle(c: &mut Criterion) {
    let name = format!("bench_snapshot_{}", std::process::id());
    let mut producer = SampleChannel::create(&name).unwrap();
    producer.publish([2.5f32; SAMPLE_COUNT], 42).unwrap();

    let mut consumer = SampleChannel::attach(&name).unwrap();

    c.bench_function("snapshot_cycle", |b| {
        b.iter(|| {
            let record = black_box(consumer.snapshot().unwrap());
            black_box(record.timestamp_ms);
        });
    });
}

criterion_group!(benches, bench_publish_cycle, bench_snapshot_cycle);
criterion_main!(benches);
