use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use coljoin_core::config::{IndexKind, JoinConfig};
use coljoin_core::types::Column;
use coljoin_join::{inner_join, left_join, ExecContext};

fn make_keys(rows: usize, distinct: i64) -> Vec<i64> {
    (0..rows as i64).map(|i| (i * 7919) % distinct).collect()
}

fn bench_index_kinds(c: &mut Criterion) {
    let left = Column::Int64(make_keys(64 * 1024, 16 * 1024));
    let right = Column::Int64(make_keys(16 * 1024, 16 * 1024));

    let mut group = c.benchmark_group("inner_join_64k_x_16k");
    for index in [IndexKind::Hash, IndexKind::Sorted] {
        let ctx = ExecContext::new(JoinConfig::default().with_index(index)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(index), &ctx, |b, ctx| {
            b.iter(|| inner_join(ctx, black_box(&left), black_box(&right)).unwrap())
        });
    }
    group.finish();
}

fn bench_parallel_probe(c: &mut Criterion) {
    let left = Column::Float64(make_keys(256 * 1024, 4096).into_iter().map(|k| k as f64).collect());
    let right = Column::Float64((0..4096).map(f64::from).collect());

    let serial = ExecContext::new(JoinConfig::default().with_parallel_threshold(usize::MAX)).unwrap();
    let parallel = ExecContext::new(JoinConfig::default().with_parallel_threshold(0)).unwrap();

    let mut group = c.benchmark_group("left_join_256k_probe");
    group.bench_function("serial", |b| {
        b.iter(|| left_join(&serial, black_box(&left), black_box(&right)).unwrap())
    });
    group.bench_function("parallel", |b| {
        b.iter(|| left_join(&parallel, black_box(&left), black_box(&right)).unwrap())
    });
    group.finish();
}

criterion_group!(joins, bench_index_kinds, bench_parallel_probe);
criterion_main!(joins);
