use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

use bench::{recording_handle, Shape};
use iclblas::routines::{Sasum, SasumParams, Sgemm, SgemmParams};
use iclblas::{Blob, Config, Operation};

fn sgemm_params(dim: i32) -> SgemmParams {
    SgemmParams {
        transa: Operation::N,
        transb: Operation::N,
        m: dim,
        n: dim,
        k: dim,
        alpha: 1.0,
        a: Blob::null(),
        lda: dim,
        b: Blob::null(),
        ldb: dim,
        beta: 0.0,
        c: Blob::null(),
        ldc: dim,
    }
}

fn bench_select(c: &mut Criterion) {
    let handle = recording_handle(&Config::default());
    let d = handle.dispatcher();
    let mut group = c.benchmark_group("select");
    for dim in [16, 256, 4096] {
        let p = sgemm_params(dim);
        group.bench_with_input(BenchmarkId::new("sgemm", dim), &p, |b, p| {
            b.iter(|| black_box(d.select::<Sgemm>(p).ok()));
        });
    }
    let shape = Shape::default();
    for n in [1000, 1 << 20] {
        let p = SasumParams { n, x: Blob::null(), incx: shape.incx, result: Blob::null() };
        group.bench_with_input(BenchmarkId::new("sasum", n), &p, |b, p| {
            b.iter(|| black_box(d.select::<Sasum>(p).ok()));
        });
    }
    group.finish();
}

fn bench_rank(c: &mut Criterion) {
    let handle = recording_handle(&Config::default());
    let d = handle.dispatcher();
    let p = sgemm_params(512);
    c.bench_function("rank_sgemm", |b| b.iter(|| black_box(d.rank::<Sgemm>(&p).len())));
}

criterion_group!(
    name = benches;
    config = Criterion::default()
        .warm_up_time(Duration::from_secs(1))
        .measurement_time(Duration::from_secs(2))
        .sample_size(10);
    targets = bench_select, bench_rank
);
criterion_main!(benches);
