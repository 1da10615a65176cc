use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use costfit::{statistics, Calibrator};

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit");

    let x: Vec<u64> = (1..=10_000u64).map(|i| i * 8).collect();
    let y: Vec<u64> = x.iter().map(|&v| 3 * v + 7).collect();

    group.bench_function("fit_10k", |b| {
        b.iter(|| black_box(statistics::fit(black_box(&x), black_box(&y))));
    });

    group.bench_function("sum_10k", |b| {
        b.iter(|| black_box(statistics::sum(black_box(&x))));
    });

    group.finish();
}

fn bench_calibrate(c: &mut Criterion) {
    let mut group = c.benchmark_group("calibrate");
    group.sample_size(20);

    group.bench_function("quick_synthetic_probe", |b| {
        b.iter(|| {
            // Cheap arithmetic probe; keeps the bench on the driver loop
            // rather than on workload execution.
            let mut calls = 0u64;
            let outcome = Calibrator::quick().calibrate(|size: u64| {
                calls += 1;
                (3 * size + 5 + calls % 3, 2 * size + 1)
            });
            black_box(outcome.to_array())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_fit, bench_calibrate);
criterion_main!(benches);
