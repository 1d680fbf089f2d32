//! Benchmarks for the column scans: z-score detection, median replacement and IQR filtering

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use market_prep::prep_polars::PrepStatsExt;
use polars::prelude::*;
use rand::prelude::*;
use rand_distr::{Distribution, Normal};

/// Price-like frame: normal noise around 100 with a spike every 997 rows
fn generate_frame(rows: usize, columns: usize) -> DataFrame {
    let mut rng = StdRng::seed_from_u64(42);
    let normal = Normal::new(100.0, 5.0).unwrap();

    let cols: Vec<Column> = (0..columns)
        .map(|c| {
            let values: Vec<f64> = (0..rows)
                .map(|i| {
                    if i % 997 == 0 {
                        1_000.0
                    } else {
                        normal.sample(&mut rng)
                    }
                })
                .collect();
            Series::new(format!("col_{c}").into(), values).into()
        })
        .collect();
    DataFrame::new(cols).unwrap()
}

fn bench_find_outliers(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_outliers");

    for &rows in &[1_000, 10_000, 100_000] {
        let df = generate_frame(rows, 8);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &df, |b, df| {
            b.iter(|| black_box(df.find_outliers(3.0).unwrap()));
        });
    }

    group.finish();
}

fn bench_replace_with_median(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_and_replace_outliers_with_median");

    for &rows in &[1_000, 10_000, 100_000] {
        let df = generate_frame(rows, 8);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &df, |b, df| {
            b.iter(|| black_box(df.find_and_replace_outliers_with_median(&[], 3.0).unwrap()));
        });
    }

    group.finish();
}

fn bench_iqr_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("iqr_outlier_filter");

    for &rows in &[1_000, 10_000, 100_000] {
        let df = generate_frame(rows, 8);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &df, |b, df| {
            b.iter(|| black_box(df.iqr_outlier_filter(&[]).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_find_outliers,
    bench_replace_with_median,
    bench_iqr_filter
);
criterion_main!(benches);
