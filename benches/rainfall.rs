use criterion::{black_box, criterion_group, criterion_main, Criterion};
use polars::prelude::*;
use rainfall_climate::{clean_and_aggregate, Granularity};

fn synthetic_districts(rows: usize) -> PolarsResult<DataFrame> {
    let states: Vec<String> = (0..rows).map(|i| format!("STATE {}", i % 36)).collect();
    let districts: Vec<String> = (0..rows).map(|i| format!("DISTRICT {}", i % 700)).collect();
    let rain: Vec<f64> = (0..rows)
        .map(|i| if i % 50 == 0 { -999.0 } else { (i % 400) as f64 * 0.5 })
        .collect();
    let tmin: Vec<f64> = (0..rows).map(|i| 10.0 + (i % 15) as f64).collect();
    let tmax: Vec<f64> = (0..rows).map(|i| 25.0 + (i % 12) as f64).collect();
    df!(
        "state" => states,
        "district" => districts,
        "rain" => rain,
        "tmin" => tmin,
        "tmax" => tmax,
    )
}

fn bench_clean_and_aggregate(c: &mut Criterion) {
    let Ok(frame) = synthetic_districts(100_000) else {
        return;
    };
    c.bench_function("clean_and_aggregate_state", |b| {
        b.iter(|| clean_and_aggregate(black_box(&frame), Granularity::State))
    });
    c.bench_function("clean_and_aggregate_district", |b| {
        b.iter(|| clean_and_aggregate(black_box(&frame), Granularity::District))
    });
}

criterion_group!(benches, bench_clean_and_aggregate);
criterion_main!(benches);
