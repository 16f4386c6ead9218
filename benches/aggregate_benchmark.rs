/// Benchmark for the aggregation pipeline.
/// Measures a single pass over a large synthetic feed at each granularity.
use chartdash::aggregate::aggregate;
use chartdash::types::{Granularity, RawRecord};
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Build `n` daily records spanning multiple years.
fn synthetic_records(n: usize) -> Vec<RawRecord> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    (0..n)
        .map(|i| {
            let date = start + Duration::days(i as i64 % 1460);
            RawRecord::new(
                format!("{}T00:00:00Z", date.format("%Y-%m-%d")),
                (i % 97) as f64,
            )
        })
        .collect()
}

fn benchmark_aggregate(c: &mut Criterion) {
    let records = synthetic_records(100_000);

    c.bench_function("aggregate_daily_100k", |b| {
        b.iter(|| aggregate(black_box(&records), Granularity::Daily))
    });
    c.bench_function("aggregate_weekly_100k", |b| {
        b.iter(|| aggregate(black_box(&records), Granularity::Weekly))
    });
    c.bench_function("aggregate_monthly_100k", |b| {
        b.iter(|| aggregate(black_box(&records), Granularity::Monthly))
    });
}

criterion_group!(benches, benchmark_aggregate);
criterion_main!(benches);
