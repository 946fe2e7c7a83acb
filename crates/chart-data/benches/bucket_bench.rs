
use chart_data::{bucket_by_period, Datapoint, Period, RawBreakdown};
use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, black_box};

fn gen_points(n: usize) -> Vec<Datapoint> {
    let start = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).single().unwrap_or_default();
    (0..n)
        .map(|i| {
            let ts = start + Duration::hours(i as i64);
            let value = (i as f64 * 0.01).sin() * 10.0 + 20.0;
            let breakdown = format!(r#"{{"eth":{:.3},"op":{:.3}}}"#, value * 0.6, value * 0.4);
            Datapoint::new(ts.to_rfc3339(), value).with_breakdown(RawBreakdown::Encoded(breakdown))
        })
        .collect()
}

fn bench_bucket(c: &mut Criterion) {
    let mut group = c.benchmark_group("bucket_by_period");
    for &n in &[10_000usize, 50_000usize] {
        let data = gen_points(n);
        for period in [Period::Daily, Period::Weekly, Period::Monthly] {
            group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}_{period}")), &period, |b, &p| {
                b.iter_batched(
                    || data.clone(),
                    |d| { let _ = black_box(bucket_by_period(&d, p, None)); },
                    BatchSize::SmallInput,
                );
            });
        }
        group.bench_function(format!("n{n}_weekly_chain"), |b| {
            b.iter(|| black_box(bucket_by_period(&data, Period::Weekly, Some("eth"))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_bucket);
criterion_main!(benches);
