
use chart_data::{moving_average, ChartPipeline, Datapoint, PipelineConfig};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, black_box};

fn gen_values(n: usize) -> Vec<f64> {
    // simple waveform with drift
    (0..n).map(|i| (i as f64 * 0.01).sin() * 10.0 + (i as f64 * 0.0001)).collect()
}

fn bench_moving_average(c: &mut Criterion) {
    let mut group = c.benchmark_group("moving_average");
    for &n in &[10_000usize, 100_000usize] {
        let data = gen_values(n);
        for &window in &[7usize, 30usize, 90usize] {
            group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}_w{window}")), &window, |b, &w| {
                b.iter(|| black_box(moving_average(&data, w)));
            });
        }
    }
    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let points: Vec<Datapoint> = gen_values(5_000)
        .into_iter()
        .enumerate()
        .map(|(i, v)| Datapoint::new((1_700_000_000 + i as i64 * 3_600).to_string(), v))
        .collect();
    let pipeline = ChartPipeline::new(PipelineConfig::default().with_cumulative(true).with_moving_average(30))
        .expect("bench config");
    c.bench_function("pipeline_raw_5000", |b| b.iter(|| black_box(pipeline.run(&points))));
}

criterion_group!(benches, bench_moving_average, bench_pipeline);
criterion_main!(benches);
