// File: crates/chart-examples/src/bin/monthly.rs
// Summary: Minimal example that buckets a few datapoints by month and prints chart rows.

use chart_data::{ChartPipeline, Datapoint, Period, PipelineConfig, RawBreakdown};

fn main() {
    // A handful of grant outputs, some with a per-chain split
    let data = vec![
        Datapoint::new("2024-01-05", 10.0),
        Datapoint::new("2024-01-20", 20.0)
            .with_breakdown(RawBreakdown::Encoded(r#"{"eth":12,"optimism":8}"#.into())),
        Datapoint::new("2024-02-03T09:30:00Z", 5.0),
        Datapoint::new("2024-03-14", 12.5).with_proof("https://example.org/proof/3"),
        Datapoint::new("2024-04-01", 7.0),
    ];

    let config = PipelineConfig::default()
        .with_period(Period::Monthly)
        .with_cumulative(true)
        .with_moving_average(2)
        .with_date_format("%b %Y");
    let pipeline = ChartPipeline::new(config).expect("valid config");
    let rows = pipeline.run(&data);

    println!("series: {:?}", pipeline.series_names());
    println!("{}", serde_json::to_string_pretty(&rows).expect("rows serialize"));
}
