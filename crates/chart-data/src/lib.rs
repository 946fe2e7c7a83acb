// File: crates/chart-data/src/lib.rs
// Summary: Core library entry point; exports the datapoint model and chart-data transforms.

pub mod assemble;
pub mod breakdown;
pub mod chains;
pub mod config;
pub mod error;
pub mod indicator;
pub mod ingest;
pub mod period;
pub mod pipeline;
pub mod series;
pub mod smooth;
pub mod time;
pub mod types;

pub use assemble::{ChartAssembler, ChartRow};
pub use breakdown::{parse_breakdown, ChainBreakdown};
pub use chains::{chain_ids, chain_totals, decorate, ChainEntry, ChainInfo, ChainLookup, ChainTotal};
pub use config::PipelineConfig;
pub use error::{ConfigError, IngestError};
pub use indicator::{Indicator, MovingAverage, RunningTotal};
pub use ingest::{datapoints_from_json, datapoints_from_value};
pub use period::{bucket_by_period, sorted_buckets, Aggregate, Period, PeriodBucket};
pub use pipeline::ChartPipeline;
pub use series::{MissingValue, NamedSeries};
pub use smooth::{cumulative_sum, moving_average, moving_average_sparse};
pub use time::{format_date, parse_timestamp};
pub use types::{ChainId, Datapoint, RawBreakdown, CUMULATIVE_SERIES, DEFAULT_WINDOW, VALUE_SERIES};
