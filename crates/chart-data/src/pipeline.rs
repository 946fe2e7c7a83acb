// File: crates/chart-data/src/pipeline.rs
// Summary: Config-driven composition: breakdown -> bucketing -> smoothing -> row assembly.

use tracing::{debug, trace};

use crate::assemble::{ChartAssembler, ChartRow};
use crate::config::PipelineConfig;
use crate::error::ConfigError;
use crate::indicator::{Indicator, MovingAverage, RunningTotal};
use crate::period::{bucket_by_period, sorted_buckets, Aggregate, Period};
use crate::series::NamedSeries;
use crate::types::{Datapoint, AVG_SERIES, MAX_SERIES, MIN_SERIES};

/// Value series on its axis, before derived series are attached.
struct Axis {
    timestamps: Vec<String>,
    value: NamedSeries,
    extras: Vec<NamedSeries>,
    proofs: Option<Vec<Option<String>>>,
}

/// Turns datapoints into chart rows according to a validated config.
#[derive(Clone, Debug)]
pub struct ChartPipeline {
    config: PipelineConfig,
}

impl ChartPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig { &self.config }

    /// Series names as they appear in rows: value first, then derived series.
    pub fn series_names(&self) -> Vec<String> {
        let mut names = vec![self.config.value_series.clone()];
        names.extend(self.config.derived_series());
        names
    }

    pub fn run(&self, points: &[Datapoint]) -> Vec<ChartRow> {
        self.assembler(points).assemble()
    }

    /// Assembler with every configured series attached, for callers that
    /// want to add series of their own before assembling.
    pub fn assembler(&self, points: &[Datapoint]) -> ChartAssembler {
        let chain = self.config.chain.as_deref();
        let axis = match self.config.period {
            Some(period) => self.bucketed_axis(points, period, chain),
            None => self.raw_axis(points, chain),
        };
        trace!(ticks = axis.timestamps.len(), "built value axis");

        // Derived series run over the value series in ascending date order.
        let mut derived = Vec::new();
        if self.config.cumulative {
            derived.push(RunningTotal.compute(&axis.value));
        }
        if let Some(window) = self.config.moving_average {
            derived.push(MovingAverage::new(window).compute(&axis.value));
        }

        let mut asm = ChartAssembler::new(axis.timestamps)
            .with_date_format(self.config.date_format.clone())
            .with_series(axis.value);
        for s in axis.extras.into_iter().chain(derived) {
            asm.add_series(s);
        }
        if let Some(proofs) = axis.proofs {
            asm = asm.with_proofs(proofs);
        }
        asm
    }

    fn bucketed_axis(&self, points: &[Datapoint], period: Period, chain: Option<&str>) -> Axis {
        let buckets = sorted_buckets(bucket_by_period(points, period, chain));
        let timestamps = buckets
            .iter()
            .map(|b| b.start_date.format("%Y-%m-%d").to_string())
            .collect();
        let pick = |agg: Aggregate| buckets.iter().map(|b| b.aggregate(agg)).collect::<Vec<_>>();
        let value = NamedSeries::required(self.config.value_series.clone(), pick(Aggregate::Sum));
        let extras = if self.config.include_extremes {
            vec![
                NamedSeries::optional(MIN_SERIES, pick(Aggregate::Min)),
                NamedSeries::optional(MAX_SERIES, pick(Aggregate::Max)),
                NamedSeries::optional(AVG_SERIES, pick(Aggregate::Avg)),
            ]
        } else {
            Vec::new()
        };
        Axis { timestamps, value, extras, proofs: None }
    }

    fn raw_axis(&self, points: &[Datapoint], chain: Option<&str>) -> Axis {
        let mut kept: Vec<_> = points
            .iter()
            .filter_map(|p| {
                let Some(ts) = p.timestamp() else {
                    debug!(date = %p.date, "skipping datapoint with unparseable date");
                    return None;
                };
                let value = match chain {
                    Some(chain) => p.chain_value(chain)?,
                    None => p.value,
                };
                if !value.is_finite() {
                    debug!(date = %p.date, "skipping datapoint with non-finite value");
                    return None;
                }
                Some((ts, p, value))
            })
            .collect();
        kept.sort_by_key(|(ts, _, _)| *ts);

        let timestamps = kept.iter().map(|(_, p, _)| p.date.clone()).collect();
        let values = kept.iter().map(|(_, _, v)| Some(*v)).collect();
        let proofs = kept
            .iter()
            .any(|(_, p, _)| p.proof.is_some())
            .then(|| kept.iter().map(|(_, p, _)| p.proof.clone()).collect());
        Axis {
            timestamps,
            value: NamedSeries::required(self.config.value_series.clone(), values),
            extras: Vec::new(),
            proofs,
        }
    }
}
