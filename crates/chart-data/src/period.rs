// File: crates/chart-data/src/period.rs
// Summary: Calendar period bucketing (daily / weekly / monthly) with sum/min/max/avg per bucket.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::types::Datapoint;

/// Bucket granularity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[serde(alias = "day")]
    Daily,
    /// ISO weeks starting on Monday.
    #[serde(alias = "week")]
    Weekly,
    #[serde(alias = "month")]
    Monthly,
}

impl Period {
    pub fn name(&self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
        }
    }

    /// First UTC calendar day of the period containing `date`.
    pub fn start_of(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Period::Daily => date,
            Period::Weekly => {
                let back = u64::from(date.weekday().num_days_from_monday());
                date.checked_sub_days(Days::new(back)).unwrap_or(date)
            }
            Period::Monthly => date.with_day(1).unwrap_or(date),
        }
    }

    /// Bucket key for a period start: `YYYY-MM` for months, `YYYY-MM-DD` otherwise.
    /// Keys sort chronologically as plain strings.
    pub fn key_of(&self, start: NaiveDate) -> String {
        match self {
            Period::Monthly => start.format("%Y-%m").to_string(),
            Period::Daily | Period::Weekly => start.format("%Y-%m-%d").to_string(),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Period {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "day" => Ok(Period::Daily),
            "weekly" | "week" => Ok(Period::Weekly),
            "monthly" | "month" => Ok(Period::Monthly),
            _ => Err(ConfigError::UnknownPeriod(s.to_string())),
        }
    }
}

/// Per-bucket aggregate selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregate {
    Sum,
    Min,
    Max,
    Avg,
    Count,
}

impl FromStr for Aggregate {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" | "total" => Ok(Aggregate::Sum),
            "min" => Ok(Aggregate::Min),
            "max" => Ok(Aggregate::Max),
            "avg" | "average" | "mean" => Ok(Aggregate::Avg),
            "count" => Ok(Aggregate::Count),
            _ => Err(ConfigError::UnknownAggregate(s.to_string())),
        }
    }
}

/// Aggregation of the datapoints that fall inside one calendar period.
/// Contract: `count >= 1` for every bucket returned by `bucket_by_period`,
/// and `avg_value == Some(total_value / count)`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodBucket {
    pub period_key: String,
    pub start_date: NaiveDate,
    pub total_value: f64,
    pub min_value: f64,
    pub max_value: f64,
    pub avg_value: Option<f64>,
    pub count: usize,
}

impl PeriodBucket {
    fn open(period_key: String, start_date: NaiveDate) -> Self {
        Self {
            period_key,
            start_date,
            total_value: 0.0,
            min_value: f64::INFINITY,
            max_value: f64::NEG_INFINITY,
            avg_value: None,
            count: 0,
        }
    }

    fn fold(&mut self, value: f64) {
        self.total_value += value;
        self.min_value = self.min_value.min(value);
        self.max_value = self.max_value.max(value);
        self.count += 1;
        self.avg_value = Some(self.total_value / self.count as f64);
    }

    /// Selected aggregate; min/max/avg are `None` for an empty bucket.
    pub fn aggregate(&self, agg: Aggregate) -> Option<f64> {
        match agg {
            Aggregate::Sum => Some(self.total_value),
            Aggregate::Count => Some(self.count as f64),
            _ if self.count == 0 => None,
            Aggregate::Min => Some(self.min_value),
            Aggregate::Max => Some(self.max_value),
            Aggregate::Avg => self.avg_value,
        }
    }
}

/// Group datapoints into calendar buckets keyed by period key.
///
/// With `chain` set, only points carrying a positive value for that chain
/// contribute, and they contribute that value instead of the total. Points
/// with unparseable dates or non-finite values are skipped.
pub fn bucket_by_period(
    points: &[Datapoint],
    period: Period,
    chain: Option<&str>,
) -> BTreeMap<String, PeriodBucket> {
    let mut buckets: BTreeMap<String, PeriodBucket> = BTreeMap::new();
    for point in points {
        let Some(ts) = point.timestamp() else {
            debug!(date = %point.date, "skipping datapoint with unparseable date");
            continue;
        };
        let value = match chain {
            Some(chain) => match point.chain_value(chain) {
                Some(v) => v,
                None => continue,
            },
            None => point.value,
        };
        if !value.is_finite() {
            debug!(date = %point.date, "skipping datapoint with non-finite value");
            continue;
        }
        let start = period.start_of(ts.date_naive());
        let key = period.key_of(start);
        buckets
            .entry(key)
            .or_insert_with_key(|k| PeriodBucket::open(k.clone(), start))
            .fold(value);
    }
    trace!(period = %period, input = points.len(), buckets = buckets.len(), "bucketed datapoints");
    buckets
}

/// Buckets in ascending start-date order.
pub fn sorted_buckets(buckets: BTreeMap<String, PeriodBucket>) -> Vec<PeriodBucket> {
    let mut out: Vec<PeriodBucket> = buckets.into_values().collect();
    out.sort_by_key(|b| b.start_date);
    out
}
