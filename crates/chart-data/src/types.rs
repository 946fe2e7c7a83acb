// File: crates/chart-data/src/types.rs
// Summary: Shared data model (datapoints, chain ids) and series-name constants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::breakdown::{parse_breakdown, ChainBreakdown};
use crate::time::parse_timestamp;

/// Default trailing window for moving averages, in periods.
pub const DEFAULT_WINDOW: usize = 30;
/// Default chrono format used for `ChartRow::date`.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Default name of the primary value series.
pub const VALUE_SERIES: &str = "Value";
/// Fixed name of the running-total companion series.
pub const CUMULATIVE_SERIES: &str = "Cumulative";
pub const MIN_SERIES: &str = "Min";
pub const MAX_SERIES: &str = "Max";
pub const AVG_SERIES: &str = "Average";

/// Keys a serialized `ChartRow` already uses; no series may take them.
pub const ROW_FIELDS: [&str; 2] = ["date", "proof"];

/// Opaque blockchain network identifier (e.g. `"eth"`, `"optimism"`).
pub type ChainId = String;

/// Chain breakdown field exactly as the data source delivered it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawBreakdown {
    /// JSON-encoded object, e.g. `{"eth": 5}`.
    Encoded(String),
    /// Already-decoded object.
    Map(serde_json::Map<String, serde_json::Value>),
}

/// A single timestamped observation, optionally decomposed by chain.
/// Contract: never mutated by the transforms; the date stays raw and is parsed
/// on demand so a malformed timestamp only drops this one point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Datapoint {
    pub date: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<RawBreakdown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<String>,
}

impl Datapoint {
    pub fn new(date: impl Into<String>, value: f64) -> Self {
        Self { date: date.into(), value, breakdown: None, proof: None }
    }

    pub fn with_breakdown(mut self, raw: RawBreakdown) -> Self {
        self.breakdown = Some(raw);
        self
    }

    pub fn with_proof(mut self, proof: impl Into<String>) -> Self {
        self.proof = Some(proof.into());
        self
    }

    /// Parsed UTC timestamp, `None` when the raw date is not understood.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.date)
    }

    /// Positive per-chain values carried by this point.
    pub fn chains(&self) -> ChainBreakdown {
        parse_breakdown(self.breakdown.as_ref())
    }

    /// Contribution of `chain`, or `None` when absent or not positive.
    pub fn chain_value(&self, chain: &str) -> Option<f64> {
        self.chains().get(chain).copied()
    }
}
