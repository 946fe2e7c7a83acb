// File: crates/chart-data/src/assemble.rs
// Summary: Chart series assembler; merges parallel named series on a timestamp axis into sorted rows.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::series::NamedSeries;
use crate::time::{format_date, parse_timestamp};
use crate::types::{CUMULATIVE_SERIES, DEFAULT_DATE_FORMAT, ROW_FIELDS};

/// One rendering-ready record on the shared time axis.
///
/// Serializes flat: `{"date": "2024-01-01", "Value": 30.0, "Cumulative": 30.0}`.
/// A series with no value at this tick has no key.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartRow {
    pub date: String,
    #[serde(skip)]
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof: Option<String>,
}

impl ChartRow {
    pub fn get(&self, series: &str) -> Option<f64> {
        self.values.get(series).copied()
    }
}

/// Builder collecting series that share one timestamp axis.
#[derive(Clone, Debug)]
pub struct ChartAssembler {
    timestamps: Vec<String>,
    series: Vec<NamedSeries>,
    proofs: Option<Vec<Option<String>>>,
    date_format: String,
}

impl ChartAssembler {
    pub fn new<I, S>(timestamps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            timestamps: timestamps.into_iter().map(Into::into).collect(),
            series: Vec::new(),
            proofs: None,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    /// Add a series; a series with the same name is replaced in place.
    /// Series named after a row field (`date`, `proof`) are ignored.
    pub fn add_series(&mut self, series: NamedSeries) {
        if ROW_FIELDS.contains(&series.name.as_str()) {
            warn!(series = %series.name, "ignoring series whose name collides with a row field");
            return;
        }
        match self.series.iter_mut().find(|s| s.name == series.name) {
            Some(slot) => *slot = series,
            None => self.series.push(series),
        }
    }

    pub fn with_series(mut self, series: NamedSeries) -> Self {
        self.add_series(series);
        self
    }

    /// Merge a running-total companion under the fixed `"Cumulative"` name.
    pub fn with_cumulative(self, values: Vec<Option<f64>>) -> Self {
        self.with_series(NamedSeries::required(CUMULATIVE_SERIES, values))
    }

    /// Per-tick annotation (e.g. a proof link), parallel to the axis.
    pub fn with_proofs(mut self, proofs: Vec<Option<String>>) -> Self {
        self.proofs = Some(proofs);
        self
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Declared series names, in insertion order.
    pub fn series_names(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.name.as_str()).collect()
    }

    /// Build rows, one per parseable timestamp, sorted ascending by date.
    ///
    /// The sort is stable: rows sharing a timestamp keep their input order.
    /// Ticks whose timestamp cannot be parsed are dropped.
    pub fn assemble(&self) -> Vec<ChartRow> {
        let mut rows = Vec::with_capacity(self.timestamps.len());
        for (i, raw) in self.timestamps.iter().enumerate() {
            let Some(timestamp) = parse_timestamp(raw) else {
                debug!(date = %raw, index = i, "dropping chart tick with unparseable date");
                continue;
            };
            let values = self
                .series
                .iter()
                .filter_map(|s| s.value_at(i).map(|v| (s.name.clone(), v)))
                .collect();
            let proof = self
                .proofs
                .as_ref()
                .and_then(|p| p.get(i).cloned().flatten());
            rows.push(ChartRow {
                date: format_date(&timestamp, &self.date_format),
                timestamp,
                values,
                proof,
            });
        }
        rows.sort_by_key(|r| r.timestamp);
        trace!(ticks = self.timestamps.len(), rows = rows.len(), series = self.series.len(), "assembled chart rows");
        rows
    }
}
