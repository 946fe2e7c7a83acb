// File: crates/chart-data/src/config.rs
// Summary: Pipeline configuration (JSON file or environment) with validation.

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::indicator::MovingAverage;
use crate::period::Period;
use crate::time::is_valid_format;
use crate::types::{
    ChainId, AVG_SERIES, CUMULATIVE_SERIES, DEFAULT_DATE_FORMAT, MAX_SERIES, MIN_SERIES,
    ROW_FIELDS, VALUE_SERIES,
};

/// What the pipeline computes and how rows are labelled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Bucket granularity; `None` charts the raw datapoints.
    pub period: Option<Period>,
    /// Chart one chain's breakdown value instead of the total.
    pub chain: Option<ChainId>,
    /// Trailing moving-average window, in ticks.
    pub moving_average: Option<usize>,
    /// Add the `"Cumulative"` running-total series.
    pub cumulative: bool,
    /// Add `Min`/`Max`/`Average` series (bucketed charts only).
    pub include_extremes: bool,
    pub value_series: String,
    /// chrono format for `ChartRow::date`.
    pub date_format: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            period: None,
            chain: None,
            moving_average: None,
            cumulative: false,
            include_extremes: false,
            value_series: VALUE_SERIES.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&text)
    }

    /// Create config from environment variables
    ///
    /// Reads:
    /// - `CHART_PERIOD`: daily, weekly or monthly
    /// - `CHART_CHAIN`: chain id to chart instead of the total
    /// - `CHART_MA_WINDOW`: moving-average window
    /// - `CHART_CUMULATIVE`, `CHART_EXTREMES`: true/false
    /// - `CHART_DATE_FORMAT`: chrono format for row dates
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();
        if let Some(v) = get("CHART_PERIOD") {
            config.period = Some(v.parse()?);
        }
        config.chain = get("CHART_CHAIN").map(|v| v.trim().to_string());
        if let Some(v) = get("CHART_MA_WINDOW") {
            let window = v.trim().parse::<usize>().map_err(|_| ConfigError::InvalidEnv {
                key: "CHART_MA_WINDOW",
                value: v.clone(),
            })?;
            config.moving_average = Some(window);
        }
        if let Some(v) = get("CHART_CUMULATIVE") {
            config.cumulative = parse_flag("CHART_CUMULATIVE", &v)?;
        }
        if let Some(v) = get("CHART_EXTREMES") {
            config.include_extremes = parse_flag("CHART_EXTREMES", &v)?;
        }
        if let Some(v) = get("CHART_DATE_FORMAT") {
            config.date_format = v;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn with_chain(mut self, chain: impl Into<ChainId>) -> Self {
        self.chain = Some(chain.into());
        self
    }

    pub fn with_moving_average(mut self, window: usize) -> Self {
        self.moving_average = Some(window);
        self
    }

    pub fn with_cumulative(mut self, on: bool) -> Self {
        self.cumulative = on;
        self
    }

    pub fn with_extremes(mut self, on: bool) -> Self {
        self.include_extremes = on;
        self
    }

    pub fn with_value_series(mut self, name: impl Into<String>) -> Self {
        self.value_series = name.into();
        self
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Reject settings that would make the output ambiguous or unrenderable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.moving_average == Some(0) {
            return Err(ConfigError::ZeroWindow);
        }
        let name = self.value_series.trim();
        if name.is_empty() {
            return Err(ConfigError::EmptySeriesName);
        }
        if name != self.value_series {
            return Err(ConfigError::PaddedSeriesName(self.value_series.clone()));
        }
        if self.derived_series().iter().any(|d| d == name) || ROW_FIELDS.contains(&name) {
            return Err(ConfigError::ReservedSeriesName(name.to_string()));
        }
        if !is_valid_format(&self.date_format) {
            return Err(ConfigError::InvalidDateFormat(self.date_format.clone()));
        }
        Ok(())
    }

    /// Names of the series computed on top of the value series, in row order.
    pub fn derived_series(&self) -> Vec<String> {
        let mut names = Vec::new();
        if self.include_extremes && self.period.is_some() {
            names.extend([MIN_SERIES, MAX_SERIES, AVG_SERIES].map(String::from));
        }
        if self.cumulative {
            names.push(CUMULATIVE_SERIES.to_string());
        }
        if let Some(window) = self.moving_average {
            names.push(MovingAverage::new(window).series_name());
        }
        names
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv { key, value: value.to_string() }),
    }
}
