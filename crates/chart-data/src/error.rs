// File: crates/chart-data/src/error.rs
// Summary: Error types for wire ingest and pipeline configuration.
// Notes:
// - The transforms themselves are infallible; bad input is skipped, not reported.

use thiserror::Error;

/// Failures decoding a datapoint payload as a whole.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum IngestError {
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array of datapoints, found {0}")]
    UnexpectedShape(&'static str),
}

/// Invalid pipeline configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("moving-average window must be at least 1")]
    ZeroWindow,

    #[error("value series name must not be empty")]
    EmptySeriesName,

    #[error("series name `{0}` has leading or trailing whitespace")]
    PaddedSeriesName(String),

    #[error("series name `{0}` is reserved")]
    ReservedSeriesName(String),

    #[error("invalid date format `{0}`")]
    InvalidDateFormat(String),

    #[error("unknown period `{0}` (expected daily, weekly or monthly)")]
    UnknownPeriod(String),

    #[error("unknown aggregate `{0}`")]
    UnknownAggregate(String),

    #[error("invalid value `{value}` for {key}")]
    InvalidEnv { key: &'static str, value: String },

    #[error("failed to read config {path}: {message}")]
    Read { path: String, message: String },

    #[error("invalid config JSON: {0}")]
    Parse(String),
}
