// File: crates/chart-data/src/ingest.rs
// Summary: Decode the data source's JSON wire records into datapoints.

use serde_json::Value;
use tracing::{debug, trace};

use crate::breakdown::numeric;
use crate::error::IngestError;
use crate::types::{Datapoint, RawBreakdown};

/// Timestamp fields, in order of preference.
const DATE_FIELDS: [&str; 4] = ["date", "outputTimestamp", "startDate", "endDate"];
const BREAKDOWN_FIELDS: [&str; 2] = ["breakdown", "chainBreakdown"];
const PROOF_FIELDS: [&str; 2] = ["proof", "outputProof"];

/// Decode a JSON array (or `{"data": [...]}`) of wire records.
///
/// Records without a usable value or timestamp are dropped; only a payload
/// that is not JSON or not an array is an error.
pub fn datapoints_from_json(payload: &str) -> Result<Vec<Datapoint>, IngestError> {
    let root: Value = serde_json::from_str(payload)?;
    datapoints_from_value(&root)
}

pub fn datapoints_from_value(root: &Value) -> Result<Vec<Datapoint>, IngestError> {
    let records = match root {
        Value::Array(items) => items,
        Value::Object(obj) => match obj.get("data") {
            Some(Value::Array(items)) => items,
            _ => return Err(IngestError::UnexpectedShape("an object without a `data` array")),
        },
        other => return Err(IngestError::UnexpectedShape(kind(other))),
    };
    let points: Vec<Datapoint> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| record_to_datapoint(index, record))
        .collect();
    trace!(records = records.len(), kept = points.len(), "decoded wire datapoints");
    Ok(points)
}

fn record_to_datapoint(index: usize, record: &Value) -> Option<Datapoint> {
    let Some(obj) = record.as_object() else {
        debug!(index, "skipping non-object record");
        return None;
    };
    let Some(value) = obj.get("value").and_then(numeric) else {
        debug!(index, "skipping record without a numeric value");
        return None;
    };
    let date = DATE_FIELDS.iter().find_map(|field| match obj.get(*field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => epoch_text(n),
        _ => None,
    });
    let Some(date) = date else {
        debug!(index, "skipping record without a timestamp");
        return None;
    };
    let breakdown = BREAKDOWN_FIELDS.iter().find_map(|field| match obj.get(*field) {
        Some(Value::String(s)) => Some(RawBreakdown::Encoded(s.clone())),
        Some(Value::Object(map)) => Some(RawBreakdown::Map(map.clone())),
        _ => None,
    });
    let proof = PROOF_FIELDS
        .iter()
        .find_map(|field| obj.get(*field).and_then(Value::as_str))
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string);
    Some(Datapoint { date, value, breakdown, proof })
}

/// Integral JSON numbers (including `1706745600.0`) as epoch text.
fn epoch_text(n: &serde_json::Number) -> Option<String> {
    if let Some(i) = n.as_i64() {
        return Some(i.to_string());
    }
    let f = n.as_f64()?;
    if f.fract() != 0.0 || f.abs() >= i64::MAX as f64 {
        return None;
    }
    Some((f as i64).to_string())
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
