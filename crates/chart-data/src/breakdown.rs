// File: crates/chart-data/src/breakdown.rs
// Summary: Chain-breakdown parser (raw field -> chain id -> positive value).

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

use crate::types::{ChainId, RawBreakdown};

/// Per-chain contributions; every value is finite and strictly positive.
pub type ChainBreakdown = BTreeMap<ChainId, f64>;

/// Parse a raw breakdown field.
///
/// Malformed JSON yields an empty map; non-numeric, non-finite and `<= 0`
/// entries are dropped one by one. Never fails.
pub fn parse_breakdown(raw: Option<&RawBreakdown>) -> ChainBreakdown {
    match raw {
        None => ChainBreakdown::new(),
        Some(RawBreakdown::Encoded(text)) => parse_encoded(text),
        Some(RawBreakdown::Map(map)) => collect_positive(map),
    }
}

fn parse_encoded(text: &str) -> ChainBreakdown {
    let text = text.trim();
    if text.is_empty() {
        return ChainBreakdown::new();
    }
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => collect_positive(&map),
        Ok(_) => {
            debug!("chain breakdown is not a JSON object; ignoring");
            ChainBreakdown::new()
        }
        Err(err) => {
            debug!(%err, "malformed chain breakdown; ignoring");
            ChainBreakdown::new()
        }
    }
}

fn collect_positive(map: &Map<String, Value>) -> ChainBreakdown {
    map.iter()
        .filter_map(|(chain, v)| {
            numeric(v)
                .filter(|x| *x > 0.0)
                .map(|x| (chain.clone(), x))
        })
        .collect()
}

/// Finite number from a JSON number or numeric string.
pub(crate) fn numeric(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}
