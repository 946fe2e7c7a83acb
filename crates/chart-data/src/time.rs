// File: crates/chart-data/src/time.rs
// Summary: Lenient timestamp parsing and chart date labels.

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Fewest digits read as an epoch; shorter digit runs (`2024`, `20240105`)
/// are rejected rather than placed in 1970.
const MIN_EPOCH_DIGITS: usize = 9;

/// Naive layouts tried after RFC 3339; all are read as UTC.
const NAIVE_LAYOUTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a wire timestamp into UTC.
///
/// Accepts RFC 3339, `YYYY-MM-DD`, `YYYY-MM-DD[T ]HH:MM:SS[.fff]` and integer
/// epochs of at least nine digits (seconds, or milliseconds above 10^12).
/// Anything else is `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let digits = s.strip_prefix('-').unwrap_or(s);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        if digits.len() < MIN_EPOCH_DIGITS {
            return None;
        }
        return s.parse::<i64>().ok().and_then(from_epoch);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, layout) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn from_epoch(n: i64) -> Option<DateTime<Utc>> {
    if n.unsigned_abs() > 10_u64.pow(12) {
        DateTime::from_timestamp_millis(n) // epoch ms
    } else {
        DateTime::from_timestamp(n, 0)
    }
}

/// Render `ts` with a chrono format string, falling back to `YYYY-MM-DD`
/// when the format cannot be applied.
pub fn format_date(ts: &DateTime<Utc>, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", ts.format(format)).is_err() {
        return ts.format("%Y-%m-%d").to_string();
    }
    out
}

/// True when every specifier in `format` is understood by chrono.
pub fn is_valid_format(format: &str) -> bool {
    !format.is_empty() && !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}
