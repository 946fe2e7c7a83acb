// File: crates/chart-data/tests/ingest.rs
// Purpose: Wire-record decoding (field aliases, numeric strings, dropped records) and timestamp parsing.

use chart_data::{datapoints_from_json, parse_timestamp, IngestError, RawBreakdown};
use chrono::{TimeZone, Utc};

#[test]
fn decodes_field_aliases() {
    let payload = r#"[
        {"value": 10, "date": "2024-01-05", "breakdown": "{\"eth\":5}"},
        {"value": "2.5", "outputTimestamp": "2024-01-06T00:00:00Z", "outputProof": "https://x"},
        {"value": 1, "startDate": "2024-01-07", "endDate": "2024-01-08", "chainBreakdown": {"op": 1}},
        {"value": 4, "endDate": "2024-01-09"}
    ]"#;
    let points = datapoints_from_json(payload).expect("decode");
    assert_eq!(points.len(), 4);
    assert_eq!(points[0].chain_value("eth"), Some(5.0));
    assert_eq!(points[1].value, 2.5);
    assert_eq!(points[1].date, "2024-01-06T00:00:00Z");
    assert_eq!(points[1].proof.as_deref(), Some("https://x"));
    assert_eq!(points[2].date, "2024-01-07", "startDate wins over endDate");
    assert!(matches!(points[2].breakdown, Some(RawBreakdown::Map(_))));
    assert_eq!(points[3].date, "2024-01-09");
}

#[test]
fn drops_records_without_value_or_date() {
    let payload = r#"[
        {"value": "n/a", "date": "2024-01-05"},
        {"value": null, "date": "2024-01-05"},
        {"value": 3},
        {"value": 3, "date": "   "},
        "not an object",
        {"value": 7, "date": 1704067200}
    ]"#;
    let points = datapoints_from_json(payload).expect("decode");
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].value, 7.0);
    assert_eq!(points[0].timestamp(), Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single());
}

#[test]
fn accepts_a_data_envelope() {
    let points = datapoints_from_json(r#"{"data": [{"value": 1, "date": "2024-01-01"}]}"#).expect("decode");
    assert_eq!(points.len(), 1);
}

#[test]
fn rejects_non_array_payloads() {
    assert!(matches!(datapoints_from_json("{\"value\": 1}"), Err(IngestError::UnexpectedShape(_))));
    assert!(matches!(datapoints_from_json("12"), Err(IngestError::UnexpectedShape(_))));
    assert!(matches!(datapoints_from_json("[{"), Err(IngestError::Json(_))));
}

#[test]
fn timestamp_formats() {
    let jan5 = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).single();
    assert_eq!(parse_timestamp("2024-01-05"), jan5);
    assert_eq!(parse_timestamp(" 2024-01-05T00:00:00Z "), jan5);
    assert_eq!(parse_timestamp("2024-01-05T01:00:00+01:00"), jan5);
    assert_eq!(parse_timestamp("2024-01-05 00:00:00"), jan5);
    assert_eq!(parse_timestamp("2024-01-05T00:00:00.000"), jan5);
    assert_eq!(parse_timestamp("1704412800"), jan5);
    assert_eq!(parse_timestamp("1704412800000"), jan5);
    assert_eq!(parse_timestamp(""), None);
    assert_eq!(parse_timestamp("2024-13-01"), None);
    assert_eq!(parse_timestamp("soon"), None);
}

#[test]
fn short_digit_runs_are_not_epochs() {
    assert_eq!(parse_timestamp("2024"), None);
    assert_eq!(parse_timestamp("20240105"), None);
    assert_eq!(parse_timestamp("-2024"), None);
    assert_eq!(
        parse_timestamp("100000000"),
        Utc.with_ymd_and_hms(1973, 3, 3, 9, 46, 40).single()
    );
}

#[test]
fn integral_float_epochs_are_accepted() {
    let payload = r#"[
        {"value": 1, "date": 1706745600.0},
        {"value": 2, "date": 1706745600},
        {"value": 3, "date": 1706745600.5}
    ]"#;
    let points = datapoints_from_json(payload).expect("decode");
    let feb1 = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).single();
    let dates: Vec<_> = points.iter().map(|p| (p.value, p.timestamp())).collect();
    assert_eq!(dates, vec![(1.0, feb1), (2.0, feb1)]);
}
