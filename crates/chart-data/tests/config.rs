// File: crates/chart-data/tests/config.rs
// Purpose: Pipeline config defaults, JSON and environment sources, validation.

use std::collections::HashMap;

use chart_data::{ConfigError, Period, PipelineConfig};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_are_valid() {
    let config = PipelineConfig::default();
    assert_eq!(config.value_series, "Value");
    assert_eq!(config.date_format, "%Y-%m-%d");
    assert!(config.validate().is_ok());
    assert!(config.derived_series().is_empty());
}

#[test]
fn json_fills_missing_fields_with_defaults() {
    let config = PipelineConfig::from_json_str(r#"{"period": "week", "moving_average": 7, "cumulative": true}"#)
        .expect("parse");
    assert_eq!(config.period, Some(Period::Weekly));
    assert_eq!(config.moving_average, Some(7));
    assert!(config.cumulative);
    assert_eq!(config.value_series, "Value");
}

#[test]
fn json_rejects_unknown_fields() {
    let err = PipelineConfig::from_json_str(r#"{"periodd": "weekly"}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn env_lookup() {
    let config = PipelineConfig::from_lookup(lookup(&[
        ("CHART_PERIOD", "monthly"),
        ("CHART_CHAIN", " eth "),
        ("CHART_MA_WINDOW", "30"),
        ("CHART_CUMULATIVE", "1"),
        ("CHART_EXTREMES", "false"),
        ("CHART_DATE_FORMAT", ""),
    ]))
    .expect("env config");
    assert_eq!(config.period, Some(Period::Monthly));
    assert_eq!(config.chain.as_deref(), Some("eth"));
    assert_eq!(config.moving_average, Some(30));
    assert!(config.cumulative);
    assert!(!config.include_extremes);
    assert_eq!(config.date_format, "%Y-%m-%d", "blank counts as unset");
}

#[test]
fn env_rejects_bad_values() {
    let err = PipelineConfig::from_lookup(lookup(&[("CHART_MA_WINDOW", "ten")])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidEnv { key: "CHART_MA_WINDOW", value: "ten".into() });
    let err = PipelineConfig::from_lookup(lookup(&[("CHART_PERIOD", "hourly")])).unwrap_err();
    assert_eq!(err, ConfigError::UnknownPeriod("hourly".into()));
    let err = PipelineConfig::from_lookup(lookup(&[("CHART_CUMULATIVE", "maybe")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnv { key: "CHART_CUMULATIVE", .. }));
}

#[test]
fn validation_rules() {
    assert_eq!(PipelineConfig::default().with_moving_average(0).validate(), Err(ConfigError::ZeroWindow));
    assert_eq!(PipelineConfig::default().with_value_series("  ").validate(), Err(ConfigError::EmptySeriesName));
    assert_eq!(
        PipelineConfig::default().with_value_series(" Value").validate(),
        Err(ConfigError::PaddedSeriesName(" Value".into()))
    );
    assert_eq!(
        PipelineConfig::default().with_value_series("date").validate(),
        Err(ConfigError::ReservedSeriesName("date".into()))
    );
    assert_eq!(
        PipelineConfig::default().with_cumulative(true).with_value_series("Cumulative").validate(),
        Err(ConfigError::ReservedSeriesName("Cumulative".into()))
    );
    // "Min" is only taken when extremes are charted
    assert!(PipelineConfig::default().with_value_series("Min").validate().is_ok());
    assert!(PipelineConfig::default()
        .with_period(Period::Daily)
        .with_extremes(true)
        .with_value_series("Min")
        .validate()
        .is_err());
    assert!(matches!(
        PipelineConfig::default().with_date_format("%Q").validate(),
        Err(ConfigError::InvalidDateFormat(_))
    ));
}

#[test]
fn missing_file_reports_path() {
    let err = PipelineConfig::from_path("does/not/exist.json").unwrap_err();
    assert!(matches!(err, ConfigError::Read { ref path, .. } if path.contains("exist.json")));
}
