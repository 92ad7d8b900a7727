//! Tests for engine configuration loading.

use slot_engine::config::{EngineConfig, MAX_PUBLIC_WINDOW_DAYS};
use slot_engine::exception::YearlyMatch;
use slot_engine::SlotError;

#[test]
fn empty_document_yields_defaults() {
    let config = EngineConfig::from_json("{}").unwrap();

    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.horizon_months, 3);
    assert_eq!(config.public_window_days, 30);
    assert_eq!(config.yearly_match, YearlyMatch::Projected);
}

#[test]
fn fields_are_camel_case() {
    let config = EngineConfig::from_json(
        r#"{"horizonMonths": 6, "publicWindowDays": 14, "yearlyMatch": "wrapAware"}"#,
    )
    .unwrap();

    assert_eq!(config.horizon_months, 6);
    assert_eq!(config.public_window_days, 14);
    assert_eq!(config.yearly_match, YearlyMatch::WrapAware);
}

#[test]
fn zero_horizon_is_rejected() {
    let result = EngineConfig::from_json(r#"{"horizonMonths": 0}"#);

    assert!(matches!(result, Err(SlotError::Config(_))));
}

#[test]
fn oversized_public_window_is_rejected() {
    let result = EngineConfig::from_json(r#"{"publicWindowDays": 4294967295}"#);

    assert!(matches!(result, Err(SlotError::Config(_))));
}

#[test]
fn public_window_at_the_limit_is_accepted() {
    let json = format!(r#"{{"publicWindowDays": {}}}"#, MAX_PUBLIC_WINDOW_DAYS);
    let config = EngineConfig::from_json(&json).unwrap();

    assert_eq!(config.public_window_days, MAX_PUBLIC_WINDOW_DAYS);
}

#[test]
fn malformed_json_is_a_json_error() {
    let result = EngineConfig::from_json("{horizonMonths:");

    assert!(matches!(result, Err(SlotError::Json(_))));
}

#[test]
fn missing_file_is_a_config_error() {
    let result = EngineConfig::from_path("/nonexistent/slot-engine.json");

    assert!(matches!(result, Err(SlotError::Config(_))));
}
