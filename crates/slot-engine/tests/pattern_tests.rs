//! Tests for pattern parsing, validation, and wire format.

use chrono::{NaiveDate, Utc, Weekday};
use slot_engine::pattern::{DaysOfWeek, PatternRequest, SlotType, TimeOfDay};
use slot_engine::SlotError;
use uuid::Uuid;

fn request() -> PatternRequest {
    PatternRequest {
        slot_type: "Hour".to_string(),
        slot_duration: 60,
        start_time: Some("09:00".parse().unwrap()),
        end_time: Some("17:00".parse().unwrap()),
        days_of_week: Some("1,2,3,4,5".to_string()),
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 1, 31),
    }
}

// ── SlotType ────────────────────────────────────────────────────────────────

#[test]
fn slot_type_parse_is_case_insensitive() {
    assert_eq!(SlotType::parse("minute"), Some(SlotType::Minute));
    assert_eq!(SlotType::parse("HOUR"), Some(SlotType::Hour));
    assert_eq!(SlotType::parse(" Day "), Some(SlotType::Day));
    assert_eq!(SlotType::parse("Week"), Some(SlotType::Week));
    assert_eq!(SlotType::parse("month"), Some(SlotType::Month));
    assert_eq!(SlotType::parse("year"), None);
    assert_eq!(SlotType::parse(""), None);
}

#[test]
fn only_minute_and_hour_are_time_based() {
    assert!(SlotType::Minute.is_time_based());
    assert!(SlotType::Hour.is_time_based());
    assert!(!SlotType::Day.is_time_based());
    assert!(!SlotType::Week.is_time_based());
    assert!(!SlotType::Month.is_time_based());
}

// ── TimeOfDay ───────────────────────────────────────────────────────────────

#[test]
fn time_of_day_accepts_short_and_long_forms() {
    let short: TimeOfDay = "09:30".parse().unwrap();
    let long: TimeOfDay = "09:30:00".parse().unwrap();
    assert_eq!(short, long);
    assert_eq!(short.seconds(), 9 * 3600 + 30 * 60);
    assert_eq!(short.to_string(), "09:30:00");
}

#[test]
fn time_of_day_allows_end_of_day() {
    let end: TimeOfDay = "24:00:00".parse().unwrap();
    assert_eq!(end, TimeOfDay::END_OF_DAY);
    assert_eq!(end.to_string(), "24:00:00");
}

#[test]
fn time_of_day_rejects_out_of_range_values() {
    for bad in ["24:00:01", "25:00", "09:60", "09:00:60", "9", "nine:00", "09:00:00:00"] {
        assert!(
            matches!(bad.parse::<TimeOfDay>(), Err(SlotError::InvalidTimeOfDay(_))),
            "{} should be rejected",
            bad
        );
    }
}

// ── DaysOfWeek ──────────────────────────────────────────────────────────────

#[test]
fn days_of_week_absent_or_empty_means_all_days() {
    assert!(DaysOfWeek::parse(None).is_all());
    assert!(DaysOfWeek::parse(Some("")).is_all());
    assert!(DaysOfWeek::parse(Some(" , ")).is_all());
}

#[test]
fn days_of_week_parses_sunday_as_zero() {
    let days = DaysOfWeek::parse(Some("0,6"));
    assert!(days.contains(Weekday::Sun));
    assert!(days.contains(Weekday::Sat));
    assert!(!days.contains(Weekday::Mon));
    assert!(!days.is_all());
}

#[test]
fn days_of_week_drops_bad_tokens_per_entry() {
    let days = DaysOfWeek::parse(Some("2,foo,7,-1, 4"));
    assert!(days.contains(Weekday::Tue));
    assert!(days.contains(Weekday::Thu));
    assert!(!days.contains(Weekday::Wed));
}

// ── Validation ──────────────────────────────────────────────────────────────

#[test]
fn well_formed_request_validates() {
    assert!(request().validate().is_ok());
}

#[test]
fn non_positive_duration_is_rejected() {
    let req = PatternRequest {
        slot_duration: 0,
        ..request()
    };
    assert!(matches!(req.validate(), Err(SlotError::InvalidPattern(_))));
}

#[test]
fn start_time_after_end_time_is_rejected() {
    let req = PatternRequest {
        start_time: Some("18:00".parse().unwrap()),
        ..request()
    };
    assert!(matches!(req.validate(), Err(SlotError::InvalidPattern(_))));
}

#[test]
fn missing_start_time_defaults_to_midnight() {
    // Only an end bound is given; the start defaults to 00:00.
    let req = PatternRequest {
        start_time: None,
        ..request()
    };
    assert!(req.validate().is_ok());
}

#[test]
fn end_date_before_start_date_is_rejected() {
    let req = PatternRequest {
        end_date: NaiveDate::from_ymd_opt(2023, 12, 31),
        ..request()
    };
    assert!(matches!(req.validate(), Err(SlotError::InvalidPattern(_))));
}

#[test]
fn unknown_slot_type_is_accepted() {
    let req = PatternRequest {
        slot_type: "Fortnight".to_string(),
        ..request()
    };
    assert!(req.validate().is_ok());
}

// ── Wire format ─────────────────────────────────────────────────────────────

#[test]
fn request_deserializes_from_camel_case_json() {
    let json = r#"{
        "slotType": "Hour",
        "slotDuration": 60,
        "startTime": "09:00:00",
        "endTime": "17:00:00",
        "daysOfWeek": "1,2,3,4,5",
        "startDate": "2024-01-01",
        "endDate": "2024-01-31"
    }"#;

    let parsed: PatternRequest = serde_json::from_str(json).unwrap();

    assert_eq!(parsed, request());
}

#[test]
fn optional_request_fields_may_be_omitted() {
    let json = r#"{"slotType":"Day","slotDuration":1440,"startDate":"2024-01-01"}"#;

    let parsed: PatternRequest = serde_json::from_str(json).unwrap();

    assert_eq!(parsed.start_time, None);
    assert_eq!(parsed.end_time, None);
    assert_eq!(parsed.days_of_week, None);
    assert_eq!(parsed.end_date, None);
}

#[test]
fn malformed_time_of_day_fails_deserialization() {
    let json = r#"{"slotType":"Hour","slotDuration":60,"startTime":"9am","startDate":"2024-01-01"}"#;

    assert!(serde_json::from_str::<PatternRequest>(json).is_err());
}

#[test]
fn update_keeps_identity_and_replaces_rule() {
    let service_id = Uuid::new_v4();
    let mut pattern = request().into_pattern(service_id, Utc::now());
    let id = pattern.id;

    PatternRequest {
        slot_type: "Day".to_string(),
        days_of_week: None,
        ..request()
    }
    .apply_to(&mut pattern);

    assert_eq!(pattern.id, id);
    assert_eq!(pattern.service_id, service_id);
    assert_eq!(pattern.kind(), Some(SlotType::Day));
    assert_eq!(pattern.days_of_week, None);
}
