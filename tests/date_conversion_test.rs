//! Integration tests for relative-day conversion and visit scheduling

use chrono::{Duration, NaiveDate};
use dayzero::core::convert::{
    calculate_age_at_enrollment, convert_redcap_date, convert_to_relative_days,
    convert_to_relative_days_detailed, INVALID_ENROLLMENT_DATE,
};
use dayzero::core::schedule::{
    format_relative_days, is_visit_on_schedule, scheduled_visit_day, visit_window, VisitWindow,
};
use dayzero::domain::RelativeDateResult;

#[test]
fn test_enrollment_day_is_day_zero() {
    let start = NaiveDate::from_ymd_opt(2023, 12, 25).unwrap();
    for offset in 0..800 {
        let date = (start + Duration::days(offset)).format("%Y-%m-%d").to_string();
        assert_eq!(
            convert_to_relative_days(date.as_str(), date.as_str()),
            Some(0),
            "{date}"
        );
    }
}

#[test]
fn test_relative_days_strictly_increase_with_calendar_order() {
    let enrollment = "2024-03-15";
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();

    let days: Vec<i64> = (0..1200)
        .map(|offset| {
            let date = (start + Duration::days(offset)).format("%Y-%m-%d").to_string();
            convert_to_relative_days(date.as_str(), enrollment).unwrap()
        })
        .collect();

    assert!(days.windows(2).all(|pair| pair[1] == pair[0] + 1));
}

#[test]
fn test_one_week_either_side_of_enrollment() {
    assert_eq!(convert_to_relative_days("2024-03-22", "2024-03-15"), Some(7));
    assert_eq!(convert_to_relative_days("2024-03-08", "2024-03-15"), Some(-7));
}

#[test]
fn test_datetime_text_uses_calendar_day() {
    assert_eq!(
        convert_to_relative_days("2024-03-22T23:59:59Z", "2024-03-15T08:00:00Z"),
        Some(7)
    );
}

#[test]
fn test_detailed_invalid_enrollment_wins() {
    let expected = RelativeDateResult {
        relative_days: 0,
        valid: false,
        error: Some(INVALID_ENROLLMENT_DATE.to_string()),
    };
    assert_eq!(
        convert_to_relative_days_detailed("2024-03-22", "not a date"),
        expected
    );
    assert_eq!(
        convert_to_relative_days_detailed("also not a date", "not a date"),
        expected
    );
}

#[test]
fn test_detailed_result_serializes_camel_case() {
    let value = serde_json::to_value(convert_to_relative_days_detailed(
        "2024-03-22",
        "2024-03-15",
    ))
    .unwrap();
    assert_eq!(value, serde_json::json!({"relativeDays": 7, "valid": true}));
}

#[test]
fn test_age_at_enrollment_birthday_boundary() {
    assert_eq!(calculate_age_at_enrollment("1985-06-20", "2024-03-15"), Some(38));
    assert_eq!(calculate_age_at_enrollment("1985-06-20", "2024-07-01"), Some(39));
    assert_eq!(calculate_age_at_enrollment("1985-06-20", "2024-06-20"), Some(39));
}

#[test]
fn test_redcap_blank_values_are_absent() {
    for enrollment in ["2024-03-15", "garbage"] {
        assert_eq!(convert_redcap_date(None, enrollment), None);
        assert_eq!(convert_redcap_date(Some(""), enrollment), None);
        assert_eq!(convert_redcap_date(Some("   "), enrollment), None);
    }
    assert_eq!(convert_redcap_date(Some("2024-04-12"), "2024-03-15"), Some(28));
}

#[test]
fn test_format_relative_days_labels() {
    assert_eq!(format_relative_days(0), "Day 0 (Enrollment)");
    assert_eq!(format_relative_days(7), "Day 7 (Week 1)");
    assert_eq!(format_relative_days(30), "Day 30 (Month 1)");
    assert_eq!(format_relative_days(365), "Day 365 (Year 1)");
    assert_eq!(format_relative_days(10), "Day 10");
}

#[test]
fn test_scheduled_visit_lookup() {
    assert_eq!(scheduled_visit_day("Week 1"), Some(7));
    assert_eq!(scheduled_visit_day("week 1  "), Some(7));
    assert_eq!(scheduled_visit_day("unknown"), None);
}

#[test]
fn test_visit_schedule_tolerance() {
    assert!(is_visit_on_schedule(30, 37, 7));
    assert!(!is_visit_on_schedule(30, 38, 7));
    assert_eq!(
        visit_window(30, 7),
        VisitWindow {
            earliest: 23,
            latest: 37
        }
    );
}

#[test]
fn test_end_to_end_visit_from_absolute_dates() {
    let enrollment = "2024-03-15";
    let actual = convert_to_relative_days("2024-04-16", enrollment).unwrap();
    let scheduled = scheduled_visit_day("Month 1").unwrap();

    assert_eq!(actual, 32);
    assert!(is_visit_on_schedule(scheduled, actual, 7));
    assert!(visit_window(scheduled, 7).contains(actual));
}
