//! Absolute-date to relative-day conversion
//!
//! Every function here is pure. Unparseable input is recoverable and is
//! reported as `None` (or an invalid [`RelativeDateResult`]), never as an error.

use crate::domain::{AgeAtEnrollment, CalendarDate, DateInput, RelativeDateResult, RelativeDay};
use chrono::Datelike;

/// Message returned when the enrollment date does not parse
pub const INVALID_ENROLLMENT_DATE: &str = "Invalid enrollment date provided";

/// Message returned when the event date does not parse
pub const INVALID_EVENT_DATE: &str = "Invalid event date provided";

/// Resolves a date input to a real calendar date.
///
/// Text is parsed as ISO-8601 after trimming; empty or whitespace-only text
/// is invalid. chrono values are always valid dates.
pub fn parse_date<'a>(input: impl Into<DateInput<'a>>) -> Option<CalendarDate> {
    match input.into() {
        DateInput::Text(text) => {
            let parsed = CalendarDate::parse_iso(text);
            if parsed.is_none() {
                tracing::trace!(length = text.len(), "Date text did not parse as ISO-8601");
            }
            parsed
        }
        DateInput::Date(date) => Some(CalendarDate::from_date(date)),
        DateInput::DateTime(datetime) => Some(CalendarDate::from_datetime(datetime)),
    }
}

/// Days from `enrollment_date` to `absolute_date`.
///
/// Negative before enrollment, zero on the enrollment day itself. Returns
/// `None` if either date fails to parse.
///
/// ```
/// use dayzero::core::convert::convert_to_relative_days;
///
/// assert_eq!(convert_to_relative_days("2024-03-22", "2024-03-15"), Some(7));
/// assert_eq!(convert_to_relative_days("2024-03-08", "2024-03-15"), Some(-7));
/// assert_eq!(convert_to_relative_days("garbage", "2024-03-15"), None);
/// ```
pub fn convert_to_relative_days<'a, 'b>(
    absolute_date: impl Into<DateInput<'a>>,
    enrollment_date: impl Into<DateInput<'b>>,
) -> Option<RelativeDay> {
    let enrollment = parse_date(enrollment_date)?;
    let event = parse_date(absolute_date)?;
    Some(event.days_since(&enrollment))
}

/// Same arithmetic as [`convert_to_relative_days`], reporting why a conversion failed.
///
/// An invalid enrollment date takes precedence over an invalid event date.
pub fn convert_to_relative_days_detailed<'a, 'b>(
    absolute_date: impl Into<DateInput<'a>>,
    enrollment_date: impl Into<DateInput<'b>>,
) -> RelativeDateResult {
    let Some(enrollment) = parse_date(enrollment_date) else {
        return RelativeDateResult::invalid(INVALID_ENROLLMENT_DATE);
    };
    let Some(event) = parse_date(absolute_date) else {
        return RelativeDateResult::invalid(INVALID_EVENT_DATE);
    };

    RelativeDateResult::valid(event.days_since(&enrollment))
}

/// Whole completed years from `date_of_birth` to `enrollment_date`.
///
/// Returns `None` if either date fails to parse, or if the date of birth
/// falls after enrollment. The date of birth is not retained anywhere.
///
/// ```
/// use dayzero::core::convert::calculate_age_at_enrollment;
///
/// assert_eq!(calculate_age_at_enrollment("1985-06-20", "2024-03-15"), Some(38));
/// assert_eq!(calculate_age_at_enrollment("1985-06-20", "2024-07-01"), Some(39));
/// ```
pub fn calculate_age_at_enrollment<'a, 'b>(
    date_of_birth: impl Into<DateInput<'a>>,
    enrollment_date: impl Into<DateInput<'b>>,
) -> Option<AgeAtEnrollment> {
    let dob = parse_date(date_of_birth)?.date;
    let enrollment = parse_date(enrollment_date)?.date;

    let mut years = enrollment.year() - dob.year();
    if (enrollment.month(), enrollment.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }

    match AgeAtEnrollment::try_from(years) {
        Ok(age) => Some(age),
        Err(_) => {
            tracing::debug!("Date of birth falls after enrollment; age not derived");
            None
        }
    }
}

/// Converts an optional source-system date field (REDCap exports use `YYYY-MM-DD`).
///
/// Missing, empty, and whitespace-only values are "no date present" and
/// yield `None` without a parse attempt.
pub fn convert_redcap_date<'b>(
    source_date: Option<&str>,
    enrollment_date: impl Into<DateInput<'b>>,
) -> Option<RelativeDay> {
    let source_date = source_date.filter(|s| !s.trim().is_empty())?;
    convert_to_relative_days(source_date, enrollment_date)
}
