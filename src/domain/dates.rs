//! Calendar date and relative-day value types
//!
//! A [`CalendarDate`] is the only absolute-date type in DayZero and it never
//! crosses the persistence boundary. What does cross it is a [`RelativeDay`]
//! offset from enrollment, or an [`AgeAtEnrollment`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Signed whole-day offset from the enrollment date (Day 0)
pub type RelativeDay = i64;

/// Whole years elapsed from date of birth to the enrollment date
pub type AgeAtEnrollment = u32;

/// Time-of-day layouts accepted after the `T` (or space) separator
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// A real calendar date, optionally carrying the time of day it was read with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarDate {
    /// Calendar day
    pub date: NaiveDate,

    /// Time of day, if the source carried one
    pub time: Option<NaiveTime>,
}

impl CalendarDate {
    /// Creates a date-only value
    pub fn from_date(date: NaiveDate) -> Self {
        Self { date, time: None }
    }

    /// Creates a value from a date and time
    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        Self {
            date: datetime.date(),
            time: Some(datetime.time()),
        }
    }

    /// Parses an ISO-8601 date or datetime string.
    ///
    /// Accepted shapes:
    /// - `YYYY-MM-DD`
    /// - `YYYY-MM-DDThh:mm[:ss[.fff]]` (a space may replace the `T`)
    /// - either of the above followed by `Z` or a `±hh[:mm]` offset
    ///
    /// Offsets are validated but not applied: the calendar date is taken as
    /// written. Returns `None` for anything that is not a real calendar date.
    pub fn parse_iso(text: &str) -> Option<Self> {
        let text = text.trim();
        let date_part = text.get(..10)?;
        if !has_iso_date_shape(date_part) {
            return None;
        }
        let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;

        let rest = &text[10..];
        if rest.is_empty() {
            return Some(Self::from_date(date));
        }

        let time_text = rest.strip_prefix(['T', 't', ' '])?;
        let time_text = strip_offset(time_text)?;
        let time = TIME_FORMATS
            .iter()
            .find_map(|format| NaiveTime::parse_from_str(time_text, format).ok())?;

        Some(Self {
            date,
            time: Some(time),
        })
    }

    /// Whole calendar days from `earlier` to `self`, ignoring any time of day
    pub fn days_since(&self, earlier: &CalendarDate) -> RelativeDay {
        self.date.signed_duration_since(earlier.date).num_days()
    }
}

/// `YYYY-MM-DD` with ASCII digits only
fn has_iso_date_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(idx, b)| match idx {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Removes a trailing `Z` or `±hh[:mm]`/`±hhmm` offset, rejecting malformed ones
fn strip_offset(time_text: &str) -> Option<&str> {
    if let Some(stripped) = time_text.strip_suffix(['Z', 'z']) {
        return Some(stripped);
    }

    let Some(sign_idx) = time_text.rfind(['+', '-']) else {
        return Some(time_text);
    };

    let offset: String = time_text[sign_idx + 1..]
        .chars()
        .filter(|c| *c != ':')
        .collect();
    let valid = match offset.len() {
        2 | 4 if offset.bytes().all(|b| b.is_ascii_digit()) => {
            let hours: u32 = offset[..2].parse().ok()?;
            let minutes: u32 = offset
                .get(2..)
                .filter(|m| !m.is_empty())
                .map_or(Ok(0), str::parse::<u32>)
                .ok()?;
            hours <= 23 && minutes <= 59
        }
        _ => false,
    };

    valid.then(|| &time_text[..sign_idx])
}

/// A date supplied either as text or as an already-typed chrono value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput<'a> {
    /// ISO-8601 text, parsed on use
    Text(&'a str),
    /// Calendar date
    Date(NaiveDate),
    /// Date and time of day
    DateTime(NaiveDateTime),
}

impl<'a> From<&'a str> for DateInput<'a> {
    fn from(value: &'a str) -> Self {
        DateInput::Text(value)
    }
}

impl<'a> From<&'a String> for DateInput<'a> {
    fn from(value: &'a String) -> Self {
        DateInput::Text(value.as_str())
    }
}

impl From<NaiveDate> for DateInput<'_> {
    fn from(value: NaiveDate) -> Self {
        DateInput::Date(value)
    }
}

impl From<NaiveDateTime> for DateInput<'_> {
    fn from(value: NaiveDateTime) -> Self {
        DateInput::DateTime(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateInput<'_> {
    fn from(value: DateTime<Tz>) -> Self {
        DateInput::DateTime(value.naive_local())
    }
}

impl From<CalendarDate> for DateInput<'_> {
    fn from(value: CalendarDate) -> Self {
        match value.time {
            Some(time) => DateInput::DateTime(value.date.and_time(time)),
            None => DateInput::Date(value.date),
        }
    }
}

/// Outcome of a fallible relative-day conversion.
///
/// `relative_days` is `0` whenever `valid` is false. That zero is a sentinel,
/// so callers check `valid` first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelativeDateResult {
    /// Days since enrollment
    pub relative_days: RelativeDay,

    /// Whether both dates parsed
    pub valid: bool,

    /// Reason the conversion failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RelativeDateResult {
    /// A successful conversion
    pub fn valid(relative_days: RelativeDay) -> Self {
        Self {
            relative_days,
            valid: true,
            error: None,
        }
    }

    /// A failed conversion carrying the sentinel `relative_days: 0`
    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            relative_days: 0,
            valid: false,
            error: Some(error.into()),
        }
    }

    /// The offset, if the conversion succeeded
    pub fn days(&self) -> Option<RelativeDay> {
        self.valid.then_some(self.relative_days)
    }
}
