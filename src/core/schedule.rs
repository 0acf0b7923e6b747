//! Visit schedule arithmetic on relative days
//!
//! Display labels, the standard visit vocabulary, tolerance windows, and
//! on-time/overdue classification. Nothing here touches an absolute date.

use crate::domain::RelativeDay;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance applied when a caller does not specify one
pub const DEFAULT_TOLERANCE_DAYS: i64 = 7;

/// The closed vocabulary of standard visit names and their scheduled days
pub const STANDARD_VISITS: [(&str, RelativeDay); 10] = [
    ("baseline", 0),
    ("week 1", 7),
    ("week 2", 14),
    ("week 4", 28),
    ("month 1", 30),
    ("month 2", 60),
    ("month 3", 90),
    ("month 6", 180),
    ("year 1", 365),
    ("year 2", 730),
];

/// Human-readable label for a relative day.
///
/// Multiples of 365 are annotated as years, then multiples of 30 as months,
/// then multiples of 7 as weeks. The sign stays in the numeric part only.
///
/// ```
/// use dayzero::core::schedule::format_relative_days;
///
/// assert_eq!(format_relative_days(0), "Day 0 (Enrollment)");
/// assert_eq!(format_relative_days(30), "Day 30 (Month 1)");
/// assert_eq!(format_relative_days(-14), "Day -14 (Week 2)");
/// assert_eq!(format_relative_days(10), "Day 10");
/// ```
pub fn format_relative_days(days: RelativeDay) -> String {
    if days == 0 {
        return "Day 0 (Enrollment)".to_string();
    }

    let abs_days = days.unsigned_abs();
    let suffix = if abs_days % 365 == 0 {
        format!(" (Year {})", abs_days / 365)
    } else if abs_days % 30 == 0 {
        format!(" (Month {})", abs_days / 30)
    } else if abs_days % 7 == 0 {
        format!(" (Week {})", abs_days / 7)
    } else {
        String::new()
    };

    format!("Day {days}{suffix}")
}

/// Scheduled day for a standard visit name, case-insensitive and trimmed
pub fn scheduled_visit_day(visit_name: &str) -> Option<RelativeDay> {
    let normalized = normalize_visit_name(visit_name);
    STANDARD_VISITS
        .iter()
        .find(|(name, _)| *name == normalized)
        .map(|(_, day)| *day)
}

/// Whether `actual_day` falls within `tolerance_days` of `scheduled_day` (inclusive)
pub fn is_visit_on_schedule(
    scheduled_day: RelativeDay,
    actual_day: RelativeDay,
    tolerance_days: i64,
) -> bool {
    u64::try_from(tolerance_days)
        .is_ok_and(|tolerance| actual_day.abs_diff(scheduled_day) <= tolerance)
}

/// Earliest and latest acceptable days around a scheduled visit.
///
/// Bounds saturate at the ends of the `i64` range.
pub fn visit_window(scheduled_day: RelativeDay, tolerance_days: i64) -> VisitWindow {
    VisitWindow {
        earliest: scheduled_day.saturating_sub(tolerance_days),
        latest: scheduled_day.saturating_add(tolerance_days),
    }
}

fn normalize_visit_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Inclusive range of acceptable relative days for a visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitWindow {
    pub earliest: RelativeDay,
    pub latest: RelativeDay,
}

impl VisitWindow {
    /// Whether `day` lies inside the window, bounds included
    pub fn contains(&self, day: RelativeDay) -> bool {
        (self.earliest..=self.latest).contains(&day)
    }
}

impl fmt::Display for VisitWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            format_relative_days(self.earliest),
            format_relative_days(self.latest)
        )
    }
}

/// Where a visit stands relative to its window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitTiming {
    /// Completed inside the window
    CompletedOnTime,
    /// Completed before the window opened
    CompletedEarly,
    /// Completed after the window closed
    CompletedLate,
    /// Not completed; window has not opened yet
    Upcoming,
    /// Not completed; window is open
    InWindow,
    /// Not completed; window has closed
    Overdue,
}

impl VisitTiming {
    /// Classifies a visit.
    ///
    /// `current_day` is the participant's study day at the time of the check
    /// and is only consulted for visits that have not been completed.
    pub fn classify(
        scheduled_day: RelativeDay,
        completed_day: Option<RelativeDay>,
        current_day: RelativeDay,
        tolerance_days: i64,
    ) -> Self {
        let window = visit_window(scheduled_day, tolerance_days);
        match completed_day {
            Some(day) if window.contains(day) => Self::CompletedOnTime,
            Some(day) if day < window.earliest => Self::CompletedEarly,
            Some(_) => Self::CompletedLate,
            None if current_day < window.earliest => Self::Upcoming,
            None if current_day <= window.latest => Self::InWindow,
            None => Self::Overdue,
        }
    }
}

impl fmt::Display for VisitTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::CompletedOnTime => "completed on time",
            Self::CompletedEarly => "completed early",
            Self::CompletedLate => "completed late",
            Self::Upcoming => "upcoming",
            Self::InWindow => "in window",
            Self::Overdue => "overdue",
        };
        f.write_str(label)
    }
}

/// Visit record status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitStatus {
    #[default]
    Scheduled,
    Completed,
    Missed,
    Cancelled,
}

impl VisitStatus {
    /// Maps a free-text status from a source calendar onto a visit status.
    ///
    /// Anything that is not recognisably completed, missed, or cancelled
    /// (including blank text) counts as scheduled.
    pub fn from_source_text(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.contains("complete") {
            Self::Completed
        } else if lower.contains("miss") {
            Self::Missed
        } else if lower.contains("cancel") {
            Self::Cancelled
        } else {
            Self::Scheduled
        }
    }
}

/// Tally of visit statuses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitStats {
    pub total: usize,
    pub scheduled: usize,
    pub completed: usize,
    pub missed: usize,
    pub cancelled: usize,
}

impl VisitStats {
    /// Counts each status once
    pub fn tally<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = VisitStatus>,
    {
        statuses.into_iter().fold(Self::default(), |mut stats, status| {
            stats.total += 1;
            match status {
                VisitStatus::Scheduled => stats.scheduled += 1,
                VisitStatus::Completed => stats.completed += 1,
                VisitStatus::Missed => stats.missed += 1,
                VisitStatus::Cancelled => stats.cancelled += 1,
            }
            stats
        })
    }
}

/// One visit in a study's schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitDefinition {
    /// Display name, e.g. "Screening"
    pub name: String,

    /// Scheduled relative day
    pub day: RelativeDay,

    /// Per-visit tolerance; falls back to the schedule default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<i64>,
}

/// A per-study visit schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitSchedule {
    /// Tolerance for visits that do not set their own window
    #[serde(default = "default_tolerance_days")]
    pub default_tolerance_days: i64,

    /// Visit definitions (`[[visits.schedule]]` in the config file)
    #[serde(default = "standard_visit_definitions", rename = "schedule", alias = "visits")]
    pub visits: Vec<VisitDefinition>,
}

fn default_tolerance_days() -> i64 {
    DEFAULT_TOLERANCE_DAYS
}

fn standard_visit_definitions() -> Vec<VisitDefinition> {
    STANDARD_VISITS
        .iter()
        .map(|(name, day)| VisitDefinition {
            name: title_case(name),
            day: *day,
            window: None,
        })
        .collect()
}

fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl Default for VisitSchedule {
    fn default() -> Self {
        Self {
            default_tolerance_days: default_tolerance_days(),
            visits: standard_visit_definitions(),
        }
    }
}

impl VisitSchedule {
    /// Finds a visit by name, case-insensitive and trimmed
    pub fn find(&self, visit_name: &str) -> Option<&VisitDefinition> {
        let normalized = normalize_visit_name(visit_name);
        self.visits
            .iter()
            .find(|visit| normalize_visit_name(&visit.name) == normalized)
    }

    /// Tolerance in effect for `visit`
    pub fn tolerance_for(&self, visit: &VisitDefinition) -> i64 {
        visit.window.unwrap_or(self.default_tolerance_days)
    }

    /// Window for `visit` using its own tolerance or the schedule default
    pub fn window_for(&self, visit: &VisitDefinition) -> VisitWindow {
        visit_window(visit.day, self.tolerance_for(visit))
    }

    /// Validates the schedule definitions
    pub fn validate(&self) -> Result<(), String> {
        if self.default_tolerance_days < 0 {
            return Err(format!(
                "default_tolerance_days must be non-negative, got {}",
                self.default_tolerance_days
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for visit in &self.visits {
            if visit.name.trim().is_empty() {
                return Err("visit names must not be blank".to_string());
            }
            if !seen.insert(normalize_visit_name(&visit.name)) {
                return Err(format!("duplicate visit name '{}'", visit.name));
            }
            if let Some(window) = visit.window {
                if window < 0 {
                    return Err(format!(
                        "window for visit '{}' must be non-negative, got {window}",
                        visit.name
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, "Day 0 (Enrollment)")]
    #[test_case(7, "Day 7 (Week 1)")]
    #[test_case(28, "Day 28 (Week 4)")]
    #[test_case(30, "Day 30 (Month 1)")]
    #[test_case(60, "Day 60 (Month 2)")]
    #[test_case(210, "Day 210 (Month 7)" ; "month wins over week")]
    #[test_case(365, "Day 365 (Year 1)")]
    #[test_case(730, "Day 730 (Year 2)")]
    #[test_case(10, "Day 10")]
    #[test_case(1, "Day 1")]
    #[test_case(-7, "Day -7 (Week 1)")]
    #[test_case(-365, "Day -365 (Year 1)")]
    #[test_case(-3, "Day -3")]
    fn test_format_relative_days(days: i64, expected: &str) {
        assert_eq!(format_relative_days(days), expected);
    }

    #[test]
    fn test_format_extreme_values() {
        assert!(format_relative_days(i64::MIN).starts_with("Day -"));
        assert!(format_relative_days(i64::MAX).starts_with("Day "));
    }

    #[test_case("Baseline", Some(0))]
    #[test_case("Week 1", Some(7))]
    #[test_case("week 1  ", Some(7))]
    #[test_case("  MONTH 6", Some(180))]
    #[test_case("Year 2", Some(730))]
    #[test_case("week  1", None ; "internal whitespace is not collapsed")]
    #[test_case("unknown", None)]
    #[test_case("", None)]
    fn test_scheduled_visit_day(name: &str, expected: Option<i64>) {
        assert_eq!(scheduled_visit_day(name), expected);
    }

    #[test]
    fn test_is_visit_on_schedule_boundaries() {
        assert!(is_visit_on_schedule(30, 37, 7));
        assert!(is_visit_on_schedule(30, 23, 7));
        assert!(!is_visit_on_schedule(30, 38, 7));
        assert!(!is_visit_on_schedule(30, 22, 7));
        assert!(is_visit_on_schedule(30, 30, 0));
        assert!(!is_visit_on_schedule(30, 31, 0));
        assert!(is_visit_on_schedule(-7, -2, DEFAULT_TOLERANCE_DAYS));
    }

    #[test]
    fn test_negative_tolerance_accepts_nothing() {
        assert!(!is_visit_on_schedule(30, 30, -1));
    }

    #[test]
    fn test_visit_window() {
        assert_eq!(
            visit_window(30, 7),
            VisitWindow {
                earliest: 23,
                latest: 37
            }
        );
        assert_eq!(
            visit_window(-7, 7),
            VisitWindow {
                earliest: -14,
                latest: 0
            }
        );
    }

    #[test]
    fn test_window_display() {
        assert_eq!(visit_window(30, 7).to_string(), "Day 23 - Day 37");
    }

    #[test]
    fn test_visit_window_saturates_at_extremes() {
        let high = visit_window(i64::MAX - 1, 7);
        assert_eq!(high.earliest, i64::MAX - 8);
        assert_eq!(high.latest, i64::MAX);
        assert!(high.contains(i64::MAX));

        let low = visit_window(i64::MIN + 1, 7);
        assert_eq!(low.earliest, i64::MIN);
        assert_eq!(low.latest, i64::MIN + 8);

        let wide = visit_window(0, i64::MAX);
        assert_eq!(wide.earliest, -i64::MAX);
        assert_eq!(wide.latest, i64::MAX);

        assert_eq!(
            VisitTiming::classify(i64::MAX - 1, None, 0, 7),
            VisitTiming::Upcoming
        );
        assert_eq!(
            VisitTiming::classify(i64::MAX - 1, Some(i64::MAX), i64::MAX, 7),
            VisitTiming::CompletedOnTime
        );
    }

    #[test]
    fn test_window_agrees_with_on_schedule() {
        let window = visit_window(90, 14);
        for day in 60..120 {
            assert_eq!(window.contains(day), is_visit_on_schedule(90, day, 14));
        }
    }

    #[test_case(Some(33), 100, VisitTiming::CompletedOnTime)]
    #[test_case(Some(20), 100, VisitTiming::CompletedEarly)]
    #[test_case(Some(40), 100, VisitTiming::CompletedLate)]
    #[test_case(None, 10, VisitTiming::Upcoming)]
    #[test_case(None, 23, VisitTiming::InWindow)]
    #[test_case(None, 37, VisitTiming::InWindow)]
    #[test_case(None, 38, VisitTiming::Overdue)]
    fn test_visit_timing(completed: Option<i64>, current: i64, expected: VisitTiming) {
        assert_eq!(VisitTiming::classify(30, completed, current, 7), expected);
    }

    #[test_case("Completed", VisitStatus::Completed)]
    #[test_case("visit complete", VisitStatus::Completed)]
    #[test_case("Missed", VisitStatus::Missed)]
    #[test_case("CANCELLED", VisitStatus::Cancelled)]
    #[test_case("Canceled by participant", VisitStatus::Cancelled)]
    #[test_case("Confirmed", VisitStatus::Scheduled)]
    #[test_case("", VisitStatus::Scheduled)]
    fn test_visit_status_from_source_text(text: &str, expected: VisitStatus) {
        assert_eq!(VisitStatus::from_source_text(text), expected);
    }

    #[test]
    fn test_visit_stats_tally() {
        let stats = VisitStats::tally(
            ["Completed", "Scheduled", "Missed", "Cancelled", "complete", ""]
                .into_iter()
                .map(VisitStatus::from_source_text),
        );
        assert_eq!(
            stats,
            VisitStats {
                total: 6,
                scheduled: 2,
                completed: 2,
                missed: 1,
                cancelled: 1,
            }
        );
    }

    #[test]
    fn test_default_schedule_matches_standard_vocabulary() {
        let schedule = VisitSchedule::default();
        assert_eq!(schedule.visits.len(), STANDARD_VISITS.len());
        for (name, day) in STANDARD_VISITS {
            let visit = schedule.find(name).unwrap();
            assert_eq!(visit.day, day);
            assert_eq!(scheduled_visit_day(&visit.name), Some(day));
        }
        assert_eq!(schedule.find("month 1").unwrap().name, "Month 1");
    }

    #[test]
    fn test_custom_schedule_windows() {
        let schedule: VisitSchedule = toml::from_str(
            r#"
default_tolerance_days = 3

[[schedule]]
name = "Screening"
day = -7
window = 7

[[schedule]]
name = "Baseline"
day = 0
window = 0

[[schedule]]
name = "Week 1"
day = 7
"#,
        )
        .unwrap();

        assert!(schedule.validate().is_ok());
        let screening = schedule.find("screening").unwrap();
        assert_eq!(schedule.window_for(screening), visit_window(-7, 7));
        let week1 = schedule.find("WEEK 1").unwrap();
        assert_eq!(schedule.tolerance_for(week1), 3);
        assert!(schedule.find("Month 1").is_none());
    }

    #[test]
    fn test_schedule_validation_rejects_duplicates() {
        let mut schedule = VisitSchedule::default();
        schedule.visits.push(VisitDefinition {
            name: "BASELINE".to_string(),
            day: 0,
            window: None,
        });
        assert!(schedule.validate().is_err());
    }
}
