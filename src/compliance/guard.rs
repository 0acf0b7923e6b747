//! Pre-write guard that rejects absolute dates

use super::patterns::DatePatternSet;
use crate::config::ComplianceConfig;
use crate::domain::{ComplianceViolation, DayZeroError};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, OnceLock};

/// How chrono serializes `NaiveDate`, `NaiveDateTime`, and `DateTime`,
/// including signed years outside 0000..=9999
const NATIVE_DATE_SHAPE: &str = r"^[+-]?[0-9]{4,}-[0-9]{2}-[0-9]{2}(T[0-9]{2}:[0-9]{2}.*)?$";

fn native_date_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| Regex::new(NATIVE_DATE_SHAPE).expect("Native date shape must compile"))
}

/// Walks a record about to be persisted and fails on the first absolute date.
///
/// Strings are tested against the configured [`DatePatternSet`]. Numbers,
/// booleans, and nulls are never flagged.
#[derive(Debug, Clone)]
pub struct ComplianceGuard {
    patterns: Arc<DatePatternSet>,
}

impl ComplianceGuard {
    /// Guard with the built-in pattern library
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self::with_patterns(DatePatternSet::default_patterns()?))
    }

    /// Guard with a custom pattern set
    pub fn with_patterns(patterns: DatePatternSet) -> Self {
        Self {
            patterns: Arc::new(patterns),
        }
    }

    /// Guard built from the `[compliance]` configuration section
    pub fn from_config(config: &ComplianceConfig) -> anyhow::Result<Self> {
        let patterns = match &config.pattern_library {
            Some(path) => DatePatternSet::from_file(path)?,
            None => DatePatternSet::default_patterns()?,
        }
        .without(&config.disabled_patterns)?
        .with_allow_patterns(&config.allow_patterns)?;

        tracing::debug!(
            active_patterns = patterns.patterns().len(),
            allow_patterns = config.allow_patterns.len(),
            "Compliance guard configured"
        );

        Ok(Self::with_patterns(patterns))
    }

    /// The active pattern set
    pub fn patterns(&self) -> &DatePatternSet {
        &self.patterns
    }

    /// Fails with the path and value of the first absolute date found in `data`
    pub fn validate(&self, data: &Value) -> Result<(), ComplianceViolation> {
        self.check_value(data, "", false)
    }

    /// Serializes `data` to JSON and validates the result.
    ///
    /// Every string shaped like a serialized chrono date or date-time is
    /// rejected before the configured pattern set is consulted, so disabled
    /// patterns and allow patterns never let a native date through.
    pub fn validate_serializable<T: Serialize + ?Sized>(&self, data: &T) -> crate::domain::Result<()> {
        let value = serde_json::to_value(data)?;
        self.check_value(&value, "", true).map_err(DayZeroError::from)
    }

    fn check_value(
        &self,
        value: &Value,
        path: &str,
        reject_native: bool,
    ) -> Result<(), ComplianceViolation> {
        match value {
            Value::String(s) => {
                let matched = if reject_native && native_date_shape().is_match(s) {
                    Some("native_date")
                } else {
                    self.patterns.find_match(s).map(|p| p.name.as_str())
                };
                if let Some(pattern) = matched {
                    // The value itself is PHI and stays out of the log
                    tracing::warn!(
                        field_path = %path,
                        pattern = %pattern,
                        "Absolute date detected in record bound for storage"
                    );
                    return Err(ComplianceViolation::new(path, s.as_str()));
                }
            }
            Value::Object(map) => {
                for (key, val) in map {
                    let new_path = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{path}.{key}")
                    };
                    self.check_value(val, &new_path, reject_native)?;
                }
            }
            Value::Array(arr) => {
                for (idx, val) in arr.iter().enumerate() {
                    let new_path = format!("{path}[{idx}]");
                    self.check_value(val, &new_path, reject_native)?;
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => {}
        }
        Ok(())
    }
}

impl Default for ComplianceGuard {
    fn default() -> Self {
        Self::new().expect("Embedded date pattern library must compile")
    }
}

/// Validates `data` against the built-in pattern library.
///
/// Run this on every fully assembled record immediately before writing it.
/// A violation aborts the write; it is not a retry condition.
///
/// ```
/// use dayzero::compliance::validate_no_actual_dates;
/// use serde_json::json;
///
/// assert!(validate_no_actual_dates(&json!({"subjectId": "PAIN001", "enrollmentDay": 0})).is_ok());
///
/// let err = validate_no_actual_dates(&json!({"visit": {"scheduledDate": "2024-03-15"}})).unwrap_err();
/// assert_eq!(err.path, "visit.scheduledDate");
/// ```
pub fn validate_no_actual_dates(data: &Value) -> Result<(), ComplianceViolation> {
    static DEFAULT_GUARD: OnceLock<ComplianceGuard> = OnceLock::new();
    DEFAULT_GUARD.get_or_init(ComplianceGuard::default).validate(data)
}
