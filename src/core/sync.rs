//! Mapping raw source records into Limited Data Set records
//!
//! A [`DataSyncConfig`] names the source fields holding the subject ID, the
//! enrollment date, the optional date of birth, visit dates, visit statuses,
//! and fields to reduce to completeness flags. [`DataSyncConfig::apply`] produces a record
//! that holds only coded IDs, relative days, an age, and booleans, and runs
//! it through the compliance guard before handing it back.

use crate::compliance::ComplianceGuard;
use crate::core::convert::{calculate_age_at_enrollment, convert_redcap_date, parse_date};
use crate::core::schedule::{VisitStats, VisitStatus};
use crate::domain::{AgeAtEnrollment, DayZeroError, RelativeDay, Result, SyncError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// Field mapping for one external data source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSyncConfig {
    /// Field containing the coded subject ID
    #[serde(alias = "subjectIdField")]
    pub subject_id_field: String,

    /// Field containing the enrollment date (becomes Day 0)
    #[serde(alias = "enrollmentDateField")]
    pub enrollment_date_field: String,

    /// Field containing date of birth (reduced to age, then dropped)
    #[serde(default, alias = "dobField")]
    pub dob_field: Option<String>,

    /// Visit name to source date field
    #[serde(default, alias = "visitDateFields")]
    pub visit_date_fields: BTreeMap<String, String>,

    /// Visit name to free-text status field in the source calendar
    #[serde(default, alias = "visitStatusFields")]
    pub visit_status_fields: BTreeMap<String, String>,

    /// Fields reduced to TRUE/FALSE completeness flags
    #[serde(default, alias = "completenessFields")]
    pub completeness_fields: Vec<String>,
}

/// A participant record safe to persist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitedDataSetRecord {
    /// Coded subject ID
    pub subject_id: String,

    /// Always 0
    pub enrollment_day: RelativeDay,

    /// Age in whole years at enrollment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_at_enrollment: Option<AgeAtEnrollment>,

    /// Visit name to relative day; `None` when the source had no usable date
    pub visit_days: BTreeMap<String, Option<RelativeDay>>,

    /// Visit name to normalized status
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub visit_statuses: BTreeMap<String, VisitStatus>,

    /// Field name to whether the source populated it
    pub completeness: BTreeMap<String, bool>,

    /// Data-quality notes naming fields only, never values
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
}

impl DataSyncConfig {
    /// Loads a mapping from a TOML or JSON file (chosen by extension)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DayZeroError::Configuration(format!(
                "Failed to read sync mapping {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Self = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            _ => toml::from_str(&content)?,
        };
        config.validate().map_err(DayZeroError::Configuration)?;
        Ok(config)
    }

    /// Validates the mapping
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.subject_id_field.trim().is_empty() {
            return Err("subject_id_field must not be empty".to_string());
        }
        if self.enrollment_date_field.trim().is_empty() {
            return Err("enrollment_date_field must not be empty".to_string());
        }
        if let Some((visit, _)) = self
            .visit_date_fields
            .iter()
            .find(|(_, field)| field.trim().is_empty())
        {
            return Err(format!("visit '{visit}' has an empty date field"));
        }
        Ok(())
    }

    /// Maps one source record.
    ///
    /// Fails when the subject ID or enrollment date is unusable, or when the
    /// assembled record would still carry an absolute date.
    pub fn apply(&self, record: &Value, guard: &ComplianceGuard) -> Result<LimitedDataSetRecord> {
        let fields = record.as_object().ok_or(SyncError::NotAnObject)?;

        let subject_id = self.subject_id(fields)?;
        let enrollment_text = text_field(fields, &self.enrollment_date_field)
            .ok_or_else(|| SyncError::MissingField(self.enrollment_date_field.clone()))?;
        let enrollment = parse_date(enrollment_text)
            .ok_or_else(|| SyncError::InvalidEnrollmentDate(self.enrollment_date_field.clone()))?;

        let mut issues = Vec::new();

        let age_at_enrollment = self.dob_field.as_deref().and_then(|field| {
            let dob = text_field(fields, field)?;
            let age = calculate_age_at_enrollment(dob, enrollment);
            if age.is_none() {
                issues.push(format!("Could not derive age from field '{field}'"));
            }
            age
        });

        let visit_days = self
            .visit_date_fields
            .iter()
            .map(|(visit, field)| {
                let raw = text_field(fields, field);
                let day = convert_redcap_date(raw, enrollment);
                if raw.is_some() && day.is_none() {
                    issues.push(format!("Unparseable date in field '{field}' for visit '{visit}'"));
                }
                (visit.clone(), day)
            })
            .collect();

        let visit_statuses = self
            .visit_status_fields
            .iter()
            .map(|(visit, field)| {
                let text = text_field(fields, field).unwrap_or_default();
                (visit.clone(), VisitStatus::from_source_text(text))
            })
            .collect();

        let completeness = self
            .completeness_fields
            .iter()
            .map(|field| (field.clone(), fields.get(field).is_some_and(is_populated)))
            .collect();

        let mapped = LimitedDataSetRecord {
            subject_id,
            enrollment_day: 0,
            age_at_enrollment,
            visit_days,
            visit_statuses,
            completeness,
            issues,
        };

        guard.validate_serializable(&mapped)?;
        Ok(mapped)
    }

    fn subject_id(&self, fields: &Map<String, Value>) -> Result<String> {
        match fields.get(&self.subject_id_field) {
            Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            None | Some(Value::Null) | Some(Value::String(_)) => {
                Err(SyncError::MissingField(self.subject_id_field.clone()).into())
            }
            Some(_) => Err(SyncError::InvalidSubjectId(self.subject_id_field.clone()).into()),
        }
    }
}

/// Non-blank string value of a field
fn text_field<'a>(fields: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    match fields.get(name) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.as_str()),
        _ => None,
    }
}

/// Whether a source field counts as filled in
fn is_populated(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

/// A source record that could not be mapped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncFailure {
    /// Position in the input batch
    pub index: usize,

    /// Reason, naming fields but never values
    pub reason: String,

    /// Whether the compliance guard rejected the mapped record
    #[serde(default)]
    pub compliance_violation: bool,
}

/// Result of mapping a batch of source records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncSummary {
    pub records: Vec<LimitedDataSetRecord>,
    pub failures: Vec<SyncFailure>,
}

impl SyncSummary {
    /// Number of records mapped
    pub fn succeeded(&self) -> usize {
        self.records.len()
    }

    /// Whether every input record mapped
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Tally of visit statuses across the mapped records
    pub fn visit_stats(&self) -> VisitStats {
        VisitStats::tally(
            self.records
                .iter()
                .flat_map(|record| record.visit_statuses.values().copied()),
        )
    }
}

/// Maps every record in `records`, collecting failures instead of stopping
pub fn sync_records(
    config: &DataSyncConfig,
    records: &[Value],
    guard: &ComplianceGuard,
) -> SyncSummary {
    let mut summary = SyncSummary::default();

    for (index, record) in records.iter().enumerate() {
        match config.apply(record, guard) {
            Ok(mapped) => summary.records.push(mapped),
            Err(err) => {
                let reason = match &err {
                    DayZeroError::Compliance(violation) => format!(
                        "Compliance violation: absolute date at '{}'",
                        violation.path
                    ),
                    other => other.to_string(),
                };
                let compliance_violation = matches!(err, DayZeroError::Compliance(_));
                tracing::warn!(index, reason = %reason, "Source record rejected");
                summary.failures.push(SyncFailure {
                    index,
                    reason,
                    compliance_violation,
                });
            }
        }
    }

    tracing::info!(
        total = records.len(),
        succeeded = summary.succeeded(),
        failed = summary.failures.len(),
        "Sync mapping complete"
    );

    summary
}
