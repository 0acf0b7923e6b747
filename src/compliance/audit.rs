//! Audit trail for compliance guard runs

use crate::config::AuditConfig;
use crate::domain::ComplianceViolation;
use anyhow::{Context, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry {
    timestamp: String,
    record: String,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    field_path: Option<String>,
    /// SHA-256 hash of the offending value (never log plaintext dates)
    #[serde(skip_serializing_if = "Option::is_none")]
    value_hash: Option<String>,
}

/// Appends one entry per guard run to the compliance audit log
pub struct ComplianceAuditLogger {
    log_path: PathBuf,
    json_format: bool,
    enabled: bool,
}

impl ComplianceAuditLogger {
    /// Create a new audit logger
    pub fn new(log_path: PathBuf, json_format: bool, enabled: bool) -> Result<Self> {
        if enabled {
            if let Some(parent) = log_path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create audit log directory: {}", parent.display())
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
            enabled,
        })
    }

    /// Create an audit logger from the `[compliance.audit]` section
    pub fn from_config(config: &AuditConfig) -> Result<Self> {
        Self::new(config.log_path.clone(), config.json_format, config.enabled)
    }

    /// Record the outcome of validating `record`
    pub fn log_check(
        &self,
        record: &str,
        outcome: &std::result::Result<(), ComplianceViolation>,
    ) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let entry = match outcome {
            Ok(()) => AuditLogEntry {
                timestamp: chrono::Utc::now().to_rfc3339(),
                record: record.to_string(),
                outcome: "compliant",
                field_path: None,
                value_hash: None,
            },
            Err(violation) => AuditLogEntry {
                timestamp: chrono::Utc::now().to_rfc3339(),
                record: record.to_string(),
                outcome: "violation",
                field_path: Some(violation.path.clone()),
                value_hash: Some(hash_value(&violation.value)),
            },
        };

        self.write_entry(&entry)
    }

    /// Write an audit entry to the log file
    fn write_entry(&self, entry: &AuditLogEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open audit log: {}", self.log_path.display()))?;

        if self.json_format {
            let json_line =
                serde_json::to_string(entry).context("Failed to serialize audit entry")?;
            writeln!(file, "{json_line}").context("Failed to write audit entry")?;
        } else {
            writeln!(
                file,
                "[{}] Record: {} | Outcome: {} | Field: {} | Value hash: {}",
                entry.timestamp,
                entry.record,
                entry.outcome,
                entry.field_path.as_deref().unwrap_or("-"),
                entry.value_hash.as_deref().unwrap_or("-"),
            )
            .context("Failed to write audit entry")?;
        }

        Ok(())
    }
}

/// Hash a value using SHA-256
fn hash_value(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    format!("{result:x}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_hash_value_is_stable() {
        assert_eq!(hash_value("2024-03-15"), hash_value("2024-03-15"));
        assert_ne!(hash_value("2024-03-15"), hash_value("2024-03-16"));
        assert_eq!(hash_value("").len(), 64);
    }

    #[test]
    fn test_log_violation_hashes_value() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit").join("compliance.log");
        let logger = ComplianceAuditLogger::new(log_path.clone(), true, true).unwrap();

        let outcome = Err(ComplianceViolation::new("visit.scheduledDate", "2024-03-15"));
        logger.log_check("PAIN001", &outcome).unwrap();
        logger.log_check("PAIN002", &Ok(())).unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["outcome"], "violation");
        assert_eq!(first["field_path"], "visit.scheduledDate");
        assert_eq!(first["value_hash"], hash_value("2024-03-15"));
        assert!(!content.contains("2024-03-15"));

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["outcome"], "compliant");
        assert!(second.get("field_path").is_none());
    }

    #[test]
    fn test_plain_text_format() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("compliance.log");
        let logger = ComplianceAuditLogger::new(log_path.clone(), false, true).unwrap();

        logger
            .log_check("batch.json", &Err(ComplianceViolation::new("dob", "06/20/1985")))
            .unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("Record: batch.json | Outcome: violation | Field: dob"));
        assert!(!content.contains("06/20/1985"));
    }

    #[test]
    fn test_disabled_logger_writes_nothing() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("compliance.log");
        let logger = ComplianceAuditLogger::new(log_path.clone(), true, false).unwrap();

        logger.log_check("PAIN001", &Ok(())).unwrap();
        assert!(!log_path.exists());
    }
}
