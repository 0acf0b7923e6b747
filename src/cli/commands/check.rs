//! Check command implementation
//!
//! Runs the compliance guard over a JSON file and records each outcome in
//! the audit log.

use crate::compliance::{ComplianceAuditLogger, ComplianceGuard};
use crate::config::load_config_or_default;
use crate::log_compliance_outcome;
use anyhow::Context;
use clap::Args;
use serde_json::Value;
use std::path::PathBuf;

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// JSON file holding one record or an array of records
    pub input: PathBuf,

    /// Check each element of a top-level array as its own record
    #[arg(long)]
    pub each: bool,
}

impl CheckArgs {
    /// Execute the check command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        let guard = ComplianceGuard::from_config(&config.compliance)
            .context("Failed to build compliance guard")?;
        let audit = ComplianceAuditLogger::from_config(&config.compliance.audit)?;

        let content = std::fs::read_to_string(&self.input)
            .with_context(|| format!("Failed to read {}", self.input.display()))?;
        let data: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON in {}", self.input.display()))?;

        let label = self.input.display().to_string();
        let records: Vec<(String, &Value)> = match (&data, self.each) {
            (Value::Array(items), true) => items
                .iter()
                .enumerate()
                .map(|(idx, item)| (format!("{label}[{idx}]"), item))
                .collect(),
            _ => vec![(label, &data)],
        };

        tracing::info!(
            input = %self.input.display(),
            records = records.len(),
            "Checking records for absolute dates"
        );

        let mut violations = 0;
        for (record_label, record) in &records {
            let outcome = guard.validate(record);
            audit.log_check(record_label, &outcome)?;
            log_compliance_outcome!(record_label, &outcome);

            match outcome {
                Ok(()) => println!("✅ {record_label}: no absolute dates"),
                Err(violation) => {
                    violations += 1;
                    let path = if violation.path.is_empty() {
                        "<root>"
                    } else {
                        violation.path.as_str()
                    };
                    println!("❌ {record_label}: absolute date at {path}");
                }
            }
        }

        println!();
        println!(
            "Checked {} record(s): {} compliant, {} rejected",
            records.len(),
            records.len() - violations,
            violations
        );

        Ok(if violations > 0 { 3 } else { 0 })
    }
}
