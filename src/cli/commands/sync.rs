//! Sync command implementation
//!
//! Maps a JSON export from a source system into Limited Data Set records.
//! Records that fail mapping or the compliance guard are reported by index
//! and never written.

use crate::compliance::ComplianceGuard;
use crate::config::load_config_or_default;
use crate::core::sync::{sync_records, DataSyncConfig};
use anyhow::Context;
use clap::Args;
use serde_json::Value;
use std::path::PathBuf;

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Field mapping file (TOML or JSON)
    #[arg(short, long)]
    pub mapping: PathBuf,

    /// Source export: a JSON array of records, or a single record
    #[arg(short, long)]
    pub input: PathBuf,

    /// Write mapped records here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl SyncArgs {
    /// Execute the sync command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        let mapping = match DataSyncConfig::from_file(&self.mapping) {
            Ok(m) => m,
            Err(e) => {
                eprintln!("❌ Failed to load sync mapping: {e}");
                return Ok(2);
            }
        };

        let guard = ComplianceGuard::from_config(&config.compliance)
            .context("Failed to build compliance guard")?;

        let content = std::fs::read_to_string(&self.input)
            .with_context(|| format!("Failed to read {}", self.input.display()))?;
        let records = match serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON in {}", self.input.display()))?
        {
            Value::Array(items) => items,
            single => vec![single],
        };

        tracing::info!(
            input = %self.input.display(),
            records = records.len(),
            "Starting sync"
        );

        let summary = sync_records(&mapping, &records, &guard);
        let mapped = serde_json::to_string_pretty(&summary.records)?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, mapped)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                eprintln!("✅ Wrote {} record(s) to {}", summary.succeeded(), path.display());
            }
            None => println!("{mapped}"),
        }

        for failure in &summary.failures {
            eprintln!("❌ Record {}: {}", failure.index, failure.reason);
        }

        eprintln!(
            "Synced {} of {} record(s), {} rejected",
            summary.succeeded(),
            records.len(),
            summary.failures.len()
        );

        let stats = summary.visit_stats();
        if stats.total > 0 {
            eprintln!(
                "Visits: {} total, {} completed, {} scheduled, {} missed, {} cancelled",
                stats.total, stats.completed, stats.scheduled, stats.missed, stats.cancelled
            );
        }

        let compliance_failures = summary.failures.iter().any(|f| f.compliance_violation);

        Ok(match (summary.is_clean(), compliance_failures) {
            (true, _) => 0,
            (false, true) => 3,
            (false, false) => 1,
        })
    }
}
