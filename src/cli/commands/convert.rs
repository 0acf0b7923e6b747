//! Convert command implementation
//!
//! Converts one or more absolute dates into days since enrollment.

use crate::core::convert::convert_to_relative_days_detailed;
use crate::core::schedule::format_relative_days;
use crate::domain::RelativeDateResult;
use clap::Args;

/// Arguments for the convert command
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Enrollment date (Day 0), YYYY-MM-DD
    #[arg(short, long)]
    pub enrollment: String,

    /// Dates to convert, YYYY-MM-DD or ISO-8601 date-time
    #[arg(required = true, num_args = 1..)]
    pub dates: Vec<String>,

    /// Print results as a JSON array instead of text
    #[arg(long)]
    pub json: bool,
}

impl ConvertArgs {
    /// Execute the convert command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(dates = self.dates.len(), "Converting dates to relative days");

        let results: Vec<RelativeDateResult> = self
            .dates
            .iter()
            .map(|date| convert_to_relative_days_detailed(date.as_str(), self.enrollment.as_str()))
            .collect();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&results)?);
        } else {
            for (date, result) in self.dates.iter().zip(&results) {
                match (result.days(), &result.error) {
                    (Some(days), _) => {
                        println!("✅ {date} → {days} ({})", format_relative_days(days))
                    }
                    (None, Some(error)) => println!("❌ {date}: {error}"),
                    (None, None) => println!("❌ {date}: conversion failed"),
                }
            }
        }

        let failed = results.iter().filter(|r| !r.valid).count();
        if failed > 0 {
            tracing::warn!(failed, "Some dates could not be converted");
            return Ok(1);
        }
        Ok(0)
    }
}
