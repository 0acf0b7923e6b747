//! Visit command implementation
//!
//! Looks a visit up in the configured schedule and, given an actual or
//! current study day, reports where the visit stands against its window.

use crate::config::load_config_or_default;
use crate::core::schedule::{
    format_relative_days, is_visit_on_schedule, visit_window, VisitTiming,
};
use clap::Args;

/// Arguments for the visit command
#[derive(Args, Debug)]
pub struct VisitArgs {
    /// Visit name, e.g. "Week 4" (case-insensitive)
    pub name: String,

    /// Relative day the visit actually happened
    #[arg(long, allow_hyphen_values = true)]
    pub actual: Option<i64>,

    /// Participant's current study day, for visits not yet completed
    #[arg(long, allow_hyphen_values = true)]
    pub current: Option<i64>,

    /// Override the tolerance in days
    #[arg(long)]
    pub tolerance: Option<i64>,
}

impl VisitArgs {
    /// Execute the visit command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        let Some(visit) = config.visits.find(&self.name) else {
            println!("❌ Unknown visit: {}", self.name.trim());
            println!("   Known visits:");
            for visit in &config.visits.visits {
                println!("     - {} ({})", visit.name, format_relative_days(visit.day));
            }
            return Ok(1);
        };

        let tolerance = self
            .tolerance
            .unwrap_or_else(|| config.visits.tolerance_for(visit));
        if tolerance < 0 {
            println!("❌ Tolerance must be non-negative, got {tolerance}");
            return Ok(1);
        }
        let window = visit_window(visit.day, tolerance);

        tracing::debug!(visit = %visit.name, day = visit.day, tolerance, "Visit resolved");

        println!("📅 {}", visit.name);
        println!("  Scheduled: {}", format_relative_days(visit.day));
        println!("  Window: {window} (±{tolerance} days)");

        match (self.actual, self.current) {
            (Some(actual), _) => {
                let timing = VisitTiming::classify(visit.day, Some(actual), actual, tolerance);
                println!("  Actual: {}", format_relative_days(actual));
                if is_visit_on_schedule(visit.day, actual, tolerance) {
                    println!("✅ On schedule ({timing})");
                    Ok(0)
                } else {
                    println!("❌ Off schedule ({timing})");
                    Ok(1)
                }
            }
            (None, Some(current)) => {
                let timing = VisitTiming::classify(visit.day, None, current, tolerance);
                println!("  Status on {}: {timing}", format_relative_days(current));
                Ok(if timing == VisitTiming::Overdue { 1 } else { 0 })
            }
            (None, None) => Ok(0),
        }
    }
}
