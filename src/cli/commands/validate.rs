//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the DayZero configuration file.

use crate::compliance::ComplianceGuard;
use crate::config::load_config;
use crate::core::schedule::format_relative_days;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates after parsing and applying overrides
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        // Pattern library errors only surface when the patterns are compiled
        let guard = match ComplianceGuard::from_config(&config.compliance) {
            Ok(g) => g,
            Err(e) => {
                println!("❌ Compliance pattern library is invalid");
                println!("   Error: {e:#}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        match &config.compliance.pattern_library {
            Some(path) => println!("  Pattern Library: {}", path.display()),
            None => println!("  Pattern Library: built-in"),
        }
        let names: Vec<&str> = guard
            .patterns()
            .patterns()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        println!("  Active Date Patterns: {}", names.join(", "));
        println!("  Allow Patterns: {}", config.compliance.allow_patterns.len());
        println!(
            "  Audit Log: {}",
            if config.compliance.audit.enabled {
                config.compliance.audit.log_path.display().to_string()
            } else {
                "disabled".to_string()
            }
        );
        println!(
            "  Default Visit Tolerance: {} days",
            config.visits.default_tolerance_days
        );
        println!("  Visits:");
        for visit in &config.visits.visits {
            println!(
                "    - {}: {} (window {})",
                visit.name,
                format_relative_days(visit.day),
                config.visits.window_for(visit)
            );
        }
        println!(
            "  Local File Logging: {}",
            if config.logging.local_enabled {
                format!("{} ({})", config.logging.local_path, config.logging.local_rotation)
            } else {
                "disabled".to_string()
            }
        );
        println!();
        Ok(0)
    }
}
