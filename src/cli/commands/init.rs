//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "dayzero.toml")]
    pub output: String,

    /// Include a sample visit schedule and audit settings
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing DayZero configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your study's visit schedule", self.output);
                println!("  2. Validate configuration: dayzero validate-config");
                println!("  3. Check an export: dayzero check export.json --each");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    fn generate_minimal_config() -> String {
        r#"# DayZero Configuration File
# Relative study days for Limited Data Set records

[application]
log_level = "info"

[compliance.audit]
enabled = false

[visits]
default_tolerance_days = 7

[logging]
local_enabled = false
"#
        .to_string()
    }

    fn generate_config_with_examples() -> String {
        r#"# DayZero Configuration File
# Relative study days for Limited Data Set records
#
# Every setting can be overridden with DAYZERO_<SECTION>_<KEY>, for example
# DAYZERO_COMPLIANCE_AUDIT_ENABLED=true

[application]
log_level = "info"  # trace | debug | info | warn | error

[compliance]
# Custom date pattern library (TOML); the built-in library is used when unset
# pattern_library = "./patterns/date_patterns.toml"

# Built-in patterns to switch off
disabled_patterns = []

# Values matching any of these are never treated as dates
allow_patterns = [
    '^LOT-[0-9]{4}-[0-9]{2}-[0-9]{2}$',
]

[compliance.audit]
enabled = true
log_path = "./audit/compliance.log"
json_format = true

[visits]
default_tolerance_days = 7

[[visits.schedule]]
name = "Screening"
day = -7
window = 7

[[visits.schedule]]
name = "Baseline"
day = 0
window = 3

[[visits.schedule]]
name = "Week 4"
day = 28
window = 7

[[visits.schedule]]
name = "Month 3"
day = 90
window = 14

[[visits.schedule]]
name = "Month 6"
day = 180
window = 14

[[visits.schedule]]
name = "Year 1"
day = 365
window = 30

[logging]
local_enabled = true
local_path = "./logs"
local_rotation = "daily"  # daily | hourly | never
"#
        .to_string()
    }
}
