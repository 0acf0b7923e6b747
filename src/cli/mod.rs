//! CLI interface and argument parsing
//!
//! Exit codes: 0 success, 1 invalid input or rejected records,
//! 2 configuration error, 3 compliance violation, 5 fatal error.

pub mod commands;

use clap::{Parser, Subcommand};

/// DayZero - relative dates for Limited Data Set research records
#[derive(Parser, Debug)]
#[command(name = "dayzero")]
#[command(version, about, long_about = None)]
#[command(author = "DayZero Contributors")]
pub struct Cli {
    /// Path to configuration file (defaults are used if it does not exist)
    #[arg(short, long, default_value = "dayzero.toml", env = "DAYZERO_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "DAYZERO_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check JSON records for absolute dates before they are stored
    Check(commands::check::CheckArgs),

    /// Convert absolute dates to days since enrollment
    Convert(commands::convert::ConvertArgs),

    /// Calculate age at enrollment from a date of birth
    Age(commands::age::AgeArgs),

    /// Show the scheduled day and window for a visit
    Visit(commands::visit::VisitArgs),

    /// Map raw source records into Limited Data Set records
    Sync(commands::sync::SyncArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::parse_from(["dayzero", "check", "records.json"]);
        assert_eq!(cli.config, "dayzero.toml");
        assert!(matches!(cli.command, Commands::Check(_)));
    }

    #[test]
    fn test_cli_parse_with_config_and_log_level() {
        let cli = Cli::parse_from([
            "dayzero",
            "--config",
            "study.toml",
            "--log-level",
            "debug",
            "validate-config",
        ]);
        assert_eq!(cli.config, "study.toml");
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_convert() {
        let cli = Cli::parse_from([
            "dayzero",
            "convert",
            "--enrollment",
            "2024-03-15",
            "2024-03-22",
            "2024-03-08",
        ]);
        match cli.command {
            Commands::Convert(args) => {
                assert_eq!(args.enrollment, "2024-03-15");
                assert_eq!(args.dates, vec!["2024-03-22", "2024-03-08"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_visit_with_negative_days() {
        let cli = Cli::parse_from(["dayzero", "visit", "Screening", "--actual", "-5"]);
        match cli.command {
            Commands::Visit(args) => {
                assert_eq!(args.name, "Screening");
                assert_eq!(args.actual, Some(-5));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_sync() {
        let cli = Cli::parse_from([
            "dayzero",
            "sync",
            "--mapping",
            "redcap.toml",
            "--input",
            "export.json",
        ]);
        assert!(matches!(cli.command, Commands::Sync(_)));
    }

    #[test]
    fn test_cli_parse_age_and_init() {
        let cli = Cli::parse_from([
            "dayzero",
            "age",
            "--dob",
            "1985-06-20",
            "--enrollment",
            "2024-03-15",
        ]);
        assert!(matches!(cli.command, Commands::Age(_)));

        let cli = Cli::parse_from(["dayzero", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
