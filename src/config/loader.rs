//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::DayZeroConfig;
use crate::domain::errors::DayZeroError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into DayZeroConfig
/// 4. Applies environment variable overrides (DAYZERO_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use dayzero::config::loader::load_config;
///
/// let config = load_config("dayzero.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<DayZeroConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(DayZeroError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        DayZeroError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: DayZeroConfig = toml::from_str(&contents)
        .map_err(|e| DayZeroError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        DayZeroError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Loads configuration, falling back to defaults when the file does not exist.
///
/// Environment overrides still apply to the defaults. A file that exists but
/// is invalid is still an error.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<DayZeroConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "No configuration file; using defaults");
    let mut config = DayZeroConfig::default();
    apply_env_overrides(&mut config)?;
    config.validate().map_err(|e| {
        DayZeroError::Configuration(format!("Configuration validation failed: {}", e))
    })?;
    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| DayZeroError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&cap[0], &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(DayZeroError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using DAYZERO_* prefix
///
/// Environment variables follow the pattern: DAYZERO_<SECTION>_<KEY>
/// For example: DAYZERO_APPLICATION_LOG_LEVEL, DAYZERO_VISITS_DEFAULT_TOLERANCE_DAYS
fn apply_env_overrides(config: &mut DayZeroConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("DAYZERO_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Compliance overrides
    if let Ok(val) = std::env::var("DAYZERO_COMPLIANCE_PATTERN_LIBRARY") {
        config.compliance.pattern_library = Some(PathBuf::from(val));
    }
    if let Ok(val) = std::env::var("DAYZERO_COMPLIANCE_DISABLED_PATTERNS") {
        config.compliance.disabled_patterns = split_list(&val);
    }
    if let Ok(val) = std::env::var("DAYZERO_COMPLIANCE_AUDIT_ENABLED") {
        config.compliance.audit.enabled = parse_bool("DAYZERO_COMPLIANCE_AUDIT_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("DAYZERO_COMPLIANCE_AUDIT_LOG_PATH") {
        config.compliance.audit.log_path = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("DAYZERO_COMPLIANCE_AUDIT_JSON_FORMAT") {
        config.compliance.audit.json_format =
            parse_bool("DAYZERO_COMPLIANCE_AUDIT_JSON_FORMAT", &val)?;
    }

    // Visit overrides
    if let Ok(val) = std::env::var("DAYZERO_VISITS_DEFAULT_TOLERANCE_DAYS") {
        config.visits.default_tolerance_days = val.parse().map_err(|_| {
            DayZeroError::Configuration(format!(
                "Invalid DAYZERO_VISITS_DEFAULT_TOLERANCE_DAYS value: {val}"
            ))
        })?;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("DAYZERO_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_bool("DAYZERO_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("DAYZERO_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("DAYZERO_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

fn parse_bool(name: &str, val: &str) -> Result<bool> {
    val.trim()
        .parse()
        .map_err(|_| DayZeroError::Configuration(format!("Invalid {name} value: {val}")))
}

fn split_list(val: &str) -> Vec<String> {
    val.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
