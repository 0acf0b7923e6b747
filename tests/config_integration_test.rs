//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables should be run with --test-threads=1
//! to avoid interference between tests.

use dayzero::compliance::ComplianceGuard;
use dayzero::config::{load_config, load_config_or_default};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("DAYZERO_APPLICATION_LOG_LEVEL");
    std::env::remove_var("DAYZERO_COMPLIANCE_DISABLED_PATTERNS");
    std::env::remove_var("DAYZERO_COMPLIANCE_AUDIT_ENABLED");
    std::env::remove_var("DAYZERO_VISITS_DEFAULT_TOLERANCE_DAYS");
    std::env::remove_var("DAYZERO_LOGGING_LOCAL_ROTATION");
    std::env::remove_var("TEST_DAYZERO_AUDIT_DIR");
}

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = config_file(
        r#"
[application]
log_level = "debug"

[compliance]
disabled_patterns = ["dashed_day_month_year"]
allow_patterns = ['^LOT-[0-9]{4}-[0-9]{2}-[0-9]{2}$']

[compliance.audit]
enabled = true
log_path = "/tmp/dayzero/compliance.log"
json_format = false

[visits]
default_tolerance_days = 5

[[visits.schedule]]
name = "Screening"
day = -7
window = 7

[[visits.schedule]]
name = "Baseline"
day = 0

[logging]
local_enabled = false
local_path = "/tmp/dayzero/logs"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.compliance.disabled_patterns, vec!["dashed_day_month_year"]);
    assert!(config.compliance.audit.enabled);
    assert!(!config.compliance.audit.json_format);
    assert_eq!(
        config.compliance.audit.log_path,
        PathBuf::from("/tmp/dayzero/compliance.log")
    );
    assert_eq!(config.visits.default_tolerance_days, 5);
    assert_eq!(config.visits.visits.len(), 2);

    let screening = config.visits.find("screening").unwrap();
    assert_eq!(screening.day, -7);
    assert_eq!(config.visits.window_for(screening).earliest, -14);

    let baseline = config.visits.find("Baseline").unwrap();
    assert_eq!(config.visits.tolerance_for(baseline), 5);

    assert_eq!(config.logging.local_rotation, "hourly");

    let guard = ComplianceGuard::from_config(&config.compliance).unwrap();
    assert!(guard.validate(&serde_json::json!({"lot": "LOT-2024-03-15"})).is_ok());
    assert!(guard.validate(&serde_json::json!({"lot": "31-12-2024"})).is_ok());
}

#[test]
fn test_empty_file_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = config_file("");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert!(!config.compliance.audit.enabled);
    assert_eq!(config.visits.default_tolerance_days, 7);
    assert_eq!(config.visits.find("Week 4").unwrap().day, 28);
    assert_eq!(config.logging.local_rotation, "daily");
}

#[test]
fn test_missing_file_errors_but_default_loader_falls_back() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    assert!(load_config("/nonexistent/dayzero.toml").is_err());
    let config = load_config_or_default("/nonexistent/dayzero.toml").unwrap();
    assert_eq!(config.visits.default_tolerance_days, 7);
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_DAYZERO_AUDIT_DIR", "/var/log/dayzero");

    let file = config_file(
        r#"
[compliance.audit]
enabled = true
log_path = "${TEST_DAYZERO_AUDIT_DIR}/compliance.log"
"#,
    );
    let config = load_config(file.path());
    cleanup_env_vars();

    assert_eq!(
        config.unwrap().compliance.audit.log_path,
        PathBuf::from("/var/log/dayzero/compliance.log")
    );
}

#[test]
fn test_missing_substitution_variable_is_an_error() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = config_file(
        r#"
[compliance.audit]
log_path = "${TEST_DAYZERO_AUDIT_DIR}/compliance.log"
"#,
    );
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_DAYZERO_AUDIT_DIR"));
}

#[test]
fn test_env_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("DAYZERO_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var(
        "DAYZERO_COMPLIANCE_DISABLED_PATTERNS",
        "us_slash_date, dashed_day_month_year",
    );
    std::env::set_var("DAYZERO_COMPLIANCE_AUDIT_ENABLED", "true");
    std::env::set_var("DAYZERO_VISITS_DEFAULT_TOLERANCE_DAYS", "3");

    let file = config_file(
        r#"
[application]
log_level = "debug"

[visits]
default_tolerance_days = 10
"#,
    );
    let config = load_config(file.path());
    cleanup_env_vars();
    let config = config.unwrap();

    assert_eq!(config.application.log_level, "warn");
    assert_eq!(
        config.compliance.disabled_patterns,
        vec!["us_slash_date", "dashed_day_month_year"]
    );
    assert!(config.compliance.audit.enabled);
    assert_eq!(config.visits.default_tolerance_days, 3);
}

#[test]
fn test_invalid_override_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("DAYZERO_VISITS_DEFAULT_TOLERANCE_DAYS", "a week");

    let result = load_config_or_default("/nonexistent/dayzero.toml");
    cleanup_env_vars();

    assert!(result.is_err());
}

#[test]
fn test_validation_failures() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    for content in [
        "[application]\nlog_level = \"loud\"\n",
        "[visits]\ndefault_tolerance_days = -1\n",
        "[[visits.schedule]]\nname = \"Week 1\"\nday = 7\n\n[[visits.schedule]]\nname = \"week 1\"\nday = 8\n",
        "[compliance]\nallow_patterns = [\"(unclosed\"]\n",
        "[compliance]\npattern_library = \"/nonexistent/patterns.toml\"\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
    ] {
        let file = config_file(content);
        assert!(
            load_config(file.path()).is_err(),
            "expected validation failure for:\n{content}"
        );
    }
}
