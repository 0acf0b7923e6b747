//! Logging and observability
//!
//! Structured logging with:
//! - Configurable log levels
//! - JSON-formatted local file logs with rotation
//!
//! Absolute dates and dates of birth are PHI. Log field paths, pattern names,
//! and counts; never the values themselves.
//!
//! # Example
//!
//! ```no_run
//! use dayzero::logging::init_logging;
//! use dayzero::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(records = 12, "Sync started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a compliance guard outcome for a record, without its values
///
/// # Example
///
/// ```no_run
/// use dayzero::log_compliance_outcome;
/// use dayzero::compliance::validate_no_actual_dates;
///
/// let outcome = validate_no_actual_dates(&serde_json::json!({"day": 7}));
/// log_compliance_outcome!("PAIN001", &outcome);
/// ```
#[macro_export]
macro_rules! log_compliance_outcome {
    ($record:expr, $outcome:expr) => {
        match $outcome {
            Ok(()) => tracing::debug!(record = %$record, "Record is compliant"),
            Err(violation) => tracing::error!(
                record = %$record,
                field_path = %violation.path,
                "Record rejected by compliance guard"
            ),
        }
    };
}
