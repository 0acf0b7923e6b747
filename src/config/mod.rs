//! Configuration management for DayZero.
//!
//! DayZero reads an optional TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `DAYZERO_<SECTION>_<KEY>` environment overrides
//! - Defaults for every setting
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level
//! - [`ComplianceConfig`] - date pattern library, disabled and allowed patterns, audit log
//! - [`VisitSchedule`](crate::core::schedule::VisitSchedule) - default tolerance and per-study visits
//! - [`LoggingConfig`] - local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [compliance]
//! disabled_patterns = ["dashed_day_month_year"]
//! allow_patterns = ['^LAB-[0-9]{2}-[0-9]{2}-[0-9]{4}$']
//!
//! [compliance.audit]
//! enabled = true
//! log_path = "${DAYZERO_AUDIT_DIR}/compliance.log"
//!
//! [visits]
//! default_tolerance_days = 7
//!
//! [[visits.schedule]]
//! name = "Screening"
//! day = -7
//! window = 7
//! ```
//!
//! # Loading
//!
//! ```rust,no_run
//! use dayzero::config::load_config;
//!
//! match load_config("dayzero.toml") {
//!     Ok(config) => println!("Tolerance: {} days", config.visits.default_tolerance_days),
//!     Err(e) => eprintln!("Configuration error: {}", e),
//! }
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{ApplicationConfig, AuditConfig, ComplianceConfig, DayZeroConfig, LoggingConfig};
