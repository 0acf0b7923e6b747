// DayZero - Relative Study Days for Limited Data Set Records
// Copyright (c) 2025 DayZero Contributors
// Licensed under the MIT License

//! # DayZero - Relative Study Days for Limited Data Set Records
//!
//! DayZero replaces absolute calendar dates in clinical research records with
//! signed day offsets from each participant's enrollment date (Day 0), and
//! guards storage so that no absolute date is ever persisted. This keeps
//! records within the HIPAA Limited Data Set rules while preserving the
//! temporal relationships needed for analysis.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Date conversion, visit schedules, and source-record mapping
//! - [`compliance`] - Absolute-date detection, the pre-write guard, and audit log
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use dayzero::core::convert::{calculate_age_at_enrollment, convert_to_relative_days};
//! use dayzero::core::schedule::{format_relative_days, is_visit_on_schedule};
//!
//! let enrollment = "2024-03-15";
//!
//! let day = convert_to_relative_days("2024-04-12", enrollment).unwrap();
//! assert_eq!(day, 28);
//! assert_eq!(format_relative_days(day), "Day 28 (Week 4)");
//! assert!(is_visit_on_schedule(28, day, 7));
//!
//! assert_eq!(calculate_age_at_enrollment("1985-06-20", enrollment), Some(38));
//! ```
//!
//! ## Storing Records
//!
//! Run every record through the guard immediately before it is written:
//!
//! ```rust
//! use dayzero::compliance::validate_no_actual_dates;
//! use serde_json::json;
//!
//! let ok = json!({"subjectId": "PAIN001", "visits": [{"name": "Week 4", "day": 28}]});
//! assert!(validate_no_actual_dates(&ok).is_ok());
//!
//! let leaked = json!({"subjectId": "PAIN001", "visits": [{"date": "2024-04-12"}]});
//! let violation = validate_no_actual_dates(&leaked).unwrap_err();
//! assert_eq!(violation.path, "visits[0].date");
//! ```
//!
//! ## Error Handling
//!
//! Unparseable dates are ordinary input and come back as `None` or an invalid
//! [`domain::RelativeDateResult`]. Guard failures are
//! [`domain::ComplianceViolation`]s, and everything else is a
//! [`domain::DayZeroError`]:
//!
//! ```rust,no_run
//! use dayzero::domain::DayZeroError;
//!
//! fn example() -> Result<(), DayZeroError> {
//!     let config = dayzero::config::load_config("dayzero.toml")?;
//!     println!("Tolerance: {}", config.visits.default_tolerance_days);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod compliance;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
