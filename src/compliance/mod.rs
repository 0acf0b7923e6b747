//! Limited Data Set compliance
//!
//! Guarantees that no absolute calendar date reaches persistent storage.
//! Records are passed through the [`ComplianceGuard`] immediately before a
//! write; a [`ComplianceViolation`](crate::domain::ComplianceViolation) aborts
//! that write.
//!
//! # Components
//!
//! - **Patterns**: a TOML library of absolute-date shapes, tunable per
//!   deployment with disabled and allow-listed patterns
//! - **Guard**: recursive walk over JSON-like records, reporting the
//!   dotted/bracketed path of the first offending field
//! - **Audit**: append-only log of guard outcomes with hashed values
//!
//! # Usage
//!
//! ```rust
//! use dayzero::compliance::ComplianceGuard;
//! use serde_json::json;
//!
//! let guard = ComplianceGuard::new()?;
//! let record = json!({"subjectId": "PAIN001", "visits": [{"name": "Week 1", "day": 7}]});
//! guard.validate(&record)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod audit;
pub mod guard;
pub mod patterns;

pub use audit::ComplianceAuditLogger;
pub use guard::{validate_no_actual_dates, ComplianceGuard};
pub use patterns::{CompiledPattern, DatePatternSet};
