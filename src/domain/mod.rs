//! Domain models and types for DayZero.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Date values** ([`CalendarDate`], [`DateInput`])
//! - **Limited Data Set values** ([`RelativeDay`], [`AgeAtEnrollment`], [`RelativeDateResult`])
//! - **Error types** ([`DayZeroError`], [`ComplianceViolation`], [`SyncError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! ```rust
//! use dayzero::domain::{ComplianceViolation, DayZeroError, Result};
//!
//! fn guard() -> std::result::Result<(), ComplianceViolation> {
//!     Err(ComplianceViolation::new("visit.date", "2024-03-15"))
//! }
//!
//! fn write_record() -> Result<()> {
//!     // Violations convert into DayZeroError::Compliance with `?`
//!     guard()?;
//!     Ok(())
//! }
//!
//! assert!(matches!(write_record(), Err(DayZeroError::Compliance(_))));
//! ```

pub mod dates;
pub mod errors;
pub mod result;

// Re-export commonly used types for convenience
pub use dates::{AgeAtEnrollment, CalendarDate, DateInput, RelativeDateResult, RelativeDay};
pub use errors::{ComplianceViolation, DayZeroError, SyncError};
pub use result::Result;
