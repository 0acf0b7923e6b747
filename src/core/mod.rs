//! Core relative-date logic
//!
//! - [`convert`] - absolute dates to relative days and ages
//! - [`schedule`] - display labels, visit vocabulary, windows, timing
//! - [`sync`] - source-record mapping into Limited Data Set records
//!
//! # Example
//!
//! ```rust
//! use dayzero::core::convert::convert_to_relative_days;
//! use dayzero::core::schedule::{format_relative_days, scheduled_visit_day, visit_window};
//!
//! let day = convert_to_relative_days("2024-04-14", "2024-03-15").unwrap();
//! assert_eq!(format_relative_days(day), "Day 30 (Month 1)");
//!
//! let scheduled = scheduled_visit_day("Month 1").unwrap();
//! assert!(visit_window(scheduled, 7).contains(day));
//! ```

pub mod convert;
pub mod schedule;
pub mod sync;

pub use convert::{
    calculate_age_at_enrollment, convert_redcap_date, convert_to_relative_days,
    convert_to_relative_days_detailed, parse_date,
};
pub use schedule::{
    format_relative_days, is_visit_on_schedule, scheduled_visit_day, visit_window,
    VisitSchedule, VisitStats, VisitStatus, VisitTiming, VisitWindow, DEFAULT_TOLERANCE_DAYS,
};
pub use sync::{sync_records, DataSyncConfig, LimitedDataSetRecord, SyncFailure, SyncSummary};
