//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod age;
pub mod check;
pub mod convert;
pub mod init;
pub mod sync;
pub mod validate;
pub mod visit;
