//! Result type alias for DayZero

use super::errors::DayZeroError;

/// Result type alias for DayZero operations
///
/// # Examples
///
/// ```
/// use dayzero::domain::result::Result;
/// use dayzero::domain::errors::DayZeroError;
///
/// fn example_function() -> Result<i64> {
///     Ok(7)
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(DayZeroError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, DayZeroError>;
