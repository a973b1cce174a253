//! Structural validation for flow inputs and outputs.

use scriptura_error::{SchemaError, SchemaErrorKind};
use std::fmt::Display;

/// A value that can check its own shape.
///
/// Implemented by every flow request and response. Inputs are validated
/// before a prompt is rendered; outputs before they are returned.
pub trait Schema {
    /// Check the value, naming the first offending field.
    fn validate(&self) -> Result<(), SchemaError>;
}

/// Require a non-blank string.
///
/// # Examples
///
/// ```
/// use scriptura_core::require_text;
///
/// assert!(require_text("quote", "To be").is_ok());
/// assert!(require_text("quote", "   ").is_err());
/// ```
#[track_caller]
pub fn require_text(field: &str, value: &str) -> Result<(), SchemaError> {
    if value.trim().is_empty() {
        return Err(SchemaError::new(SchemaErrorKind::EmptyField(field.to_string())));
    }
    Ok(())
}

/// Require a non-empty list of non-blank strings.
#[track_caller]
pub fn require_items(field: &str, items: &[String]) -> Result<(), SchemaError> {
    if items.is_empty() {
        return Err(SchemaError::new(SchemaErrorKind::EmptyField(field.to_string())));
    }
    for (index, item) in items.iter().enumerate() {
        require_text(&format!("{}[{}]", field, index), item)?;
    }
    Ok(())
}

/// Require `min <= value <= max`.
///
/// # Examples
///
/// ```
/// use scriptura_core::require_range;
///
/// assert!(require_range("count", 3u8, 1, 10).is_ok());
/// assert!(require_range("count", 0u8, 1, 10).is_err());
/// ```
#[track_caller]
pub fn require_range<T>(field: &str, value: T, min: T, max: T) -> Result<(), SchemaError>
where
    T: PartialOrd + Display,
{
    if value < min || value > max {
        return Err(SchemaError::new(SchemaErrorKind::OutOfRange {
            field: field.to_string(),
            reason: format!("{} is not between {} and {}", value, min, max),
        }));
    }
    Ok(())
}
