//! Write-boundary validation helpers.
//!
//! The progress aggregator trusts its inputs; anything it cannot handle
//! (out-of-range coefficients, negative weights, blank names) is rejected
//! here before it reaches storage.

use crate::error::CoreError;

/// Maximum length for entity names and characteristic parameters.
pub const MAX_NAME_LEN: usize = 255;

/// Validate that a value falls within `[0.0, 1.0]`.
///
/// Returns a `CoreError::Validation` naming the field if out of range.
pub fn validate_unit_range(value: f64, name: &str) -> Result<(), CoreError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(CoreError::Validation(format!(
            "{name} must be between 0.0 and 1.0, got {value}"
        )));
    }
    Ok(())
}

/// Validate a step or subtask weight: finite and non-negative.
pub fn validate_weight(value: f64, name: &str) -> Result<(), CoreError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::Validation(format!(
            "{name} must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}

/// Validate a required name: not blank, not overlong.
pub fn validate_name(value: &str, name: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{name} must not be empty")));
    }
    if value.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "{name} must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate that a batch holds at most `max` items.
pub fn validate_count_range(count: usize, max: usize, label: &str) -> Result<(), CoreError> {
    if count > max {
        return Err(CoreError::Validation(format!(
            "{label} accepts at most {max} items, got {count}"
        )));
    }
    Ok(())
}

/// Run a validator against an optional field, skipping `None`.
pub fn validate_optional<T: Copy>(
    value: Option<T>,
    name: &str,
    check: impl Fn(T, &str) -> Result<(), CoreError>,
) -> Result<(), CoreError> {
    match value {
        Some(v) => check(v, name),
        None => Ok(()),
    }
}
