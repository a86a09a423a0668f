//! Input validation helpers.
//!
//! Standardizes validation across the crate using `!is_finite()` to reject
//! NaN, +Inf, and -Inf uniformly. Every error carries the field name.

use crate::error::FxVolError;

/// Validate that a value is strictly positive and finite (rejects NaN, Inf, zero, negatives).
pub(crate) fn validate_positive(value: f64, field: &'static str) -> crate::error::Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(FxVolError::InvalidInput {
            field,
            message: format!("must be positive and finite, got {value}"),
        });
    }
    Ok(value)
}

/// Validate that a value is non-negative and finite (rejects NaN, Inf, negatives).
pub(crate) fn validate_non_negative(value: f64, field: &'static str) -> crate::error::Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(FxVolError::InvalidInput {
            field,
            message: format!("must be non-negative and finite, got {value}"),
        });
    }
    Ok(value)
}

/// Validate that a value is finite (rejects NaN and Inf; allows zero and negatives).
pub(crate) fn validate_finite(value: f64, field: &'static str) -> crate::error::Result<f64> {
    if !value.is_finite() {
        return Err(FxVolError::InvalidInput {
            field,
            message: format!("must be finite, got {value}"),
        });
    }
    Ok(value)
}

/// Validate that a signed delta lies strictly inside (0, 100).
pub(crate) fn validate_delta(delta: f64, field: &'static str) -> crate::error::Result<f64> {
    if !delta.is_finite() || delta <= 0.0 || delta >= 100.0 {
        return Err(FxVolError::InvalidInput {
            field,
            message: format!("must lie strictly between 0 and 100, got {delta}"),
        });
    }
    Ok(delta)
}
