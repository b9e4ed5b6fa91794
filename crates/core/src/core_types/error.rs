//! Error types for lookups and input validation
//!
//! Calculations themselves never fail: an unknown chemical degrades to a
//! documented neutral result. Errors only surface from repository lookups
//! and from the explicit `validate` calls callers make on raw input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for fallible hazard-engine operations
pub type HazardResult<T> = Result<T, HazardError>;

/// Structured error type for the hazard engine
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum HazardError {
    /// Chemical identifier not present in the repository
    #[error("Chemical not found: {name}")]
    ChemicalNotFound { name: String },

    /// An input value is outside the declared domain
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },
}

impl HazardError {
    /// Create a `ChemicalNotFound` error
    pub fn chemical_not_found(name: impl Into<String>) -> Self {
        HazardError::ChemicalNotFound { name: name.into() }
    }

    /// Create an `InvalidInput` error
    pub fn invalid_input(field: &str, value: f64, reason: &str) -> Self {
        HazardError::InvalidInput {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Returns true for `ChemicalNotFound`
    pub fn is_not_found(&self) -> bool {
        matches!(self, HazardError::ChemicalNotFound { .. })
    }
}

/// Reject NaN and infinities
pub(crate) fn ensure_finite(field: &str, value: f64) -> HazardResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(HazardError::invalid_input(field, value, "Value must be finite"))
    }
}

/// Reject negative or non-finite values
pub(crate) fn ensure_non_negative(field: &str, value: f64) -> HazardResult<()> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(HazardError::invalid_input(
            field,
            value,
            "Value must be non-negative",
        ));
    }
    Ok(())
}

/// Reject values outside 0-100
pub(crate) fn ensure_percentage(field: &str, value: f64) -> HazardResult<()> {
    ensure_finite(field, value)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(HazardError::invalid_input(
            field,
            value,
            "Percentage must be within 0-100",
        ));
    }
    Ok(())
}
