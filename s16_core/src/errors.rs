//! # Error Types
//!
//! Structured error types for s16_core. Every evaluator returns a
//! [`CalcResult`], so a caller can tell a bad input apart from a section
//! the implemented clauses simply do not cover.
//!
//! ## Example
//!
//! ```rust
//! use s16_core::errors::{CalcError, CalcResult};
//!
//! fn validate_fy(fy_mpa: f64) -> CalcResult<()> {
//!     if fy_mpa <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "fy_mpa",
//!             fy_mpa.to_string(),
//!             "Yield strength must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_fy(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for s16_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for capacity calculations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is outside the domain of the formulas (non-positive
    /// yield strength, zero thickness, negative web height, ...)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// The flange/web class combination has no clause in the implemented
    /// braced-beam table
    #[error("Not covered: flange class {flange_class}, web class {web_class} - {reason}")]
    NotCovered {
        flange_class: u8,
        web_class: u8,
        reason: String,
    },

    /// Section designation not found in the shape catalog
    #[error("Section not found: {designation}")]
    SectionNotFound { designation: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a NotCovered error
    pub fn not_covered(flange_class: u8, web_class: u8, reason: impl Into<String>) -> Self {
        CalcError::NotCovered {
            flange_class,
            web_class,
            reason: reason.into(),
        }
    }

    /// Create a SectionNotFound error
    pub fn section_not_found(designation: impl Into<String>) -> Self {
        CalcError::SectionNotFound {
            designation: designation.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::NotCovered { .. } => "NOT_COVERED",
            CalcError::SectionNotFound { .. } => "SECTION_NOT_FOUND",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

/// Reject zero, negative and non-finite values.
pub(crate) fn require_positive(field: &str, value: f64) -> CalcResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Must be a positive, finite number",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::not_covered(4, 4, "Compute per CSA S136");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"NotCovered\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::section_not_found("W1X1").error_code(), "SECTION_NOT_FOUND");
        assert_eq!(CalcError::not_covered(4, 4, "").error_code(), "NOT_COVERED");
        assert_eq!(CalcError::serialization("bad").error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive("fy_mpa", 350.0).is_ok());
        assert!(require_positive("fy_mpa", 0.0).is_err());
        assert!(require_positive("fy_mpa", -1.0).is_err());
        assert!(require_positive("fy_mpa", f64::NAN).is_err());
        assert!(require_positive("fy_mpa", f64::INFINITY).is_err());
    }
}
