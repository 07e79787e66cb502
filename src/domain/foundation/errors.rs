//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur while constructing or checking domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Duplicate value '{value}' for field '{field}'")]
    Duplicate { field: String, value: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a duplicate value validation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        ValidationError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Error codes organized by category.
///
/// These are the stable, externally visible identifiers attached to error
/// responses. Every error enum in the crate maps onto one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidPayload,

    // Dialogue errors
    SlotRejected,
    UnsupportedAction,
    UnsupportedExtractor,

    // Storage errors
    DocumentNotFound,
    DocumentExists,
    UnknownTemplate,
    StorageError,

    // Infrastructure errors
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidPayload => "INVALID_PAYLOAD",
            ErrorCode::SlotRejected => "SLOT_REJECTED",
            ErrorCode::UnsupportedAction => "UNSUPPORTED_ACTION",
            ErrorCode::UnsupportedExtractor => "UNSUPPORTED_EXTRACTOR",
            ErrorCode::DocumentNotFound => "DOCUMENT_NOT_FOUND",
            ErrorCode::DocumentExists => "DOCUMENT_EXISTS",
            ErrorCode::UnknownTemplate => "UNKNOWN_TEMPLATE",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("name");
        assert_eq!(format!("{}", err), "Field 'name' cannot be empty");
    }

    #[test]
    fn validation_error_invalid_format_displays_correctly() {
        let err = ValidationError::invalid_format("required_slots", "must not be empty");
        assert_eq!(
            format!("{}", err),
            "Field 'required_slots' has invalid format: must not be empty"
        );
    }

    #[test]
    fn validation_error_duplicate_displays_correctly() {
        let err = ValidationError::duplicate("action", "open_incident_form");
        assert_eq!(
            format!("{}", err),
            "Duplicate value 'open_incident_form' for field 'action'"
        );
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::SlotRejected), "SLOT_REJECTED");
        assert_eq!(format!("{}", ErrorCode::DocumentNotFound), "DOCUMENT_NOT_FOUND");
        assert_eq!(format!("{}", ErrorCode::InternalError), "INTERNAL_ERROR");
    }
}
