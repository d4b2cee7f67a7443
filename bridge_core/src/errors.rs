//! # Error Types
//!
//! Structured error types for bridge_core. Every failure in the adapter
//! is one of these variants; batch operations turn them into diagnostics
//! instead of aborting, so each variant carries enough context (entity
//! type, name, operation) to be reported on its own.
//!
//! ## Example
//!
//! ```rust
//! use bridge_core::errors::{BridgeError, BridgeResult};
//!
//! fn require_endpoint(bar: &str, start: Option<&str>) -> BridgeResult<()> {
//!     if start.is_none() {
//!         return Err(BridgeError::validation("Bar", bar, "start node is missing"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_endpoint("B1", None).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::diagnostics::Severity;

/// Result type alias for bridge_core operations
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Structured error type for adapter operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum BridgeError {
    /// A prerequisite of the entity is missing (null endpoint, unsynchronized reference)
    #[error("{entity_type} '{name}' failed validation: {reason}")]
    Validation {
        entity_type: String,
        name: String,
        reason: String,
    },

    /// The external system returned a nonzero status from a creation or apply call
    #[error("{entity_type} '{name}' could not be created in the external model: {reason}")]
    ExternalCreate {
        entity_type: String,
        name: String,
        reason: String,
    },

    /// A non-essential property could not be set on an existing object
    #[error("{property} could not be set on {entity_type} '{name}'")]
    PropertyWarning {
        property: String,
        entity_type: String,
        name: String,
    },

    /// The requested result kind has no extraction path
    #[error("Result extraction of type {result_type} is not supported")]
    UnsupportedResultType { result_type: String },

    /// A value is outside the domain the external system accepts
    #[error("Domain error in {operation}: {reason}")]
    Domain { operation: String, reason: String },

    /// A delete call failed for one identifier
    #[error("{entity_type} '{name}' could not be deleted")]
    DeleteFailed { entity_type: String, name: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl BridgeError {
    /// Create a Validation error
    pub fn validation(entity_type: impl Into<String>, name: impl Into<String>, reason: impl Into<String>) -> Self {
        BridgeError::Validation {
            entity_type: entity_type.into(),
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an ExternalCreate error
    pub fn external_create(entity_type: impl Into<String>, name: impl Into<String>, reason: impl Into<String>) -> Self {
        BridgeError::ExternalCreate {
            entity_type: entity_type.into(),
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a PropertyWarning
    pub fn property_warning(property: impl Into<String>, entity_type: impl Into<String>, name: impl Into<String>) -> Self {
        BridgeError::PropertyWarning {
            property: property.into(),
            entity_type: entity_type.into(),
            name: name.into(),
        }
    }

    /// Create an UnsupportedResultType error
    pub fn unsupported_result_type(result_type: impl Into<String>) -> Self {
        BridgeError::UnsupportedResultType {
            result_type: result_type.into(),
        }
    }

    /// Create a Domain error
    pub fn domain(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        BridgeError::Domain {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create a DeleteFailed error
    pub fn delete_failed(entity_type: impl Into<String>, name: impl Into<String>) -> Self {
        BridgeError::DeleteFailed {
            entity_type: entity_type.into(),
            name: name.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        BridgeError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        BridgeError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Severity this error is reported at.
    ///
    /// Property warnings are advisory; everything else is an error for the
    /// entity it concerns.
    pub fn severity(&self) -> Severity {
        match self {
            BridgeError::PropertyWarning { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Name of the entity this error concerns, if any
    pub fn entity(&self) -> Option<&str> {
        match self {
            BridgeError::Validation { name, .. }
            | BridgeError::ExternalCreate { name, .. }
            | BridgeError::PropertyWarning { name, .. }
            | BridgeError::DeleteFailed { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            BridgeError::Validation { .. } => "VALIDATION",
            BridgeError::ExternalCreate { .. } => "EXTERNAL_CREATE",
            BridgeError::PropertyWarning { .. } => "PROPERTY_WARNING",
            BridgeError::UnsupportedResultType { .. } => "UNSUPPORTED_RESULT_TYPE",
            BridgeError::Domain { .. } => "DOMAIN",
            BridgeError::DeleteFailed { .. } => "DELETE_FAILED",
            BridgeError::FileError { .. } => "FILE_ERROR",
            BridgeError::FileLocked { .. } => "FILE_LOCKED",
            BridgeError::SerializationError { .. } => "SERIALIZATION_ERROR",
            BridgeError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = BridgeError::validation("Bar", "B1", "start node is missing");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"Validation\""));
        let roundtrip: BridgeError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(BridgeError::domain("Gravity", "x").error_code(), "DOMAIN");
        assert_eq!(
            BridgeError::unsupported_result_type("ModalMassAndFrequencies").error_code(),
            "UNSUPPORTED_RESULT_TYPE"
        );
    }

    #[test]
    fn test_severity() {
        assert_eq!(
            BridgeError::property_warning("Release", "Bar", "1").severity(),
            Severity::Warning
        );
        assert_eq!(
            BridgeError::external_create("Bar", "1", "status 1").severity(),
            Severity::Error
        );
    }

    #[test]
    fn test_display_names_entity() {
        let error = BridgeError::property_warning("AutoMesh", "Bar", "7");
        assert_eq!(error.to_string(), "AutoMesh could not be set on Bar '7'");
        assert_eq!(error.entity(), Some("7"));
    }
}
