//! Unified error types for all layers of the catalog.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Coarse classification of a [`CatalogError`].
///
/// The core layers only ever reason about these four kinds; the transport
/// layer maps each kind to exactly one status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller supplied a missing or malformed argument.
    InvalidArgument,
    /// The requested data does not exist.
    NotFound,
    /// The write collides with existing data.
    Conflict,
    /// Anything the caller cannot fix.
    Internal,
}

impl ErrorKind {
    /// Returns the HTTP status code for this kind.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::InvalidArgument => 400,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Internal => 500,
        }
    }
}

/// Unified error type for the catalog service.
#[derive(Error, Debug)]
pub enum CatalogError {
    // ============ Client Errors ============
    /// A required argument was absent, empty, or malformed
    #[error("{0}")]
    InvalidArgument(String),

    /// Request payload failed declarative validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// A write was rejected by the store
    #[error("{0}")]
    BadRequest(String),

    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Conflict error (e.g., duplicate entry)
    #[error("Conflict: {0}")]
    Conflict(String),

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Redis/Cache error
    #[error("Cache error: {0}")]
    Cache(String),

    /// External service error
    #[error("External service error: {service} - {message}")]
    ExternalService { service: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CatalogError {
    /// Returns the classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) | Self::Validation(_) | Self::BadRequest(_) => {
                ErrorKind::InvalidArgument
            }
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Database(_)
            | Self::Cache(_)
            | Self::ExternalService { .. }
            | Self::Configuration(_)
            | Self::Internal(_)
            | Self::Other(_) => ErrorKind::Internal,
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_)
            | Self::Cache(_)
            | Self::ExternalService { .. }
            | Self::Configuration(_)
            | Self::Internal(_)
            | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true when the error must not be described to the caller.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self.kind(), ErrorKind::Internal)
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument<T: Into<String>>(message: T) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found<T: Into<String>>(message: T) -> Self {
        Self::NotFound(message.into())
    }

    /// Creates an external service error.
    #[must_use]
    pub fn external<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::ExternalService {
            service: service.into(),
            message: message.into(),
        }
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if let Some(code) = db_err.code() {
                // MySQL duplicate key / ANSI unique violation
                if code == "1062" || code == "23000" {
                    return Self::Conflict(db_err.message().to_string());
                }
            }
        }
        Self::Database(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {err}"))
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `CatalogError`.
    ///
    /// Internal errors are rendered with a generic message.
    #[must_use]
    pub fn from_error(error: &CatalogError) -> Self {
        let message = if error.is_internal() {
            "Internal server error".to_string()
        } else {
            error.to_string()
        };

        Self {
            code: error.error_code().to_string(),
            message,
            details: None,
        }
    }
}

impl From<&CatalogError> for ErrorResponse {
    fn from(error: &CatalogError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_status_codes() {
        assert_eq!(ErrorKind::InvalidArgument.status_code(), 400);
        assert_eq!(ErrorKind::NotFound.status_code(), 404);
        assert_eq!(ErrorKind::Conflict.status_code(), 409);
        assert_eq!(ErrorKind::Internal.status_code(), 500);
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            CatalogError::invalid_argument("Area must be provided").kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(CatalogError::validation("bad").kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            CatalogError::BadRequest("Failed to create product".into()).kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(CatalogError::not_found("gone").kind(), ErrorKind::NotFound);
        assert_eq!(CatalogError::Conflict("dup".into()).kind(), ErrorKind::Conflict);
        assert_eq!(CatalogError::Database("down".into()).kind(), ErrorKind::Internal);
        assert_eq!(CatalogError::Cache("down".into()).kind(), ErrorKind::Internal);
        assert_eq!(CatalogError::external("pushover", "502").kind(), ErrorKind::Internal);
        assert_eq!(
            CatalogError::Other(anyhow::anyhow!("boom")).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CatalogError::invalid_argument("x").error_code(), "INVALID_ARGUMENT");
        assert_eq!(CatalogError::validation("x").error_code(), "VALIDATION_ERROR");
        assert_eq!(CatalogError::not_found("x").error_code(), "NOT_FOUND");
        assert_eq!(CatalogError::Conflict("x".into()).error_code(), "CONFLICT");
        assert_eq!(CatalogError::Database("x".into()).error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_client_messages_are_verbatim() {
        let err = CatalogError::invalid_argument("Area must be provided");
        assert_eq!(err.to_string(), "Area must be provided");

        let err = CatalogError::not_found("No top products found for the area: north");
        assert_eq!(err.to_string(), "No top products found for the area: north");
    }

    #[test]
    fn test_error_response_hides_internal_detail() {
        let err = CatalogError::Database("connection refused at 10.0.0.4:3306".into());
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "INTERNAL_ERROR");
        assert_eq!(response.message, "Internal server error");
        assert!(response.details.is_none());
    }

    #[test]
    fn test_error_response_keeps_client_message() {
        let err = CatalogError::invalid_argument("Area must be provided");
        let response: ErrorResponse = ErrorResponse::from(&err);
        assert_eq!(response.code, "INVALID_ARGUMENT");
        assert_eq!(response.message, "Area must be provided");
    }

    #[test]
    fn test_json_error_is_internal() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CatalogError = json_err.into();
        assert!(err.is_internal());
    }
}
