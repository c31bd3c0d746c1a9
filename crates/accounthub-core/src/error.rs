//! Unified application error types for AccountHub.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Credential-facing kinds tell the
//! caller *what* went wrong, never *which* record or secret caused it.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Bad credentials or a disabled account. One message for every cause.
    AuthenticationFailed,
    /// Bad, expired, or forged session credential.
    InvalidSession,
    /// Hashing or random-source failure.
    Encoding,
    /// An API token with the requested name already exists.
    NameConflict,
    /// The requested resource was not found or is not owned by the caller.
    NotFound,
    /// A password-reset code is malformed or unknown.
    InvalidCode,
    /// A password-reset code is past its expiry.
    Expired,
    /// A password reset was requested for an externally authenticated account.
    WrongProvider,
    /// The email collaborator failed to deliver a message.
    DeliveryFailed,
    /// Input validation failed.
    Validation,
    /// A uniqueness conflict outside of API tokens (username, email).
    Conflict,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal server error occurred.
    Internal,
}

impl ErrorKind {
    /// Machine-readable code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed => "AUTHENTICATION_FAILED",
            Self::InvalidSession => "INVALID_SESSION",
            Self::Encoding => "ENCODING_ERROR",
            Self::NameConflict => "NAME_CONFLICT",
            Self::NotFound => "NOT_FOUND",
            Self::InvalidCode => "INVALID_CODE",
            Self::Expired => "EXPIRED",
            Self::WrongProvider => "WRONG_PROVIDER",
            Self::DeliveryFailed => "DELIVERY_FAILED",
            Self::Validation => "VALIDATION",
            Self::Conflict => "CONFLICT",
            Self::Database => "DATABASE",
            Self::Configuration => "CONFIGURATION",
            Self::Serialization => "SERIALIZATION",
            Self::Internal => "INTERNAL",
        }
    }

    /// Whether this kind is a system fault rather than a caller mistake.
    pub fn is_system_fault(&self) -> bool {
        matches!(
            self,
            Self::Encoding
                | Self::Database
                | Self::Configuration
                | Self::Serialization
                | Self::Internal
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The unified application error used throughout AccountHub.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The single failure returned for every login problem.
    pub fn authentication_failed() -> Self {
        Self::new(
            ErrorKind::AuthenticationFailed,
            "Incorrect username or password",
        )
    }

    /// Create an invalid-session error.
    pub fn invalid_session(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidSession, message)
    }

    /// Create an encoding error.
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Encoding, message)
    }

    /// Create a name-conflict error.
    pub fn name_conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NameConflict, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an invalid-code error.
    pub fn invalid_code(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidCode, message)
    }

    /// Create an expired error.
    pub fn expired(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Expired, message)
    }

    /// Create a wrong-provider error.
    pub fn wrong_provider(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::WrongProvider, message)
    }

    /// Create a delivery-failed error.
    pub fn delivery_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DeliveryFailed, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Returns `true` if this error is of the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_failed_is_uniform() {
        let a = AppError::authentication_failed();
        let b = AppError::authentication_failed();
        assert_eq!(a.kind, ErrorKind::AuthenticationFailed);
        assert_eq!(a.message, b.message);
        assert!(!a.message.to_lowercase().contains("not found"));
    }

    #[test]
    fn test_display_includes_code() {
        let err = AppError::name_conflict("Token name 'ci-bot' is already in use");
        assert_eq!(
            err.to_string(),
            "NAME_CONFLICT: Token name 'ci-bot' is already in use"
        );
    }

    #[test]
    fn test_system_fault_classification() {
        assert!(ErrorKind::Encoding.is_system_fault());
        assert!(ErrorKind::Database.is_system_fault());
        assert!(!ErrorKind::InvalidCode.is_system_fault());
        assert!(!ErrorKind::AuthenticationFailed.is_system_fault());
    }
}
