//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Core layer error type
#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Malformed domain name or URL
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Domain id not present in the registry
    #[error("Domain not found: {0}")]
    DomainNotFound(String),

    /// Host endpoint unreachable, timed out or answered with a failure
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The host answered, but not with what we asked for
    #[error("Unexpected host response: {0}")]
    InvalidResponse(String),

    /// Legacy configuration present but unreadable
    #[error("Migration error: {0}")]
    MigrationError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Config store read/write failure
    #[error("Storage error: {0}")]
    StorageError(String),

    /// A share or cancel request for this session is still in flight
    #[error("A share request is already in progress")]
    ShareInProgress,

    /// Clipboard write rejected by the host
    #[error("Clipboard error: {0}")]
    ClipboardError(String),

    /// Required collaborator missing when assembling services
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, host offline, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ValidationError(_)
            | Self::DomainNotFound(_)
            | Self::NetworkError(_)
            | Self::ShareInProgress
            | Self::ClipboardError(_) => true,
            Self::InvalidResponse(_)
            | Self::MigrationError(_)
            | Self::SerializationError(_)
            | Self::StorageError(_)
            | Self::ConfigurationError(_) => false,
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_are_expected() {
        assert!(CoreError::ValidationError("empty name".into()).is_expected());
        assert!(CoreError::NetworkError("offline".into()).is_expected());
        assert!(CoreError::ShareInProgress.is_expected());
    }

    #[test]
    fn storage_errors_are_not_expected() {
        assert!(!CoreError::StorageError("disk".into()).is_expected());
        assert!(!CoreError::InvalidResponse("no token".into()).is_expected());
    }

    #[test]
    fn serializes_with_code_tag() {
        let json = serde_json::to_value(CoreError::DomainNotFound("d1".into())).unwrap();
        assert_eq!(json["code"], "DomainNotFound");
        assert_eq!(json["details"], "d1");
    }
}
