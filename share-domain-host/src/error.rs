use serde::{Deserialize, Serialize};
use share_domain_core::CoreError;

/// Error type for calls against the Blinko tRPC API.
///
/// Each variant names the tRPC procedure that failed (e.g. `notes.shareNote`).
///
/// # Retryable Errors
///
/// [`NetworkError`](Self::NetworkError), [`Timeout`](Self::Timeout) and
/// [`RateLimited`](Self::RateLimited) are transient; the HTTP helper retries
/// them with exponential backoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum HostError {
    /// Connection refused, DNS failure, 5xx gateway errors.
    NetworkError {
        /// Procedure being called.
        procedure: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Procedure being called.
        procedure: String,
        /// Error details.
        detail: String,
    },

    /// HTTP 429.
    RateLimited {
        /// Procedure being called.
        procedure: String,
        /// Suggested wait time in seconds, if the host sent `Retry-After`.
        retry_after: Option<u64>,
        /// Raw response body, if available.
        raw_message: Option<String>,
    },

    /// The access token was rejected (HTTP 401/403).
    Unauthorized {
        /// Procedure being called.
        procedure: String,
        /// Raw error message from the host, if available.
        raw_message: Option<String>,
    },

    /// The host answered with a tRPC error envelope or a non-success status.
    ApiError {
        /// Procedure being called.
        procedure: String,
        /// HTTP status code.
        status: u16,
        /// Error message from the host.
        raw_message: String,
    },

    /// The response body was not the expected JSON.
    ParseError {
        /// Procedure being called.
        procedure: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize the procedure input.
    SerializationError {
        /// Procedure being called.
        procedure: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// The configured base URL cannot be used to build endpoint URLs.
    InvalidBaseUrl {
        /// The rejected base URL.
        base_url: String,
        /// Details about the failure.
        detail: String,
    },
}

impl HostError {
    /// 是否为预期行为（宿主离线、限流等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { procedure, detail } => {
                write!(f, "[{procedure}] Network error: {detail}")
            }
            Self::Timeout { procedure, detail } => {
                write!(f, "[{procedure}] Request timeout: {detail}")
            }
            Self::RateLimited {
                procedure,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{procedure}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{procedure}] Rate limited")
                }
            }
            Self::Unauthorized {
                procedure,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{procedure}] Unauthorized: {msg}")
                } else {
                    write!(f, "[{procedure}] Unauthorized")
                }
            }
            Self::ApiError {
                procedure,
                status,
                raw_message,
            } => {
                write!(f, "[{procedure}] HTTP {status}: {raw_message}")
            }
            Self::ParseError { procedure, detail } => {
                write!(f, "[{procedure}] Parse error: {detail}")
            }
            Self::SerializationError { procedure, detail } => {
                write!(f, "[{procedure}] Serialization error: {detail}")
            }
            Self::InvalidBaseUrl { base_url, detail } => {
                write!(f, "Invalid base URL '{base_url}': {detail}")
            }
        }
    }
}

impl std::error::Error for HostError {}

impl From<HostError> for CoreError {
    fn from(err: HostError) -> Self {
        match err {
            HostError::NetworkError { .. }
            | HostError::Timeout { .. }
            | HostError::RateLimited { .. }
            | HostError::Unauthorized { .. } => Self::NetworkError(err.to_string()),
            HostError::ApiError { status, .. } if status >= 500 => {
                Self::NetworkError(err.to_string())
            }
            HostError::ApiError { .. } | HostError::ParseError { .. } => {
                Self::InvalidResponse(err.to_string())
            }
            HostError::SerializationError { .. } => Self::SerializationError(err.to_string()),
            HostError::InvalidBaseUrl { .. } => Self::ConfigurationError(err.to_string()),
        }
    }
}

/// Convenience type alias for `Result<T, HostError>`.
pub type Result<T> = std::result::Result<T, HostError>;
