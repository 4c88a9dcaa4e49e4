//! Shared error taxonomy for auth and resource calls.

use thiserror::Error;

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the auth and resource layers.
///
/// Only two kinds of failure leave the request boundary: authentication
/// failures, which require a fresh interactive authorization, and API
/// failures, which the caller may retry at its own discretion. Nothing
/// is retried internally.
#[derive(Debug, Error)]
pub enum Error {
    /// The provider or API rejected the credentials or token.
    #[error("authentication error [{operation}]: {message}")]
    Auth {
        /// Redacted description of the failure.
        message: String,
        /// Logical operation that failed.
        operation: String,
    },

    /// Any other non-success outcome: unexpected HTTP status, malformed
    /// response, or transport failure.
    #[error("API error [{operation}]: {message}")]
    Api {
        /// Redacted description of the failure.
        message: String,
        /// Logical operation that failed.
        operation: String,
    },

    /// A parameter failed local validation.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// No token has been issued yet. An authorization-code exchange must
    /// happen before the token manager can refresh anything.
    #[error("no token available, complete the authorization flow first")]
    NoTokenAvailable,
}

impl Error {
    /// Build an authentication error for `operation`.
    pub fn auth(message: impl Into<String>, operation: impl Into<String>) -> Self {
        Error::Auth {
            message: message.into(),
            operation: operation.into(),
        }
    }

    /// Build an API error for `operation`.
    pub fn api(message: impl Into<String>, operation: impl Into<String>) -> Self {
        Error::Api {
            message: message.into(),
            operation: operation.into(),
        }
    }

    /// Classify a transport-level failure.
    ///
    /// Only the failure class is surfaced; reqwest error strings can
    /// embed the request URL, which may carry a VIN.
    pub fn transport(error: &reqwest::Error, operation: impl Into<String>) -> Self {
        let message = if error.is_timeout() {
            "timeout"
        } else if error.is_connect() {
            "connection error"
        } else if error.is_decode() {
            "decode error"
        } else if error.is_request() {
            "request error"
        } else {
            "transport error"
        };

        Error::Api {
            message: message.to_string(),
            operation: operation.into(),
        }
    }

    /// Check if this failure requires re-authentication.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Auth { .. })
    }

    /// Check if this is a (possibly transient) API failure.
    pub fn is_api_error(&self) -> bool {
        matches!(self, Error::Api { .. })
    }
}
