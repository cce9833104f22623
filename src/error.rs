//! Error types for the users API client.
//!
//! Remote validation, not-found and authentication failures are *not*
//! errors at this layer: they arrive as ordinary [`ApiResponse`] values and
//! are classified with [`ApiResponse::error`]. The variants here cover
//! configuration problems, transport failures and undecodable bodies.
//!
//! [`ApiResponse`]: crate::types::ApiResponse
//! [`ApiResponse::error`]: crate::types::ApiResponse::error

use thiserror::Error;

/// Result type alias using [`ApiError`].
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur while configuring the client or talking to the API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required environment variable is absent or empty.
    #[error("Missing required environment variable: {name}")]
    MissingEnv {
        /// Name of the variable.
        name: String,
    },

    /// The client configuration is incomplete or inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// HTTP request or transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a body that is not valid JSON.
    #[error("Malformed response body (status {status}): {source}")]
    MalformedBody {
        /// HTTP status code of the response.
        status: u16,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// JSON serialization or typed deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A helper that requires a particular status code saw another one.
    #[error("Expected status {expected}, got {actual}: {body}")]
    UnexpectedStatus {
        /// Status code the caller required.
        expected: u16,
        /// Status code the server returned.
        actual: u16,
        /// Response body, rendered as JSON text.
        body: String,
    },

    /// A fixture body was cancelled before completing.
    #[error("Fixture task cancelled: {0}")]
    Cancelled(String),
}

impl ApiError {
    /// Create a missing environment variable error.
    pub fn missing_env(name: impl Into<String>) -> Self {
        Self::MissingEnv { name: name.into() }
    }

    /// Create an invalid configuration error with the given message.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a malformed body error.
    pub fn malformed_body(status: u16, source: serde_json::Error) -> Self {
        Self::MalformedBody { status, source }
    }

    /// Create an unexpected status error.
    pub fn unexpected_status(expected: u16, actual: u16, body: impl Into<String>) -> Self {
        Self::UnexpectedStatus {
            expected,
            actual,
            body: body.into(),
        }
    }

    /// Returns true if this error was raised before any network traffic.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::MissingEnv { .. } | Self::InvalidConfig(_) | Self::Url(_)
        )
    }

    /// Returns true if this is a transport-level failure.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::MalformedBody { .. })
    }
}
