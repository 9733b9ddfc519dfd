//! Error types for the search API client
//!
//! Every public operation returns `Result<T, Error>`. Each variant maps to an
//! [`ErrorKind`] and, where the remote service answered, carries the HTTP
//! status code.

use thiserror::Error;

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad caller input
    Validation,
    /// Invalid client configuration
    Config,
    /// Bad or missing credentials
    Auth,
    /// Account balance exhausted
    InsufficientBalance,
    /// Too many requests
    RateLimited,
    /// 5xx from the remote service
    Server,
    /// Any other non-success HTTP status
    Request,
    /// Connection-level failure
    Network,
    /// Per-attempt deadline exceeded
    Timeout,
    /// Response body could not be decoded
    Decode,
    /// The service answered successfully but reported an error in the payload
    Api,
}

impl ErrorKind {
    /// Whether failures of this kind are worth retrying
    pub fn is_transient(self) -> bool {
        matches!(
            self,
            ErrorKind::RateLimited | ErrorKind::Server | ErrorKind::Network | ErrorKind::Timeout
        )
    }
}

/// The error type returned by the search API client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Caller Errors
    // ============================================================================
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    // ============================================================================
    // HTTP Status Errors
    // ============================================================================
    #[error("Authentication failed (HTTP {status}): {message}")]
    Auth { status: u16, message: String },

    #[error("Insufficient balance")]
    InsufficientBalance,

    #[error("Rate limited, retry after {}", retry_after_display(.retry_after_seconds))]
    RateLimited { retry_after_seconds: Option<u64> },

    #[error("Server error (HTTP {status}): {body}")]
    Server { status: u16, body: String },

    #[error("HTTP {status}: {body}")]
    Request { status: u16, body: String },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    // ============================================================================
    // Payload Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("API error: {message}")]
    Api { message: String },
}

fn retry_after_display(seconds: &Option<u64>) -> String {
    match seconds {
        Some(s) => format!("{s}s"),
        None => "an unspecified delay".to_string(),
    }
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an error reported inside a successful payload
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Translate a non-success HTTP status into an error
    pub fn from_status(status: u16, body: impl Into<String>, retry_after: Option<u64>) -> Self {
        let body = body.into();
        match status {
            401 => Self::Auth {
                status,
                message: "Invalid API key".to_string(),
            },
            403 => Self::Auth {
                status,
                message: "Access forbidden".to_string(),
            },
            402 => Self::InsufficientBalance,
            429 => Self::RateLimited {
                retry_after_seconds: retry_after,
            },
            500..=599 => Self::Server { status, body },
            _ => Self::Request { status, body },
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation { .. } => ErrorKind::Validation,
            Error::Config { .. } => ErrorKind::Config,
            Error::Auth { .. } => ErrorKind::Auth,
            Error::InsufficientBalance => ErrorKind::InsufficientBalance,
            Error::RateLimited { .. } => ErrorKind::RateLimited,
            Error::Server { .. } => ErrorKind::Server,
            Error::Request { .. } => ErrorKind::Request,
            Error::Network { .. } => ErrorKind::Network,
            Error::Timeout { .. } => ErrorKind::Timeout,
            Error::Decode { .. } => ErrorKind::Decode,
            Error::Api { .. } => ErrorKind::Api,
        }
    }

    /// HTTP status code returned by the service, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Auth { status, .. }
            | Error::Server { status, .. }
            | Error::Request { status, .. } => Some(*status),
            Error::InsufficientBalance => Some(402),
            Error::RateLimited { .. } => Some(429),
            _ => None,
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        self.kind().is_transient()
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::decode(err.to_string())
    }
}

/// Result type alias for the search API client
pub type Result<T> = std::result::Result<T, Error>;
