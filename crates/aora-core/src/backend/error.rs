use std::fmt;

use serde::Deserialize;

/// Categories of backend failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendErrorKind {
    /// Request never produced a response (DNS, connect, TLS, reset)
    Transport,
    /// Service answered with a non-success status
    HttpStatus,
    /// Response body did not decode
    Parse,
    /// Call succeeded but the expected resource was absent
    NotFound,
    /// Rejected locally before any request was sent
    InvalidInput,
}

impl fmt::Display for BackendErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendErrorKind::Transport => write!(f, "transport"),
            BackendErrorKind::HttpStatus => write!(f, "http_status"),
            BackendErrorKind::Parse => write!(f, "parse"),
            BackendErrorKind::NotFound => write!(f, "not_found"),
            BackendErrorKind::InvalidInput => write!(f, "invalid_input"),
        }
    }
}

/// Structured backend error with kind and details.
#[derive(Debug, Clone)]
pub struct BackendError {
    pub kind: BackendErrorKind,
    /// One-line summary suitable for display
    pub message: String,
    /// HTTP status when the service answered
    pub status: Option<u16>,
    /// Appwrite error type (e.g. `user_unauthorized`) or raw body
    pub details: Option<String>,
}

/// Appwrite's JSON error envelope.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default, rename = "type")]
    error_type: Option<String>,
}

impl BackendError {
    pub fn new(kind: BackendErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            details: None,
        }
    }

    pub fn transport(err: &reqwest::Error) -> Self {
        Self {
            details: Some(err.to_string()),
            ..Self::new(BackendErrorKind::Transport, "Backend request failed")
        }
    }

    pub fn parse(what: &str, err: impl fmt::Display) -> Self {
        Self {
            details: Some(err.to_string()),
            ..Self::new(BackendErrorKind::Parse, format!("Failed to decode {what}"))
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::NotFound, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::InvalidInput, message)
    }

    /// Builds an HTTP status error, pulling the message out of an Appwrite
    /// error body when there is one.
    pub fn http_status(status: u16, body: &str) -> Self {
        if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
            return Self {
                kind: BackendErrorKind::HttpStatus,
                message: format!("HTTP {status}: {}", parsed.message),
                status: Some(status),
                details: parsed.error_type,
            };
        }
        Self {
            kind: BackendErrorKind::HttpStatus,
            message: format!("HTTP {status}"),
            status: Some(status),
            details: (!body.is_empty()).then(|| body.to_string()),
        }
    }

    /// True when the service rejected the request for lack of a session.
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for BackendError {}

/// Result type for backend operations.
pub type BackendResult<T> = std::result::Result<T, BackendError>;
