//! Error types for pairlab.
//!
//! One unified error type with explicit variants for transport,
//! authentication, protocol and input validation failures.

use std::fmt;
use thiserror::Error;

/// The unified error type for pairlab operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout) and local IO.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (invalid credentials, wrong role).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Protocol errors (non-success status, unexpected response shape).
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Input validation errors.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Shorthand for [`InvalidInputError::Other`].
    pub fn other(message: impl Into<String>) -> Self {
        Error::InvalidInput(InvalidInputError::Other {
            message: message.into(),
        })
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// Local filesystem error.
    #[error("IO error: {message}")]
    Io { message: String },
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError::Io {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid credentials or token.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The token carries a role this client does not know.
    #[error("unknown role '{0}'")]
    UnknownRole(String),

    /// The session's role may not perform the operation.
    #[error("forbidden: {operation} requires the {required} role")]
    Forbidden {
        operation: &'static str,
        required: &'static str,
    },
}

/// Protocol-level errors from API responses.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Error code (if present).
    pub error: Option<String>,
    /// Error message from the server.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref error) = self.error {
            write!(f, " [{}]", error)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, error: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            error,
            message,
        }
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401 || self.status == 403
    }

    /// Check if the server reported a missing resource.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// A required form field was left blank.
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    /// A task assignment did not pass validation.
    #[error("invalid assignment: {reason}")]
    Assignment { reason: String },

    /// A referenced entity does not exist.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },

    /// Generic invalid input.
    #[error("{message}")]
    Other { message: String },
}
