//! Error types for pgdesk.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for pgdesk operations.
#[derive(Error, Debug)]
pub enum DeskError {
    /// Database connection errors (host unreachable, auth failed, missing database).
    #[error("Connection error: {message}")]
    Connection {
        /// Driver message, surfaced verbatim.
        message: String,
        /// SQLSTATE code, when the driver reports one.
        code: Option<String>,
    },

    /// Statement execution errors (syntax errors, constraint violations, etc.)
    #[error("Execution error: {message}")]
    Execution {
        /// Driver message, surfaced verbatim.
        message: String,
        /// SQLSTATE code, when the driver reports one.
        code: Option<String>,
    },

    /// Configuration errors (invalid connection string, unknown catalog label, etc.)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DeskError {
    /// Creates a connection error with the given message and no driver code.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection {
            message: msg.into(),
            code: None,
        }
    }

    /// Creates an execution error with the given message and no driver code.
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution {
            message: msg.into(),
            code: None,
        }
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns the SQLSTATE code attached to this error, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Connection { code, .. } | Self::Execution { code, .. } => code.as_deref(),
            Self::Config(_) => None,
        }
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection { .. } => "Connection Error",
            Self::Execution { .. } => "Execution Error",
            Self::Config(_) => "Configuration Error",
        }
    }
}

/// Result type alias using DeskError.
pub type Result<T> = std::result::Result<T, DeskError>;
