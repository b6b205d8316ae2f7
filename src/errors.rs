//! Error types for flopmap operations.
//!
//! Library functions return [`Result<T>`], which carries a [`FlopmapError`].
//! Command handlers and the binary convert these into `anyhow::Error` at the
//! boundary so context can be attached while the typed variant stays
//! recoverable through `downcast_ref`. [`describe_failure`] turns that back
//! into the coded message and exit status the binary reports.
//!
//! # Error Codes
//!
//! Codes follow the category scheme:
//! - E001-E009: I/O and terminal errors
//! - E020-E029: Configuration errors
//! - E030-E039: Calculation and charting errors
//! - E040-E049: Argument errors
//!
//! # Example
//!
//! ```rust
//! use flopmap::errors::{ErrorCode, FlopmapError};
//!
//! let err = FlopmapError::invalid_argument("seq_len", -1);
//! assert_eq!(err.code(), ErrorCode::CLI_INVALID_ARG);
//! assert_eq!(err.exit_code(), 2);
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Structured error code for documentation and programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    /// I/O error - generic
    pub const IO_GENERIC: ErrorCode = ErrorCode("E009");

    /// Config error - invalid value or unparsable file
    pub const CONFIG_INVALID: ErrorCode = ErrorCode("E020");

    /// Calculation error - arithmetic overflow
    pub const CALC_OVERFLOW: ErrorCode = ErrorCode("E030");
    /// Chart error - proportions undefined
    pub const CHART_EMPTY: ErrorCode = ErrorCode("E033");

    /// CLI error - invalid argument
    pub const CLI_INVALID_ARG: ErrorCode = ErrorCode("E042");

    /// Get the error code string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Main error type for flopmap operations
#[derive(Debug, Error)]
pub enum FlopmapError {
    /// A hyperparameter was negative
    #[error("Invalid argument: {name} must be non-negative, got {value}")]
    InvalidArgument { name: &'static str, value: i64 },

    /// A module cost does not fit in 64 bits
    #[error("Arithmetic overflow while computing {module} cost")]
    Overflow { module: &'static str },

    /// Every module cost is zero, so slice proportions are undefined
    #[error("Cannot draw a pie chart: every module cost is zero")]
    EmptyChart,

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Output could not be written
    #[error("I/O error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Interactive terminal view failed
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl FlopmapError {
    /// Create an invalid argument error for a named hyperparameter
    pub fn invalid_argument(name: &'static str, value: i64) -> Self {
        Self::InvalidArgument { name, value }
    }

    /// Create an overflow error for a module
    pub fn overflow(module: &'static str) -> Self {
        Self::Overflow { module }
    }

    /// Create a configuration error with optional path context
    pub fn config(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Config {
            message: message.into(),
            path,
        }
    }

    /// Wrap an I/O error with a message and path
    pub fn io(message: impl Into<String>, path: Option<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            path,
            source: Some(source),
        }
    }

    /// Get the structured error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidArgument { .. } => ErrorCode::CLI_INVALID_ARG,
            Self::Overflow { .. } => ErrorCode::CALC_OVERFLOW,
            Self::EmptyChart => ErrorCode::CHART_EMPTY,
            Self::Config { .. } => ErrorCode::CONFIG_INVALID,
            Self::Io { .. } | Self::Terminal(_) => ErrorCode::IO_GENERIC,
        }
    }

    /// Process exit status for this error.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidArgument { .. } => 2, // Invalid usage
            Self::Config { .. } => 3,          // Configuration error
            Self::Overflow { .. } | Self::EmptyChart => 4,
            Self::Io { .. } | Self::Terminal(_) => 1,
        }
    }

    /// Path associated with the error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Config { path, .. } | Self::Io { path, .. } => path.as_ref(),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FlopmapError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

/// Result alias for flopmap operations
pub type Result<T> = std::result::Result<T, FlopmapError>;

/// Message and exit status for an error that reached `main`.
///
/// The first [`FlopmapError`] in the chain supplies the code prefix and exit
/// status; anything else exits with 1.
pub fn describe_failure(err: &anyhow::Error) -> (String, u8) {
    let typed = err.chain().find_map(|e| e.downcast_ref::<FlopmapError>());
    match typed {
        Some(typed) => (format!("[{}] {err:#}", typed.code()), typed.exit_code()),
        None => (format!("{err:#}"), 1),
    }
}
