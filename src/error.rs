//! Error types and error code constants for cssel.
//!
//! This module provides a unified error type (`CsselError`) that bridges
//! domain-specific errors from the AST and explain layers into a common
//! format suitable for JSON output.
//!
//! ## Error Code Mapping
//!
//! - `2`: Invalid arguments (bad flags, unreadable config)
//! - `3`: Invalid input (malformed selector tree JSON, broken invariants)
//! - `4`: Render failure (explain backend misuse, XML writing)
//! - `10`: Internal errors (I/O, unexpected state)
//!
//! ## Design
//!
//! - **Unified type**: `CsselError` is the single error type for CLI output
//! - **Bridging**: `impl From<X> for CsselError` lives in `error_bridges`
//! - **Code mapping**: `OutputErrorCode` provides stable integer codes for JSON

use std::fmt;

use thiserror::Error;

// ============================================================================
// Output Error Codes
// ============================================================================

/// Error codes for JSON output.
///
/// These codes map to CLI exit codes and appear in JSON error responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputErrorCode {
    /// Invalid arguments from caller (bad flags, bad config file).
    InvalidArguments = 2,
    /// The selector tree could not be read or violates its invariants.
    InvalidInput = 3,
    /// The explain backend failed to render the tree.
    RenderError = 4,
    /// Internal errors (bugs, unexpected state, I/O).
    InternalError = 10,
}

impl OutputErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for OutputErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Unified error type for CLI output.
#[derive(Debug, Error)]
pub enum CsselError {
    /// Invalid arguments from caller.
    #[error("invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// The selector tree could not be decoded or is malformed.
    #[error("invalid selector tree: {message}")]
    InvalidInput { message: String },

    /// Configuration file could not be read or parsed.
    #[error("config error: {message}")]
    Config { message: String },

    /// The explain backend failed.
    #[error("explain failed: {0}")]
    Explain(#[from] cssel_ast::ExplainError),

    /// Reading input or writing output failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error (bug or unexpected state).
    #[error("internal error: {message}")]
    Internal { message: String },
}

// ============================================================================
// Error Code Mapping
// ============================================================================

impl From<&CsselError> for OutputErrorCode {
    fn from(err: &CsselError) -> Self {
        match err {
            CsselError::InvalidArguments { .. } => OutputErrorCode::InvalidArguments,
            CsselError::Config { .. } => OutputErrorCode::InvalidArguments,
            CsselError::InvalidInput { .. } => OutputErrorCode::InvalidInput,
            CsselError::Explain(_) => OutputErrorCode::RenderError,
            CsselError::Io(_) => OutputErrorCode::InternalError,
            CsselError::Internal { .. } => OutputErrorCode::InternalError,
        }
    }
}

impl From<CsselError> for OutputErrorCode {
    fn from(err: CsselError) -> Self {
        OutputErrorCode::from(&err)
    }
}

// ============================================================================
// Convenience Constructors
// ============================================================================

impl CsselError {
    /// Create an invalid arguments error.
    pub fn invalid_args(message: impl Into<String>) -> Self {
        CsselError::InvalidArguments {
            message: message.into(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CsselError::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        CsselError::Config {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        CsselError::Internal {
            message: message.into(),
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> OutputErrorCode {
        OutputErrorCode::from(self)
    }
}

// ============================================================================
// Tests
// ============================================================================
