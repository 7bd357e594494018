//! Error types for docso operations
//!
//! Every failure the engine can report is a [`DocsoError`]. None of them are
//! fatal to the process: the bot turns each one into an error block that is
//! sent back to the channel the request came from.
//!
//! # Error Codes
//!
//! Each variant has a stable error code (e.g. `HANDLE_NOT_FOUND`) that can be
//! used for log aggregation and client-side handling, plus a category for
//! grouping related failures.
//!
//! # Example
//!
//! ```rust
//! use docso_core::error::{DocsoError, ErrorCategory};
//!
//! let err = DocsoError::TooManyArguments { given: 3, max: 2 };
//! assert_eq!(err.category(), ErrorCategory::Validation);
//! assert_eq!(err.error_code(), "TOO_MANY_ARGUMENTS");
//! assert!(!err.is_recoverable());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::glob::CompileError;

/// Result type alias for docso operations
pub type Result<T> = std::result::Result<T, DocsoError>;

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Nothing matched, or the handle is gone
    NotFound,
    /// The request itself is malformed
    Validation,
    /// The caller may not perform the operation
    Authorization,
    /// A collaborator (index provider) failed
    External,
}

/// Errors that can occur while resolving queries or navigating pages
#[derive(Error, Debug)]
pub enum DocsoError {
    /// The index provider could not produce a `DocIndex` for the package
    #[error("An error occurred while fetching the page for the package `{package}`")]
    Fetch { package: String, reason: String },

    /// The query was well-formed but matched nothing
    #[error("No {subject} found in package `{package}`")]
    NoMatch { subject: String, package: String },

    /// A wildcard pattern failed to compile; the message is passed through as-is
    #[error("Error processing glob pattern:\n```\n{0}\n```")]
    Compile(#[from] CompileError),

    /// The request carried more tokens than any query shape accepts
    #[error("Too many arguments: got {given}, expected at most {max}.")]
    TooManyArguments { given: usize, max: usize },

    /// Navigation on a handle that was destroyed, evicted or never registered
    #[error("Page listing `{handle}` not found. It may have been closed or timed out.")]
    NotFound { handle: String },

    /// Navigation by someone other than the caller who opened the listing
    #[error("Only the caller who opened listing `{handle}` can navigate it.")]
    NotOwner { handle: String },
}

impl DocsoError {
    /// Returns true if repeating the same request later might succeed
    ///
    /// Only provider failures qualify; everything else depends on the input.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DocsoError::Fetch { .. })
    }

    /// Returns the error category for grouping
    pub fn category(&self) -> ErrorCategory {
        match self {
            DocsoError::NoMatch { .. } | DocsoError::NotFound { .. } => ErrorCategory::NotFound,

            DocsoError::Compile(_) | DocsoError::TooManyArguments { .. } => {
                ErrorCategory::Validation
            }

            DocsoError::NotOwner { .. } => ErrorCategory::Authorization,

            DocsoError::Fetch { .. } => ErrorCategory::External,
        }
    }

    /// Returns the stable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DocsoError::Fetch { .. } => "FETCH_FAILED",
            DocsoError::NoMatch { .. } => "NO_MATCH",
            DocsoError::Compile(_) => "INVALID_PATTERN",
            DocsoError::TooManyArguments { .. } => "TOO_MANY_ARGUMENTS",
            DocsoError::NotFound { .. } => "HANDLE_NOT_FOUND",
            DocsoError::NotOwner { .. } => "NOT_OWNER",
        }
    }
}
