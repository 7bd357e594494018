//! Error types for the docso bot

use docso_core::DocsoError;
use thiserror::Error;

/// Result type for bot operations
pub type BotResult<T> = Result<T, BotError>;

/// Errors that can occur in the bot
#[derive(Error, Debug)]
pub enum BotError {
    /// Engine error (lookup, pattern, navigation)
    #[error(transparent)]
    Core(#[from] DocsoError),

    /// The index provider has nothing for this package
    #[error("No documentation index for package `{0}`")]
    IndexNotFound(String),

    /// Sending, editing or deleting a message failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BotError {
    /// Stable code for logs
    pub fn error_code(&self) -> &'static str {
        match self {
            BotError::Core(err) => err.error_code(),
            BotError::IndexNotFound(_) => "INDEX_NOT_FOUND",
            BotError::Transport(_) => "TRANSPORT_FAILED",
            BotError::Config(_) => "INVALID_CONFIG",
            BotError::Io(_) => "IO_ERROR",
            BotError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Express a provider failure for `package` as the engine's fetch error
    pub fn into_fetch_error(self, package: &str) -> DocsoError {
        match self {
            BotError::Core(err @ DocsoError::Fetch { .. }) => err,
            other => DocsoError::Fetch {
                package: package.to_string(),
                reason: other.to_string(),
            },
        }
    }
}
