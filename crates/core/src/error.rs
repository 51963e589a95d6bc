//! Error types for the landmark-core library.
//!
//! The interaction core never fails: unresolved pointer input degrades to a
//! no-op. These variants cover the fallible edges around it, such as
//! configuration, settings persistence and window start-up.

use thiserror::Error;

/// Errors that can occur within the landmark-core library.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors (malformed or out-of-range values).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The scene could not be built from the given parameters.
    #[error("Invalid scene: {0}")]
    InvalidScene(String),

    /// UI-related errors (rendering, window management, clipboard).
    #[error("UI error: {0}")]
    Ui(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a scene construction error with the given message.
    pub fn scene(msg: impl Into<String>) -> Self {
        Self::InvalidScene(msg.into())
    }

    /// Creates a UI error with the given message.
    pub fn ui(msg: impl Into<String>) -> Self {
        Self::Ui(msg.into())
    }
}

/// A convenient alias for Result with [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
