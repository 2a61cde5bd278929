//! Error types for the neuronet CLI.

use neuronet_core::GraphError;
use thiserror::Error;

/// CLI result type alias.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error type.
#[derive(Error, Debug)]
pub enum CliError {
    /// Loading or validating the graph failed.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// IO error while writing output or reading the session.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Graph exceeds the configured memory cap.
    #[error("loaded graph uses {used_mb}MB, exceeds max_memory_mb={max_mb}MB")]
    MemoryLimit { used_mb: usize, max_mb: usize },

    /// A query was issued before any graph was loaded.
    #[error("no graph loaded; use `load <path>` first")]
    NotLoaded,

    /// Malformed session command or argument.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Errors that end an interactive session rather than being reported inline.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CliError::Io(_) | CliError::Json(_))
    }
}
