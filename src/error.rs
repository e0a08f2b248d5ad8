//! Error types for raven modules using thiserror.

use thiserror::Error;

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git executable '{0}' not found. Install git or set RAVEN_GIT to its path")]
    NotInstalled(String),

    #[error("Not a git repository: {0}")]
    NotARepository(#[source] git2::Error),

    #[error("Failed to run git {operation}: {source}")]
    SpawnFailed {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} failed: {stderr}")]
    QueryFailed { operation: String, stderr: String },

    #[error("git {operation} failed: {stderr}")]
    MutationFailed { operation: String, stderr: String },

    #[error("Unrecognized status line: '{0}'")]
    InvalidStatus(String),
}

impl GitError {
    /// Whether this error came from a state-changing git call.
    pub fn is_mutation(&self) -> bool {
        matches!(self, GitError::MutationFailed { .. })
    }
}

/// Errors from the interactive terminal layer.
#[derive(Error, Debug)]
pub enum UiError {
    #[error("Terminal I/O failed: {0}")]
    Terminal(#[source] std::io::Error),

    #[error("Interactive screens require a terminal (TTY)")]
    NotATerminal,

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from the commit workflow.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Ui(#[from] UiError),
}
