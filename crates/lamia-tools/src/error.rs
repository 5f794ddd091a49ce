//! Error types for the Lamia tools library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for schema, lint and catalog operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Interactive confirmation could not be read or written.
    #[error("Confirmation prompt failed: {0}")]
    Prompt(#[source] std::io::Error),

    /// An external program could not be started.
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// An external program exited unsuccessfully.
    #[error("{stage} failed: '{program}' exited with {}{}", describe_code(.code), describe_stderr(.stderr))]
    ProcessFailed {
        program: String,
        stage: String,
        code: Option<i32>,
        stderr: String,
    },

    /// An external program ran longer than allowed and was killed.
    #[error("'{program}' timed out after {seconds}s")]
    Timeout { program: String, seconds: u64 },

    /// Linter output did not contain a score.
    #[error("Could not read lint score: {0}")]
    ScoreParse(String),

    /// Error from the database driver.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid or missing schema definition.
    #[error("Schema error: {0}")]
    Schema(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (killed by signal)".to_string(),
    }
}

fn describe_stderr(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// Result type alias for Lamia tools operations.
pub type Result<T> = std::result::Result<T, ToolError>;
