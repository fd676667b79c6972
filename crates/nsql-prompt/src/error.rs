//! Error type for prompt formatting.

use thiserror::Error;

/// Errors surfaced by formatter lookup and prompt assembly.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("unknown prompt format '{key}' (available: {available})")]
    UnknownFormat { key: String, available: String },

    #[error("prompt format '{0}' needs a completion client for its schema summary")]
    MissingClient(String),

    #[error("prompt format '{format}' cannot use {found} schema text")]
    SchemaMismatch { format: String, found: &'static str },

    /// The completion client failed. Passed through unchanged; no retry.
    #[error("completion failed: {0}")]
    Completion(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FormatError>;
