//! Error types for javadocset.
//!
//! Library crates use [`JavadocsetError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all javadocset operations.
///
/// Every variant is fatal to a build: the first error raised anywhere in the
/// pipeline is returned to the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum JavadocsetError {
    /// The Javadoc source directory does not exist.
    #[error("javadoc path does not exist: {path:?}")]
    InputNotFound { path: PathBuf },

    /// The docset output path is already occupied.
    #[error("docset output path should not exist: {path:?}")]
    OutputConflict { path: PathBuf },

    /// The index page does not follow the expected listing structure.
    #[error("malformed index: {message}")]
    MalformedIndex { message: String },

    /// Lookup store schema, transaction, or insert failure.
    #[error("storage error: {0}")]
    Storage(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Metadata descriptor rendering failure.
    #[error("template error: {0}")]
    Template(String),

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, JavadocsetError>;

impl JavadocsetError {
    /// Create an input-not-found error for `path`.
    pub fn input_not_found(path: impl Into<PathBuf>) -> Self {
        Self::InputNotFound { path: path.into() }
    }

    /// Create an output-conflict error for `path`.
    pub fn output_conflict(path: impl Into<PathBuf>) -> Self {
        Self::OutputConflict { path: path.into() }
    }

    /// Create a malformed-index error from any displayable message.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedIndex {
            message: msg.into(),
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
