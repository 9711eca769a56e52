//! Error types for NodeWeaver.
//!
//! Library crates use [`NodeWeaverError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all NodeWeaver operations.
#[derive(Debug, thiserror::Error)]
pub enum NodeWeaverError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Document or record parsing error (malformed JSON, bad input shape).
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Data validation error (missing required input, contract violation).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Export rendering or writing error.
    #[error("export error: {0}")]
    Export(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, NodeWeaverError>;

impl NodeWeaverError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Validation error for a required input field that is absent or empty.
    /// Raised at the stage boundary, before any work happens.
    pub fn missing_field(field: &str, stage: &str) -> Self {
        Self::Validation {
            message: format!("{stage}: required input '{field}' is missing or empty"),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = NodeWeaverError::config("missing output directory");
        assert_eq!(err.to_string(), "config error: missing output directory");

        let err = NodeWeaverError::validation("duplicate_threshold 1.5 out of range");
        assert!(err.to_string().contains("1.5"));
    }

    #[test]
    fn missing_field_names_stage_and_field() {
        let err = NodeWeaverError::missing_field("content", "segmenter");
        let msg = err.to_string();
        assert!(msg.contains("segmenter"));
        assert!(msg.contains("content"));
    }
}
