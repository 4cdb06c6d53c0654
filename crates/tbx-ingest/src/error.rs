//! Error types for TBX ingestion.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Location label used when parsing text that did not come from a file.
pub const INLINE_SOURCE: &str = "<input>";

/// Fatal ingestion errors. Per-entry and per-term problems are not errors;
/// they are recorded as [`tbx_model::ExtractionIssue`]s.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input file does not exist.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Input file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed XML.
    #[error("malformed XML in {source_name} near byte {position}: {message}")]
    Parse {
        source_name: String,
        position: u64,
        message: String,
    },
}

/// Result type alias for ingestion.
pub type Result<T> = std::result::Result<T, IngestError>;

impl IngestError {
    /// Create a Parse error for inline text.
    pub fn parse(message: impl fmt::Display, position: u64) -> Self {
        Self::Parse {
            source_name: INLINE_SOURCE.to_string(),
            position,
            message: message.to_string(),
        }
    }

    /// Attach the offending file path to a Parse error.
    #[must_use]
    pub fn with_path(self, path: &Path) -> Self {
        match self {
            Self::Parse {
                position, message, ..
            } => Self::Parse {
                source_name: path.display().to_string(),
                position,
                message,
            },
            other => other,
        }
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_reports_path_once_attached() {
        let err = IngestError::parse("unexpected end", 42);
        assert_eq!(
            err.to_string(),
            "malformed XML in <input> near byte 42: unexpected end"
        );
        let err = err.with_path(Path::new("glossary.tbx"));
        assert_eq!(
            err.to_string(),
            "malformed XML in glossary.tbx near byte 42: unexpected end"
        );
        assert!(err.is_parse_error());
    }

    #[test]
    fn with_path_leaves_other_errors_alone() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("missing.tbx"),
        };
        let err = err.with_path(Path::new("other.tbx"));
        assert_eq!(err.to_string(), "file not found: missing.tbx");
    }
}
