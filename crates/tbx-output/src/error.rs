//! Export error types.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while writing a table to disk. All of them are fatal for the run.
#[derive(Debug, Error)]
pub enum ExportError {
    /// File system operation failed.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The workbook could not be built or saved.
    #[error("failed to write workbook {path}: {source}")]
    Xlsx {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    #[error("failed to write CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Rows (header included) exceed what a worksheet can hold.
    #[error("table has {rows} rows including the header; a worksheet holds at most {max}")]
    TooManyRows { rows: usize, max: usize },

    #[error("table has {columns} columns; a worksheet holds at most {max}")]
    TooManyColumns { columns: usize, max: usize },

    /// The destination does not name a file.
    #[error("output path {path} does not name a file")]
    InvalidDestination { path: PathBuf },

    /// The finished temporary file could not be moved into place.
    #[error("failed to move {temp_path} to {target_path}: {source}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
