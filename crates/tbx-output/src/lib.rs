//! Spreadsheet export for projected terminology tables.
//!
//! - **XLSX**: a single `Terminology` sheet with a bold, frozen header row
//!   and widths fitted to the content
//! - **CSV**: header plus rows; absent cells are written empty

mod delimited;
pub mod error;
pub mod format;
pub mod workbook;
mod writer;

pub use error::{ExportError, Result};
pub use format::{OutputFormat, default_output_path};
pub use workbook::{MAX_COLUMNS, MAX_ROWS, SHEET_NAME, column_widths};
pub use writer::write_table;
