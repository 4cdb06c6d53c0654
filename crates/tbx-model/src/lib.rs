//! Data model for TBX to spreadsheet conversion.
//!
//! - **entry**: hierarchical entries and terms as extracted from TBX
//! - **field**: field templates (`term`, `termNote_<type>`, ...) and column keys
//! - **catalog**: the ordered set of templates discovered in a document
//! - **selection**: the chosen templates plus display names
//! - **table**: flattened rows and the final projected table
//! - **issues**: recoverable extraction problems

pub mod catalog;
pub mod entry;
pub mod error;
pub mod field;
pub mod issues;
pub mod selection;
pub mod table;

pub use catalog::FieldCatalog;
pub use entry::{RawEntry, RawTerm, TypedValues, push_value};
pub use error::{ModelError, Result};
pub use field::{ColumnKey, FieldTemplate};
pub use issues::{Extraction, ExtractionIssue, TermDropReason};
pub use selection::{ResolvedSelection, SelectionConfig, SelectionFile};
pub use table::{FlatRow, TermTable};
