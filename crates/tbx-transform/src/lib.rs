//! Transformation stages between extraction and export.
//!
//! - **catalog**: discover the ordered field catalog
//! - **flatten**: turn entries into language-qualified rows
//! - **projection**: order, label and align rows into a [`TermTable`]

pub mod catalog;
pub mod error;
pub mod flatten;
pub mod projection;

pub use catalog::build_catalog;
pub use error::{ProjectError, Result};
pub use flatten::{
    DEFAULT_SEPARATOR, FlattenOptions, LanguageGroup, RowLayout, flatten_entries, flatten_entry,
    group_by_language,
};
pub use projection::project;

use tbx_model::{FieldCatalog, RawEntry, SelectionConfig, TermTable};

/// Flatten and project in one step.
pub fn build_table(
    entries: &[RawEntry],
    catalog: &FieldCatalog,
    selection: &SelectionConfig,
    options: &FlattenOptions,
) -> Result<TermTable> {
    let rows = flatten_entries(entries, selection, options);
    project(&rows, catalog, selection)
}
