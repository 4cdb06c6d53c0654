//! Field catalog discovery.

use tbx_model::{FieldCatalog, RawEntry};

/// Scan entries in document order and collect every field template.
///
/// Within one entry, entry-level fields come before term-level fields;
/// across entries the first occurrence decides the position.
pub fn build_catalog(entries: &[RawEntry]) -> FieldCatalog {
    let mut catalog = FieldCatalog::new();
    for entry in entries {
        for (template, _) in entry.fields() {
            catalog.insert(template);
        }
        for term in &entry.terms {
            for (template, _) in term.fields() {
                catalog.insert(template);
            }
        }
    }
    catalog
}
