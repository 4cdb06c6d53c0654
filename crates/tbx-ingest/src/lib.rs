//! TBX ingestion.
//!
//! This crate turns a TBX file into [`tbx_model::RawEntry`] records:
//!
//! - **namespace**: prefix to URI bindings read from the root element
//! - **document**: an owned element tree built with `quick_xml::NsReader`
//! - **extract**: entry, language group and term extraction with recoverable issues

pub mod document;
pub mod error;
pub mod extract;
pub mod namespace;

use std::path::Path;
use std::time::Instant;

use tbx_model::Extraction;
use tracing::{debug, info};

pub use document::{XmlAttribute, XmlDocument, XmlElement, XmlNode, parse_document};
pub use error::{IngestError, Result};
pub use extract::{ENTRY_ELEMENTS, LANGUAGE_ELEMENTS, TERM_GROUP_ELEMENTS, extract_entries};
pub use namespace::{NamespaceMap, TBX_V2_NS, TBX_V3_NS, XML_NS, resolve_namespaces};

const UTF8_BOM: char = '\u{feff}';

/// Read a TBX file fully into memory.
pub fn read_tbx_file(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let bytes = std::fs::read(path).map_err(|source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes)
        .map_err(|error| IngestError::parse(error, 0).with_path(path))?;
    Ok(match text.strip_prefix(UTF8_BOM) {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

/// Resolve namespaces, parse and extract entries from TBX text.
pub fn parse_tbx(xml: &str) -> Result<Extraction> {
    let namespaces = resolve_namespaces(xml)?;
    debug!(
        default_namespace = namespaces.default_namespace().unwrap_or(""),
        root_namespace = namespaces.root_namespace().unwrap_or(""),
        "resolved namespaces"
    );
    let document = parse_document(xml)?;
    Ok(extract_entries(&document, &namespaces))
}

/// Read and extract a TBX file. Parse errors carry the file path.
pub fn load_tbx(path: &Path) -> Result<Extraction> {
    let start = Instant::now();
    let xml = read_tbx_file(path)?;
    let extraction = parse_tbx(&xml).map_err(|error| error.with_path(path))?;
    info!(
        path = %path.display(),
        entries = extraction.entries.len(),
        terms = extraction.term_count(),
        skipped_entries = extraction.skipped_entries(),
        dropped_terms = extraction.dropped_terms(),
        duration_ms = start.elapsed().as_millis(),
        "extraction complete"
    );
    Ok(extraction)
}
