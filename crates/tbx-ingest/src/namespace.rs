//! Namespace discovery from the root element of a TBX document.

use std::collections::BTreeMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{IngestError, Result};

/// The namespace bound to the reserved `xml` prefix.
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";
/// TBX v2 (ISO 30042:2008) core namespace.
pub const TBX_V2_NS: &str = "http://www.lisa.org/TBX-Specification.33.0.html";
/// TBX v3 (ISO 30042:2019) core namespace.
pub const TBX_V3_NS: &str = "urn:iso:std:iso:30042:ed-2";
/// Namespace used by some TBX v2 exporters.
pub const TBX_ED1_NS: &str = "urn:iso:std:iso:30042:ed-1";

const KNOWN_TBX_NAMESPACES: &[&str] = &[TBX_V2_NS, TBX_V3_NS, TBX_ED1_NS];

/// Prefix to URI bindings declared on the document's root element.
///
/// The empty prefix holds the default namespace when one is declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceMap {
    prefixes: BTreeMap<String, String>,
    root_namespace: Option<String>,
}

impl Default for NamespaceMap {
    fn default() -> Self {
        Self {
            prefixes: BTreeMap::from([("xml".to_string(), XML_NS.to_string())]),
            root_namespace: None,
        }
    }
}

impl NamespaceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// URI bound to `prefix`; use `""` for the default namespace.
    pub fn resolve(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    pub fn default_namespace(&self) -> Option<&str> {
        self.resolve("")
    }

    /// Namespace of the root element itself, if it has one.
    pub fn root_namespace(&self) -> Option<&str> {
        self.root_namespace.as_deref()
    }

    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes
            .iter()
            .map(|(prefix, uri)| (prefix.as_str(), uri.as_str()))
    }

    pub fn bind(&mut self, prefix: &str, uri: &str) {
        self.prefixes.insert(prefix.to_string(), uri.to_string());
    }

    /// Whether an element in namespace `uri` should be read as TBX.
    ///
    /// Unqualified elements always count, as do the document's default
    /// namespace, the root element's namespace and the published TBX URIs.
    pub fn is_tbx_namespace(&self, uri: Option<&str>) -> bool {
        let Some(uri) = uri else {
            return true;
        };
        self.default_namespace() == Some(uri)
            || self.root_namespace() == Some(uri)
            || KNOWN_TBX_NAMESPACES.contains(&uri)
    }
}

/// Read the namespace declarations of the root element.
///
/// A document without any declaration yields a map holding only the `xml`
/// binding. Only the prolog and the root start tag are read; the rest of the
/// document is left to [`crate::parse_document`].
pub fn resolve_namespaces(xml: &str) -> Result<NamespaceMap> {
    let mut reader = Reader::from_str(xml);
    let decoder = reader.decoder();
    let mut namespaces = NamespaceMap::new();
    loop {
        let position = reader.buffer_position();
        let event = reader
            .read_event()
            .map_err(|error| IngestError::parse(error, position))?;
        match event {
            Event::Start(root) | Event::Empty(root) => {
                read_root_declarations(&root, decoder, &mut namespaces, position)?;
                return Ok(namespaces);
            }
            Event::Eof => return Ok(namespaces),
            _ => {}
        }
    }
}

fn read_root_declarations(
    root: &BytesStart<'_>,
    decoder: quick_xml::encoding::Decoder,
    namespaces: &mut NamespaceMap,
    position: u64,
) -> Result<()> {
    for attribute in root.attributes() {
        let attribute = attribute.map_err(|error| IngestError::parse(error, position))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let prefix = if key == "xmlns" {
            ""
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            prefix
        } else {
            continue;
        };
        let uri = attribute
            .decode_and_unescape_value(decoder)
            .map_err(|error| IngestError::parse(error, position))?;
        namespaces.bind(prefix, uri.trim());
    }

    let name = String::from_utf8_lossy(root.name().as_ref()).into_owned();
    let root_prefix = name.split_once(':').map_or("", |(prefix, _)| prefix);
    namespaces.root_namespace = namespaces.resolve(root_prefix).map(String::from);
    Ok(())
}
