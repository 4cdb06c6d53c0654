//! In-memory element tree built with a namespace-aware reader.
//!
//! TBX files are small enough to hold fully in memory, so the extractor
//! works on an owned tree rather than on the event stream. Each element
//! keeps its resolved namespace URI, which lets the extractor match TBX
//! elements whatever prefix the document chose for them.

use quick_xml::NsReader;
use quick_xml::encoding::Decoder;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};

use crate::error::{IngestError, Result};

/// A parsed document: just its root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    pub root: XmlElement,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    /// Resolved namespace URI, `None` for unqualified elements.
    pub namespace: Option<String>,
    pub local_name: String,
    pub attributes: Vec<XmlAttribute>,
    pub children: Vec<XmlNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An attribute with its (unresolved) prefix and unescaped value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    pub prefix: Option<String>,
    pub local_name: String,
    pub value: String,
}

impl XmlElement {
    pub fn is_named(&self, local_name: &str) -> bool {
        self.local_name == local_name
    }

    /// Value of an unprefixed attribute.
    pub fn attribute(&self, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.prefix.is_none() && attr.local_name == local_name)
            .map(|attr| attr.value.as_str())
    }

    /// Value of a prefixed attribute such as `xml:lang`.
    pub fn prefixed_attribute(&self, prefix: &str, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.prefix.as_deref() == Some(prefix) && attr.local_name == local_name)
            .map(|attr| attr.value.as_str())
    }

    /// Child elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// All descendant text concatenated in document order.
    pub fn text(&self) -> String {
        let mut text = String::new();
        collect_text(self, &mut text);
        text
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(XmlNode::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(XmlNode::Text(text.to_string()));
        }
    }
}

fn collect_text(element: &XmlElement, out: &mut String) {
    for child in &element.children {
        match child {
            XmlNode::Text(text) => out.push_str(text),
            XmlNode::Element(inner) => collect_text(inner, out),
        }
    }
}

/// Parse a whole document into an element tree.
///
/// Any well-formedness error is fatal and reported as
/// [`IngestError::Parse`]; callers attach the file path.
pub fn parse_document(xml: &str) -> Result<XmlDocument> {
    let mut reader = NsReader::from_str(xml);
    let decoder = reader.decoder();
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let position = reader.buffer_position();
        let (namespace, event) = match reader.read_resolved_event() {
            Ok((resolved, event)) => (namespace_uri(resolved), event),
            Err(error) => return Err(IngestError::parse(error, position)),
        };
        match event {
            Event::Start(start) => {
                stack.push(build_element(namespace, &start, decoder, position)?);
            }
            Event::Empty(start) => {
                let element = build_element(namespace, &start, decoder, position)?;
                attach(&mut stack, &mut root, element, position)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| IngestError::parse("unexpected closing tag", position))?;
                attach(&mut stack, &mut root, element, position)?;
            }
            Event::Text(text) => {
                let text = decoder
                    .decode(&text)
                    .map_err(|error| IngestError::parse(error, position))?;
                if let Some(current) = stack.last_mut() {
                    current.push_text(&text);
                }
            }
            Event::CData(data) => {
                let text = decoder
                    .decode(&data)
                    .map_err(|error| IngestError::parse(error, position))?;
                if let Some(current) = stack.last_mut() {
                    current.push_text(&text);
                }
            }
            Event::GeneralRef(reference) => {
                let text = resolve_reference(&reference, decoder, position)?;
                if let Some(current) = stack.last_mut() {
                    current.push_text(&text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(IngestError::parse(
            format!("unclosed element <{}>", open.local_name),
            reader.buffer_position(),
        ));
    }
    root.map(|root| XmlDocument { root })
        .ok_or_else(|| IngestError::parse("document has no root element", 0))
}

fn namespace_uri(resolved: ResolveResult<'_>) -> Option<String> {
    match resolved {
        ResolveResult::Bound(Namespace(uri)) => Some(String::from_utf8_lossy(uri).into_owned()),
        ResolveResult::Unbound | ResolveResult::Unknown(_) => None,
    }
}

fn build_element(
    namespace: Option<String>,
    start: &BytesStart<'_>,
    decoder: Decoder,
    position: u64,
) -> Result<XmlElement> {
    let local_name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|error| IngestError::parse(error, position))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        if key == "xmlns" || key.starts_with("xmlns:") {
            continue;
        }
        let value = attribute
            .decode_and_unescape_value(decoder)
            .map_err(|error| IngestError::parse(error, position))?
            .into_owned();
        let (prefix, local_name) = match key.split_once(':') {
            Some((prefix, local)) => (Some(prefix.to_string()), local.to_string()),
            None => (None, key.clone()),
        };
        attributes.push(XmlAttribute {
            prefix,
            local_name,
            value,
        });
    }
    Ok(XmlElement {
        namespace,
        local_name,
        attributes,
        children: Vec::new(),
    })
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
    position: u64,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(XmlNode::Element(element));
        return Ok(());
    }
    if root.is_some() {
        return Err(IngestError::parse(
            format!("second root element <{}>", element.local_name),
            position,
        ));
    }
    *root = Some(element);
    Ok(())
}

/// Expand `&name;` and `&#N;` references. Unknown named entities are kept verbatim.
fn resolve_reference(reference: &BytesRef<'_>, decoder: Decoder, position: u64) -> Result<String> {
    if let Some(ch) = reference
        .resolve_char_ref()
        .map_err(|error| IngestError::parse(error, position))?
    {
        return Ok(ch.to_string());
    }
    let name = decoder
        .decode(reference)
        .map_err(|error| IngestError::parse(error, position))?;
    Ok(match resolve_predefined_entity(&name) {
        Some(value) => value.to_string(),
        None => format!("&{name};"),
    })
}
