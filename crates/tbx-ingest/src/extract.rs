//! Entry extraction: walks the element tree and builds [`RawEntry`] records.

use std::collections::HashSet;

use tbx_model::{
    Extraction, ExtractionIssue, RawEntry, RawTerm, TermDropReason, TypedValues, push_value,
};
use tracing::{debug, warn};

use crate::document::{XmlDocument, XmlElement};
use crate::namespace::NamespaceMap;

/// Entry elements: TBX v2 and TBX v3 spellings.
pub const ENTRY_ELEMENTS: &[&str] = &["termEntry", "conceptEntry"];
/// Language group elements.
pub const LANGUAGE_ELEMENTS: &[&str] = &["langSet", "langSec", "langGrp"];
/// Term group elements. The outermost one below a language group is a term.
pub const TERM_GROUP_ELEMENTS: &[&str] = &["tig", "ntig", "termSec", "termGrp"];

const DEFAULT_NOTE_TYPE: &str = "note";
const DEFAULT_DESCRIP_TYPE: &str = "description";

/// Extract every entry of a parsed document, in document order.
///
/// Malformed entries and unusable terms are recorded as issues and skipped;
/// they never abort the extraction.
pub fn extract_entries(document: &XmlDocument, namespaces: &NamespaceMap) -> Extraction {
    let walker = Walker { namespaces };
    let mut entry_elements = Vec::new();
    walker.collect_entries(&document.root, &mut entry_elements);

    let mut extraction = Extraction::default();
    let mut seen_ids = HashSet::new();
    for (index, element) in entry_elements.into_iter().enumerate() {
        let position = index + 1;
        let entry_id = entry_id(element);
        match walker.entry(element, entry_id.as_deref()) {
            Ok((entry, issues)) => {
                if let Some(id) = &entry.entry_id
                    && !seen_ids.insert(id.clone())
                {
                    warn!(entry_id = %id, "duplicate entry id");
                    extraction.issues.push(ExtractionIssue::DuplicateEntryId {
                        entry_id: id.clone(),
                    });
                }
                debug!(
                    position,
                    entry_id = entry.entry_id.as_deref().unwrap_or(""),
                    terms = entry.terms.len(),
                    languages = entry.languages().len(),
                    "extracted entry"
                );
                extraction.issues.extend(issues);
                extraction.entries.push(entry);
            }
            Err(reason) => {
                warn!(
                    position,
                    entry_id = entry_id.as_deref().unwrap_or(""),
                    %reason,
                    "skipping malformed entry"
                );
                extraction.issues.push(ExtractionIssue::SkippedEntry {
                    position,
                    entry_id,
                    reason,
                });
            }
        }
    }
    extraction
}

fn entry_id(element: &XmlElement) -> Option<String> {
    element
        .attribute("id")
        .or_else(|| element.prefixed_attribute("xml", "id"))
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
}

/// Language of a language group: `xml:lang`, else a plain `lang`.
/// Blank values count as missing.
fn language_of(group: &XmlElement) -> Option<String> {
    group
        .prefixed_attribute("xml", "lang")
        .or_else(|| group.attribute("lang"))
        .map(str::trim)
        .filter(|lang| !lang.is_empty())
        .map(String::from)
}

fn type_or<'a>(element: &'a XmlElement, default: &'a str) -> &'a str {
    element
        .attribute("type")
        .map(str::trim)
        .filter(|kind| !kind.is_empty())
        .unwrap_or(default)
}

struct Walker<'a> {
    namespaces: &'a NamespaceMap,
}

impl Walker<'_> {
    fn is_tbx(&self, element: &XmlElement) -> bool {
        self.namespaces
            .is_tbx_namespace(element.namespace.as_deref())
    }

    fn is_any(&self, element: &XmlElement, names: &[&str]) -> bool {
        self.is_tbx(element) && names.contains(&element.local_name.as_str())
    }

    fn is(&self, element: &XmlElement, name: &str) -> bool {
        self.is_tbx(element) && element.is_named(name)
    }

    fn collect_entries<'e>(&self, element: &'e XmlElement, out: &mut Vec<&'e XmlElement>) {
        for child in element.elements() {
            if self.is_any(child, ENTRY_ELEMENTS) {
                out.push(child);
            } else {
                self.collect_entries(child, out);
            }
        }
    }

    fn entry(
        &self,
        element: &XmlElement,
        entry_id: Option<&str>,
    ) -> Result<(RawEntry, Vec<ExtractionIssue>), String> {
        let mut entry = RawEntry::new(entry_id);
        let mut issues = Vec::new();
        for child in element.elements() {
            if self.is(child, "descrip") || self.is(child, "descripGrp") {
                self.collect_descriptions(child, &mut entry.entry_descriptions);
            } else if self.is_any(child, LANGUAGE_ELEMENTS) {
                self.language_group(child, entry_id, &mut entry.terms, &mut issues)?;
            }
        }
        Ok((entry, issues))
    }

    /// `descrip` elements at this level or directly inside a `descripGrp`.
    fn collect_descriptions(&self, element: &XmlElement, out: &mut TypedValues) {
        if self.is(element, "descrip") {
            let value = element.text();
            let value = value.trim();
            if !value.is_empty() {
                push_value(out, type_or(element, DEFAULT_DESCRIP_TYPE), value);
            }
            return;
        }
        for child in element.elements() {
            if self.is(child, "descrip") {
                self.collect_descriptions(child, out);
            }
        }
    }

    fn language_group(
        &self,
        group: &XmlElement,
        entry_id: Option<&str>,
        terms: &mut Vec<RawTerm>,
        issues: &mut Vec<ExtractionIssue>,
    ) -> Result<(), String> {
        let language = language_of(group);
        let mut group_descriptions = TypedValues::new();
        let mut term_groups = Vec::new();
        for child in group.elements() {
            if self.is(child, "descrip") || self.is(child, "descripGrp") {
                self.collect_descriptions(child, &mut group_descriptions);
            } else {
                self.collect_term_groups(child, &mut term_groups);
            }
        }

        // Structural check first: a term group without a term makes the entry unusable.
        let mut candidates = Vec::with_capacity(term_groups.len());
        for term_group in term_groups {
            let Some(term) = self.find_term(term_group) else {
                return Err(format!(
                    "<{}> in language group '{}' has no <term> element",
                    term_group.local_name,
                    language.as_deref().unwrap_or("?")
                ));
            };
            candidates.push((term_group, term.text().trim().to_string()));
        }

        let Some(language) = language else {
            for (_, text) in candidates {
                let issue = ExtractionIssue::DroppedTerm {
                    entry_id: entry_id.map(String::from),
                    language: None,
                    text: Some(text),
                    reason: TermDropReason::MissingLanguage,
                };
                warn!(%issue, "dropping term");
                issues.push(issue);
            }
            return Ok(());
        };

        let first_kept = terms.len();
        let mut seen_text = HashSet::new();
        for (term_group, text) in candidates {
            let reason = if text.is_empty() {
                Some(TermDropReason::EmptyText)
            } else if !seen_text.insert(text.clone()) {
                Some(TermDropReason::Duplicate)
            } else {
                None
            };
            if let Some(reason) = reason {
                let issue = ExtractionIssue::DroppedTerm {
                    entry_id: entry_id.map(String::from),
                    language: Some(language.clone()),
                    text: Some(text),
                    reason,
                };
                warn!(%issue, "dropping term");
                issues.push(issue);
                continue;
            }

            let mut term = RawTerm::new(&language, &text);
            if terms.len() == first_kept {
                term.descriptions = group_descriptions.clone();
            }
            self.collect_term_metadata(term_group, &mut term);
            terms.push(term);
        }

        if terms.len() == first_kept && !group_descriptions.is_empty() {
            debug!(
                language = %language,
                "language group has descriptions but no usable term"
            );
        }
        Ok(())
    }

    fn collect_term_groups<'e>(&self, element: &'e XmlElement, out: &mut Vec<&'e XmlElement>) {
        if self.is_any(element, TERM_GROUP_ELEMENTS) {
            out.push(element);
            return;
        }
        for child in element.elements() {
            self.collect_term_groups(child, out);
        }
    }

    fn find_term<'e>(&self, element: &'e XmlElement) -> Option<&'e XmlElement> {
        element.elements().find_map(|child| {
            if self.is(child, "term") {
                Some(child)
            } else {
                self.find_term(child)
            }
        })
    }

    /// Notes and descriptions anywhere inside a term group, in document order.
    fn collect_term_metadata(&self, element: &XmlElement, term: &mut RawTerm) {
        for child in element.elements() {
            if !self.is_tbx(child) {
                continue;
            }
            let (target, default) = match child.local_name.as_str() {
                "termNote" => (&mut term.term_notes, DEFAULT_NOTE_TYPE),
                "note" => {
                    let value = child.text();
                    let value = value.trim();
                    if !value.is_empty() {
                        push_value(&mut term.term_notes, DEFAULT_NOTE_TYPE, value);
                    }
                    continue;
                }
                "descrip" => (&mut term.descriptions, DEFAULT_DESCRIP_TYPE),
                "term" => continue,
                _ => {
                    self.collect_term_metadata(child, term);
                    continue;
                }
            };
            let value = child.text();
            let value = value.trim();
            if !value.is_empty() {
                push_value(target, type_or(child, default), value);
            }
        }
    }
}
