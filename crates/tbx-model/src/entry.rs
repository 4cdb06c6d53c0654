//! Hierarchical entries as read from a TBX document.

use std::slice;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::field::FieldTemplate;

/// Typed values in encounter order. A type may repeat.
pub type TypedValues = IndexMap<String, Vec<String>>;

/// One terminological concept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    pub entry_id: Option<String>,
    pub entry_descriptions: TypedValues,
    pub terms: Vec<RawTerm>,
}

/// One term occurrence within an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTerm {
    pub language: String,
    pub text: String,
    pub term_notes: TypedValues,
    pub descriptions: TypedValues,
}

impl RawEntry {
    pub fn new(entry_id: Option<&str>) -> Self {
        Self {
            entry_id: entry_id.map(String::from),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, kind: &str, value: &str) -> Self {
        push_value(&mut self.entry_descriptions, kind, value);
        self
    }

    #[must_use]
    pub fn with_term(mut self, term: RawTerm) -> Self {
        self.terms.push(term);
        self
    }

    /// Entry-level fields in catalog order: `entry_id`, then descriptions.
    pub fn fields(&self) -> impl Iterator<Item = (FieldTemplate, &[String])> + '_ {
        let id = self
            .entry_id
            .as_ref()
            .map(|id| (FieldTemplate::EntryId, slice::from_ref(id)));
        let descriptions = self
            .entry_descriptions
            .iter()
            .map(|(kind, values)| (FieldTemplate::EntryDescrip(kind.clone()), values.as_slice()));
        id.into_iter().chain(descriptions)
    }

    /// Distinct term languages in order of first appearance.
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = Vec::new();
        for term in &self.terms {
            if !languages.contains(&term.language.as_str()) {
                languages.push(&term.language);
            }
        }
        languages
    }
}

impl RawTerm {
    pub fn new(language: &str, text: &str) -> Self {
        Self {
            language: language.to_string(),
            text: text.to_string(),
            term_notes: TypedValues::new(),
            descriptions: TypedValues::new(),
        }
    }

    #[must_use]
    pub fn with_note(mut self, kind: &str, value: &str) -> Self {
        push_value(&mut self.term_notes, kind, value);
        self
    }

    #[must_use]
    pub fn with_description(mut self, kind: &str, value: &str) -> Self {
        push_value(&mut self.descriptions, kind, value);
        self
    }

    /// Term-level fields in catalog order: `term`, notes, then descriptions.
    pub fn fields(&self) -> impl Iterator<Item = (FieldTemplate, &[String])> + '_ {
        let term = std::iter::once((FieldTemplate::Term, slice::from_ref(&self.text)));
        let notes = self
            .term_notes
            .iter()
            .map(|(kind, values)| (FieldTemplate::TermNote(kind.clone()), values.as_slice()));
        let descriptions = self
            .descriptions
            .iter()
            .map(|(kind, values)| (FieldTemplate::Descrip(kind.clone()), values.as_slice()));
        term.chain(notes).chain(descriptions)
    }
}

/// Append a value under `kind`, keeping encounter order of both kinds and values.
pub fn push_value(values: &mut TypedValues, kind: &str, value: &str) {
    values
        .entry(kind.to_string())
        .or_default()
        .push(value.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_types_keep_encounter_order() {
        let term = RawTerm::new("en", "cat")
            .with_note("partOfSpeech", "noun")
            .with_note("usage", "common")
            .with_note("partOfSpeech", "n.");
        let kinds: Vec<&String> = term.term_notes.keys().collect();
        assert_eq!(kinds, ["partOfSpeech", "usage"]);
        assert_eq!(term.term_notes["partOfSpeech"], ["noun", "n."]);
    }

    #[test]
    fn term_fields_list_term_then_notes_then_descriptions() {
        let term = RawTerm::new("en", "cat")
            .with_description("definition", "a feline")
            .with_note("partOfSpeech", "noun");
        let names: Vec<String> = term.fields().map(|(field, _)| field.name()).collect();
        assert_eq!(
            names,
            ["term", "termNote_partOfSpeech", "descrip_definition"]
        );
    }

    #[test]
    fn entry_without_id_has_only_descriptions() {
        let entry = RawEntry::new(None).with_description("subjectField", "zoology");
        let names: Vec<String> = entry.fields().map(|(field, _)| field.name()).collect();
        assert_eq!(names, ["entry_descrip_subjectField"]);
    }

    #[test]
    fn languages_are_distinct_in_first_seen_order() {
        let entry = RawEntry::new(Some("E1"))
            .with_term(RawTerm::new("fr", "chat"))
            .with_term(RawTerm::new("en", "cat"))
            .with_term(RawTerm::new("fr", "minou"));
        assert_eq!(entry.languages(), ["fr", "en"]);
    }
}
