//! Field templates and the per-language column keys derived from them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ModelError;

pub const ENTRY_ID: &str = "entry_id";
pub const ENTRY_DESCRIP_PREFIX: &str = "entry_descrip_";
pub const TERM: &str = "term";
pub const TERM_NOTE_PREFIX: &str = "termNote_";
pub const DESCRIP_PREFIX: &str = "descrip_";

/// A canonical field identifier discovered in a TBX document.
///
/// Entry-level templates map to exactly one column. Term-level templates
/// become one column per language (and per occurrence) at flattening time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldTemplate {
    /// `entry_id`: the entry's identifier attribute.
    EntryId,
    /// `entry_descrip_<type>`: an entry-level `descrip` element.
    EntryDescrip(String),
    /// `term`: the term text.
    Term,
    /// `termNote_<type>`: a term-level `termNote` element.
    TermNote(String),
    /// `descrip_<type>`: a term-level `descrip` element.
    Descrip(String),
}

impl FieldTemplate {
    pub fn entry_descrip(kind: impl Into<String>) -> Self {
        FieldTemplate::EntryDescrip(kind.into())
    }

    pub fn term_note(kind: impl Into<String>) -> Self {
        FieldTemplate::TermNote(kind.into())
    }

    pub fn descrip(kind: impl Into<String>) -> Self {
        FieldTemplate::Descrip(kind.into())
    }

    /// Returns true for templates that produce a single, language-independent column.
    pub fn is_entry_level(&self) -> bool {
        matches!(
            self,
            FieldTemplate::EntryId | FieldTemplate::EntryDescrip(_)
        )
    }

    /// Returns true for templates that are qualified by language when flattened.
    pub fn is_term_level(&self) -> bool {
        !self.is_entry_level()
    }

    /// Canonical field name, e.g. `termNote_partOfSpeech`.
    pub fn name(&self) -> String {
        match self {
            FieldTemplate::EntryId => ENTRY_ID.to_string(),
            FieldTemplate::EntryDescrip(kind) => format!("{ENTRY_DESCRIP_PREFIX}{kind}"),
            FieldTemplate::Term => TERM.to_string(),
            FieldTemplate::TermNote(kind) => format!("{TERM_NOTE_PREFIX}{kind}"),
            FieldTemplate::Descrip(kind) => format!("{DESCRIP_PREFIX}{kind}"),
        }
    }
}

impl fmt::Display for FieldTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for FieldTemplate {
    type Err = ModelError;

    /// Parse a canonical field name back into a template.
    ///
    /// The `entry_descrip_` prefix is checked before `descrip_` so the two
    /// families never shadow each other.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name == ENTRY_ID {
            return Ok(FieldTemplate::EntryId);
        }
        if name == TERM {
            return Ok(FieldTemplate::Term);
        }
        let typed = [
            (ENTRY_DESCRIP_PREFIX, FieldTemplate::EntryDescrip as fn(String) -> Self),
            (TERM_NOTE_PREFIX, FieldTemplate::TermNote),
            (DESCRIP_PREFIX, FieldTemplate::Descrip),
        ];
        for (prefix, build) in typed {
            if let Some(kind) = name.strip_prefix(prefix) {
                if kind.is_empty() {
                    return Err(ModelError::MissingFieldType(name.to_string()));
                }
                return Ok(build(kind.to_string()));
            }
        }
        Err(ModelError::UnknownField(name.to_string()))
    }
}

impl Serialize for FieldTemplate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name())
    }
}

impl<'de> Deserialize<'de> for FieldTemplate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Structural identity of one flattened column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnKey {
    /// Language-independent column for an entry-level template.
    Entry(FieldTemplate),
    /// Language-qualified column; `occurrence` is 1-based.
    Term {
        language: String,
        template: FieldTemplate,
        occurrence: usize,
    },
}

impl ColumnKey {
    pub fn entry(template: FieldTemplate) -> Self {
        ColumnKey::Entry(template)
    }

    pub fn term(language: impl Into<String>, template: FieldTemplate, occurrence: usize) -> Self {
        ColumnKey::Term {
            language: language.into(),
            template,
            occurrence,
        }
    }

    pub fn template(&self) -> &FieldTemplate {
        match self {
            ColumnKey::Entry(template) => template,
            ColumnKey::Term { template, .. } => template,
        }
    }

    pub fn language(&self) -> Option<&str> {
        match self {
            ColumnKey::Entry(_) => None,
            ColumnKey::Term { language, .. } => Some(language),
        }
    }

    /// 1-based occurrence; entry columns always report 1.
    pub fn occurrence(&self) -> usize {
        match self {
            ColumnKey::Entry(_) => 1,
            ColumnKey::Term { occurrence, .. } => *occurrence,
        }
    }

    /// Column label built around a display name for the template.
    ///
    /// `en` + `term` + occurrence 2 gives `en_term_2`.
    pub fn label(&self, display: &str) -> String {
        match self {
            ColumnKey::Entry(_) => display.to_string(),
            ColumnKey::Term {
                language,
                occurrence,
                ..
            } => {
                if *occurrence <= 1 {
                    format!("{language}_{display}")
                } else {
                    format!("{language}_{display}_{occurrence}")
                }
            }
        }
    }

    /// Column label using the template's canonical name.
    pub fn name(&self) -> String {
        self.label(&self.template().name())
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
