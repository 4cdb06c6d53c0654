//! Recoverable problems found while extracting entries.

use std::fmt;

use serde::Serialize;

use crate::entry::RawEntry;

/// Why a single term was left out of the extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TermDropReason {
    /// The language group has no usable `xml:lang`/`lang` value.
    MissingLanguage,
    /// The `term` element has no text.
    EmptyText,
    /// The same text already appeared in this language group.
    Duplicate,
}

impl TermDropReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            TermDropReason::MissingLanguage => "missing language",
            TermDropReason::EmptyText => "empty term text",
            TermDropReason::Duplicate => "duplicate term",
        }
    }
}

impl fmt::Display for TermDropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ExtractionIssue {
    /// A malformed entry was skipped entirely.
    SkippedEntry {
        /// 1-based position of the entry in the document.
        position: usize,
        entry_id: Option<String>,
        reason: String,
    },
    /// A term was dropped; the rest of its entry was kept.
    DroppedTerm {
        entry_id: Option<String>,
        language: Option<String>,
        text: Option<String>,
        reason: TermDropReason,
    },
    /// Two entries share the same identifier. Both are kept.
    DuplicateEntryId { entry_id: String },
}

impl fmt::Display for ExtractionIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionIssue::SkippedEntry {
                position,
                entry_id,
                reason,
            } => write!(
                f,
                "skipped entry #{position} ({}): {reason}",
                entry_id.as_deref().unwrap_or("no id")
            ),
            ExtractionIssue::DroppedTerm {
                entry_id,
                language,
                text,
                reason,
            } => write!(
                f,
                "dropped term '{}' [{}] in entry {}: {reason}",
                text.as_deref().unwrap_or(""),
                language.as_deref().unwrap_or("?"),
                entry_id.as_deref().unwrap_or("without id")
            ),
            ExtractionIssue::DuplicateEntryId { entry_id } => {
                write!(f, "duplicate entry id {entry_id}")
            }
        }
    }
}

/// Entries extracted from one document plus everything that was recovered from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub entries: Vec<RawEntry>,
    pub issues: Vec<ExtractionIssue>,
}

impl Extraction {
    pub fn skipped_entries(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| matches!(issue, ExtractionIssue::SkippedEntry { .. }))
            .count()
    }

    pub fn dropped_terms(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| matches!(issue, ExtractionIssue::DroppedTerm { .. }))
            .count()
    }

    pub fn duplicate_entry_ids(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| matches!(issue, ExtractionIssue::DuplicateEntryId { .. }))
            .count()
    }

    pub fn term_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.terms.len()).sum()
    }
}
