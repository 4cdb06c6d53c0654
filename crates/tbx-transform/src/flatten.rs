//! Row flattening: hierarchical entries to flat, language-qualified rows.
//!
//! Every value of a term is keyed by `(language, template, occurrence)`. The
//! occurrence of a term's field is one more than the number of earlier terms
//! in the same language group that carry that field, so `en` + `term` yields
//! `en_term`, `en_term_2`, ... without any counter shared between entries.

use tbx_model::{ColumnKey, FieldTemplate, FlatRow, RawEntry, RawTerm, SelectionConfig};

/// Separator used when a field type repeats within one term.
pub const DEFAULT_SEPARATOR: &str = "; ";

/// How entries are spread over rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RowLayout {
    /// One row per entry; each language contributes its own columns.
    #[default]
    PerEntry,
    /// One row per (entry, language); entry-level values repeat on each row.
    PerLanguage,
}

impl RowLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowLayout::PerEntry => "per-entry",
            RowLayout::PerLanguage => "per-language",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenOptions {
    pub layout: RowLayout,
    /// Joins repeated values of one field type within a single term.
    pub separator: String,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            layout: RowLayout::default(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl FlattenOptions {
    #[must_use]
    pub fn with_layout(mut self, layout: RowLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_separator(mut self, separator: &str) -> Self {
        self.separator = separator.to_string();
        self
    }
}

/// Terms of one language within an entry, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageGroup<'a> {
    pub language: &'a str,
    pub terms: Vec<&'a RawTerm>,
}

/// Group terms by language, languages in order of first appearance.
pub fn group_by_language(terms: &[RawTerm]) -> Vec<LanguageGroup<'_>> {
    let mut groups: Vec<LanguageGroup<'_>> = Vec::new();
    for term in terms {
        match groups
            .iter_mut()
            .find(|group| group.language == term.language)
        {
            Some(group) => group.terms.push(term),
            None => groups.push(LanguageGroup {
                language: &term.language,
                terms: vec![term],
            }),
        }
    }
    groups
}

/// Flatten one entry into rows.
///
/// Only selected templates produce cells. An entry without terms still
/// yields one row holding its entry-level values.
pub fn flatten_entry(
    entry: &RawEntry,
    selection: &SelectionConfig,
    options: &FlattenOptions,
) -> Vec<FlatRow> {
    let base: FlatRow = entry_cells(entry, selection, &options.separator)
        .into_iter()
        .collect();
    let groups = group_by_language(&entry.terms);
    if groups.is_empty() {
        return vec![base];
    }

    match options.layout {
        RowLayout::PerEntry => {
            let mut row = base;
            for group in &groups {
                for (key, value) in language_cells(group, selection, &options.separator) {
                    row.insert(key, value);
                }
            }
            vec![row]
        }
        RowLayout::PerLanguage => groups
            .iter()
            .map(|group| {
                let mut row = base.clone();
                for (key, value) in language_cells(group, selection, &options.separator) {
                    row.insert(key, value);
                }
                row
            })
            .collect(),
    }
}

/// Flatten all entries in order.
pub fn flatten_entries(
    entries: &[RawEntry],
    selection: &SelectionConfig,
    options: &FlattenOptions,
) -> Vec<FlatRow> {
    entries
        .iter()
        .flat_map(|entry| flatten_entry(entry, selection, options))
        .collect()
}

/// Entry-level cells: `entry_id` and entry descriptions.
pub fn entry_cells(
    entry: &RawEntry,
    selection: &SelectionConfig,
    separator: &str,
) -> Vec<(ColumnKey, String)> {
    let mut cells = Vec::new();
    for (template, values) in entry.fields() {
        if values.is_empty() || !selection.is_selected(&template) {
            continue;
        }
        cells.push((ColumnKey::entry(template), values.join(separator)));
    }
    cells
}

/// Language-qualified cells for every term of one language group.
pub fn language_cells(
    group: &LanguageGroup<'_>,
    selection: &SelectionConfig,
    separator: &str,
) -> Vec<(ColumnKey, String)> {
    let mut cells = Vec::new();
    for (index, term) in group.terms.iter().enumerate() {
        for (template, values) in term.fields() {
            if values.is_empty() || !selection.is_selected(&template) {
                continue;
            }
            let occurrence = occurrence_of(&group.terms[..index], &template);
            cells.push((
                ColumnKey::term(group.language, template, occurrence),
                values.join(separator),
            ));
        }
    }
    cells
}

fn occurrence_of(earlier: &[&RawTerm], template: &FieldTemplate) -> usize {
    1 + earlier
        .iter()
        .filter(|term| {
            term.fields()
                .any(|(field, values)| &field == template && !values.is_empty())
        })
        .count()
}
