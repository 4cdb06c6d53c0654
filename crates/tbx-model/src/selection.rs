//! Field selection and renaming applied before export.

use std::collections::BTreeMap;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::catalog::FieldCatalog;
use crate::field::FieldTemplate;

/// The chosen field templates plus optional display names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionConfig {
    fields: IndexSet<FieldTemplate>,
    renames: IndexMap<FieldTemplate, String>,
}

impl SelectionConfig {
    /// Every catalog field under its original name (automatic mode).
    pub fn all(catalog: &FieldCatalog) -> Self {
        catalog.iter().cloned().collect()
    }

    pub fn is_selected(&self, template: &FieldTemplate) -> bool {
        self.fields.contains(template)
    }

    /// Set the display name of a selected field.
    ///
    /// Blank names and names equal to the canonical one clear any rename.
    pub fn rename(&mut self, template: &FieldTemplate, display: &str) {
        let display = display.trim();
        if display.is_empty() || display == template.name() {
            self.renames.shift_remove(template);
        } else {
            self.renames.insert(template.clone(), display.to_string());
        }
    }

    #[must_use]
    pub fn with_rename(mut self, template: &FieldTemplate, display: &str) -> Self {
        self.rename(template, display);
        self
    }

    /// Display name for a template: the rename if one exists, else its canonical name.
    pub fn display_name(&self, template: &FieldTemplate) -> String {
        self.renames
            .get(template)
            .cloned()
            .unwrap_or_else(|| template.name())
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldTemplate> {
        self.fields.iter()
    }

    pub fn renames(&self) -> impl Iterator<Item = (&FieldTemplate, &str)> {
        self.renames
            .iter()
            .map(|(template, display)| (template, display.as_str()))
    }

    pub fn has_renames(&self) -> bool {
        !self.renames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Serializable form using canonical names.
    pub fn to_file(&self) -> SelectionFile {
        SelectionFile {
            fields: Some(self.fields.iter().map(FieldTemplate::name).collect()),
            rename: self
                .renames
                .iter()
                .map(|(template, display)| (template.name(), display.clone()))
                .collect(),
        }
    }
}

impl FromIterator<FieldTemplate> for SelectionConfig {
    fn from_iter<I: IntoIterator<Item = FieldTemplate>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
            renames: IndexMap::new(),
        }
    }
}

/// On-disk selection, keyed by canonical field names.
///
/// ```toml
/// fields = ["entry_id", "term"]
///
/// [rename]
/// term = "Term"
/// ```
///
/// A missing `fields` list selects the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rename: BTreeMap<String, String>,
}

/// A selection file resolved against a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSelection {
    pub selection: SelectionConfig,
    /// Names that were not found in the catalog (ignored).
    pub unresolved: Vec<String>,
}

impl SelectionFile {
    /// Resolve names against the catalog, collecting any that do not match.
    pub fn resolve(&self, catalog: &FieldCatalog) -> ResolvedSelection {
        let mut unresolved = Vec::new();
        let mut selection = match &self.fields {
            None => SelectionConfig::all(catalog),
            Some(names) => names
                .iter()
                .filter_map(|name| match catalog.by_name(name) {
                    Some(template) => Some(template.clone()),
                    None => {
                        unresolved.push(name.clone());
                        None
                    }
                })
                .collect(),
        };
        for (name, display) in &self.rename {
            match catalog.by_name(name).cloned() {
                Some(template) if selection.is_selected(&template) => {
                    selection.rename(&template, display);
                }
                _ => unresolved.push(name.clone()),
            }
        }
        ResolvedSelection {
            selection,
            unresolved,
        }
    }
}
