//! The ordered set of field templates discovered in a document.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::field::FieldTemplate;

/// Deduplicated field templates in first-occurrence order.
///
/// Positions drive both the numbered list shown during selection and the
/// default column order of the exported table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldCatalog {
    fields: IndexSet<FieldTemplate>,
}

impl FieldCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a template unless already present. Returns true when it was new.
    pub fn insert(&mut self, template: FieldTemplate) -> bool {
        self.fields.insert(template)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, template: &FieldTemplate) -> bool {
        self.fields.contains(template)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldTemplate> {
        self.fields.iter()
    }

    /// Zero-based position of a template, used for ordering columns.
    pub fn position(&self, template: &FieldTemplate) -> Option<usize> {
        self.fields.get_index_of(template)
    }

    /// Look up a template by its 1-based number as shown to the user.
    pub fn by_number(&self, number: usize) -> Option<&FieldTemplate> {
        number
            .checked_sub(1)
            .and_then(|index| self.fields.get_index(index))
    }

    /// Look up a template by canonical name.
    pub fn by_name(&self, name: &str) -> Option<&FieldTemplate> {
        let template: FieldTemplate = name.parse().ok()?;
        self.fields.get(&template)
    }

    /// Iterate `(number, template)` pairs with 1-based numbers.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &FieldTemplate)> {
        self.fields
            .iter()
            .enumerate()
            .map(|(index, template)| (index + 1, template))
    }
}

impl FromIterator<FieldTemplate> for FieldCatalog {
    fn from_iter<I: IntoIterator<Item = FieldTemplate>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FieldCatalog {
    type Item = &'a FieldTemplate;
    type IntoIter = indexmap::set::Iter<'a, FieldTemplate>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
