//! Flattened rows and the final exported table.

use indexmap::IndexMap;
use serde::Serialize;

use crate::field::ColumnKey;

/// One flattened row. Columns that were not populated are absent, not empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatRow {
    cells: IndexMap<ColumnKey, String>,
}

impl FlatRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: ColumnKey, value: String) {
        self.cells.insert(key, value);
    }

    pub fn get(&self, key: &ColumnKey) -> Option<&str> {
        self.cells.get(key).map(String::as_str)
    }

    /// Look up a cell by its canonical column name, e.g. `en_term_2`.
    pub fn get_by_name(&self, name: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(key, _)| key.name() == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &ColumnKey> {
        self.cells.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ColumnKey, &str)> {
        self.cells.iter().map(|(key, value)| (key, value.as_str()))
    }

    /// Canonical column names in insertion order.
    pub fn column_names(&self) -> Vec<String> {
        self.cells.keys().map(ColumnKey::name).collect()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<(ColumnKey, String)> for FlatRow {
    fn from_iter<I: IntoIterator<Item = (ColumnKey, String)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// The projected table handed to the exporter.
///
/// Every row holds exactly one slot per column; `None` marks an absent cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TermTable {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
    languages: Vec<String>,
}

impl TermTable {
    /// Build a table, padding or truncating rows to the column count.
    pub fn new(
        columns: Vec<String>,
        rows: Vec<Vec<Option<String>>>,
        languages: Vec<String>,
    ) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, None);
                row
            })
            .collect();
        Self {
            columns,
            rows,
            languages,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    /// Languages contributing term columns, in column order.
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index)?.as_deref()
    }

    /// A row as a column label to value mapping.
    pub fn row_map(&self, row: usize) -> Option<IndexMap<&str, Option<&str>>> {
        let values = self.rows.get(row)?;
        Some(
            self.columns
                .iter()
                .zip(values)
                .map(|(column, value)| (column.as_str(), value.as_deref()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldTemplate;

    #[test]
    fn absent_cells_are_not_empty_strings() {
        let mut row = FlatRow::new();
        row.insert(ColumnKey::entry(FieldTemplate::EntryId), String::new());
        assert_eq!(row.get_by_name("entry_id"), Some(""));
        assert_eq!(row.get_by_name("en_term"), None);
    }

    #[test]
    fn table_rows_match_column_count() {
        let table = TermTable::new(
            vec!["entry_id".into(), "en_term".into()],
            vec![vec![Some("E1".into())], vec![None, Some("cat".into()), None]],
            vec!["en".into()],
        );
        assert!(table.rows().iter().all(|row| row.len() == 2));
        assert_eq!(table.cell(0, "entry_id"), Some("E1"));
        assert_eq!(table.cell(0, "en_term"), None);
        assert_eq!(table.cell(1, "en_term"), Some("cat"));
        let row = table.row_map(1).expect("row exists");
        assert_eq!(row.get("entry_id"), Some(&None));
    }
}
