//! Projection of flat rows onto the final table.

use indexmap::{IndexMap, IndexSet};
use tbx_model::{ColumnKey, FieldCatalog, FlatRow, SelectionConfig, TermTable};
use tracing::{debug, warn};

use crate::error::{ProjectError, Result};

/// Build the output table from flattened rows.
///
/// Columns are ordered as: entry-level columns in catalog order, then one
/// block per language in order of first appearance; inside a block, catalog
/// order with occurrences ascending. Labels come from the selection's
/// display names. Cells a row does not have stay absent.
pub fn project(
    rows: &[FlatRow],
    catalog: &FieldCatalog,
    selection: &SelectionConfig,
) -> Result<TermTable> {
    let mut keys: IndexSet<&ColumnKey> = IndexSet::new();
    let mut languages: IndexSet<&str> = IndexSet::new();
    for row in rows {
        for key in row.keys() {
            if !selection.is_selected(key.template()) {
                continue;
            }
            if let Some(language) = key.language() {
                languages.insert(language);
            }
            keys.insert(key);
        }
    }

    let mut ordered: Vec<&ColumnKey> = keys.into_iter().collect();
    ordered.sort_by_key(|key| {
        let position = catalog.position(key.template()).unwrap_or(usize::MAX);
        match key.language() {
            None => (0, 0, position, 1),
            Some(language) => (
                1,
                languages.get_index_of(language).unwrap_or(usize::MAX),
                position,
                key.occurrence(),
            ),
        }
    });

    let labels = column_labels(&ordered, selection)?;

    let table_rows: Vec<Vec<Option<String>>> = rows
        .iter()
        .map(|row| {
            ordered
                .iter()
                .map(|key| row.get(key).map(String::from))
                .collect::<Vec<_>>()
        })
        .collect();

    debug!(
        columns = ordered.len(),
        rows = rows.len(),
        languages = languages.len(),
        "projected table"
    );
    Ok(TermTable::new(
        labels,
        table_rows,
        languages.into_iter().map(String::from).collect(),
    ))
}

/// Header labels for the ordered columns.
///
/// Two structurally different columns can derive the same label without any
/// rename (a note type `usage_2` next to the second `usage`, or a language
/// code equal to `entry`). The first column keeps the label and later ones
/// get a `_<k>` suffix that no other column uses. A clash involving a renamed
/// field is an error.
fn column_labels(ordered: &[&ColumnKey], selection: &SelectionConfig) -> Result<Vec<String>> {
    let mut labels = Vec::with_capacity(ordered.len());
    let mut groups: IndexMap<String, Vec<usize>> = IndexMap::new();
    for (index, key) in ordered.iter().enumerate() {
        let label = key.label(&selection.display_name(key.template()));
        groups.entry(label.clone()).or_default().push(index);
        labels.push(label);
    }

    let mut taken: IndexSet<String> = groups.keys().cloned().collect();
    for (label, members) in &groups {
        if members.len() < 2 {
            continue;
        }
        let renamed = members.iter().any(|&index| {
            let template = ordered[index].template();
            selection.display_name(template) != template.name()
        });
        if renamed {
            return Err(ProjectError::DuplicateColumn {
                label: label.clone(),
            });
        }
        for &index in &members[1..] {
            let unique = (2..)
                .map(|k| format!("{label}_{k}"))
                .find(|candidate| !taken.contains(candidate))
                .unwrap_or_else(|| ordered[index].name());
            warn!(
                column = %ordered[index],
                label = %label,
                renamed_to = %unique,
                "column label clash; using a suffixed label"
            );
            taken.insert(unique.clone());
            labels[index] = unique;
        }
    }
    Ok(labels)
}
