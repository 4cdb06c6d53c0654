//! Tests for table projection.

use tbx_model::{FieldCatalog, FieldTemplate, RawEntry, RawTerm, SelectionConfig};
use tbx_transform::{FlattenOptions, ProjectError, RowLayout, build_catalog, build_table};

fn glossary() -> Vec<RawEntry> {
    vec![
        RawEntry::new(Some("E1"))
            .with_description("subjectField", "zoology")
            .with_term(
                RawTerm::new("en", "cat")
                    .with_note("partOfSpeech", "noun")
                    .with_note("partOfSpeech", "n."),
            )
            .with_term(RawTerm::new("en", "kitty").with_note("register", "colloquial"))
            .with_term(RawTerm::new("fr", "chat").with_note("grammaticalGender", "masculine")),
        RawEntry::new(Some("E2"))
            .with_term(RawTerm::new("en", "dog").with_description("definition", "A canine")),
        RawEntry::new(Some("E3")).with_description("subjectField", "botany"),
    ]
}

fn auto(entries: &[RawEntry]) -> (FieldCatalog, SelectionConfig) {
    let catalog = build_catalog(entries);
    let selection = SelectionConfig::all(&catalog);
    (catalog, selection)
}

#[test]
fn test_columns_follow_entry_then_language_blocks() {
    let entries = glossary();
    let (catalog, selection) = auto(&entries);
    let table = build_table(&entries, &catalog, &selection, &FlattenOptions::default()).unwrap();

    assert_eq!(
        table.columns(),
        [
            "entry_id",
            "entry_descrip_subjectField",
            "en_term",
            "en_term_2",
            "en_termNote_partOfSpeech",
            "en_termNote_register",
            "en_descrip_definition",
            "fr_term",
            "fr_termNote_grammaticalGender",
        ]
    );
    assert_eq!(table.languages(), ["en", "fr"]);
    assert_eq!(table.row_count(), 3);
}

#[test]
fn test_absent_cells_stay_absent() {
    let entries = glossary();
    let (catalog, selection) = auto(&entries);
    let table = build_table(&entries, &catalog, &selection, &FlattenOptions::default()).unwrap();

    assert_eq!(table.cell(0, "en_term_2"), Some("kitty"));
    assert_eq!(table.cell(1, "en_term"), Some("dog"));
    assert_eq!(table.cell(1, "en_term_2"), None);
    assert_eq!(table.cell(1, "fr_term"), None);
    // E3 has no terms but keeps its row.
    assert_eq!(table.cell(2, "entry_id"), Some("E3"));
    assert_eq!(table.cell(2, "entry_descrip_subjectField"), Some("botany"));
    assert_eq!(table.cell(2, "en_term"), None);
    assert!(table.rows().iter().all(|row| row.len() == table.column_count()));
}

#[test]
fn test_automatic_mode_equals_selecting_everything_unrenamed() {
    let entries = glossary();
    let catalog = build_catalog(&entries);
    let automatic = SelectionConfig::all(&catalog);
    let manual: SelectionConfig = catalog.numbered().map(|(_, t)| t.clone()).collect();
    let options = FlattenOptions::default();

    assert_eq!(
        build_table(&entries, &catalog, &automatic, &options),
        build_table(&entries, &catalog, &manual, &options)
    );
}

#[test]
fn test_renaming_changes_labels_only() {
    let entries = glossary();
    let (catalog, selection) = auto(&entries);
    let options = FlattenOptions::default();
    let plain = build_table(&entries, &catalog, &selection, &options).unwrap();
    let renamed = build_table(
        &entries,
        &catalog,
        &selection.clone().with_rename(&FieldTemplate::Term, "Term"),
        &options,
    )
    .unwrap();

    assert_eq!(renamed.columns()[2], "en_Term");
    assert_eq!(renamed.columns()[3], "en_Term_2");
    assert_eq!(renamed.columns()[7], "fr_Term");
    assert_eq!(plain.rows(), renamed.rows());
    assert_eq!(plain.column_count(), renamed.column_count());
}

#[test]
fn test_unselected_fields_are_omitted() {
    let entries = glossary();
    let catalog = build_catalog(&entries);
    let selection: SelectionConfig = [FieldTemplate::EntryId, FieldTemplate::Term]
        .into_iter()
        .collect();
    let table = build_table(&entries, &catalog, &selection, &FlattenOptions::default()).unwrap();

    assert_eq!(
        table.columns(),
        ["entry_id", "en_term", "en_term_2", "fr_term"]
    );
}

#[test]
fn test_language_without_selected_columns_is_not_reported() {
    let entries = glossary();
    let catalog = build_catalog(&entries);
    let selection: SelectionConfig = [
        FieldTemplate::EntryId,
        FieldTemplate::term_note("register"),
    ]
    .into_iter()
    .collect();
    let table = build_table(&entries, &catalog, &selection, &FlattenOptions::default()).unwrap();

    assert_eq!(table.columns(), ["entry_id", "en_termNote_register"]);
    assert_eq!(table.languages(), ["en"]);
}

#[test]
fn test_per_language_layout_has_one_row_per_language() {
    let entries = glossary();
    let (catalog, selection) = auto(&entries);
    let options = FlattenOptions::default().with_layout(RowLayout::PerLanguage);
    let table = build_table(&entries, &catalog, &selection, &options).unwrap();

    // E1: en + fr, E2: en, E3: entry-only row.
    assert_eq!(table.row_count(), 4);
    assert_eq!(table.cell(0, "en_term"), Some("cat"));
    assert_eq!(table.cell(0, "fr_term"), None);
    assert_eq!(table.cell(1, "entry_id"), Some("E1"));
    assert_eq!(table.cell(1, "fr_term"), Some("chat"));
}

#[test]
fn test_rename_collision_is_an_error() {
    let entries = glossary();
    let (catalog, selection) = auto(&entries);
    let selection = selection.with_rename(&FieldTemplate::entry_descrip("subjectField"), "entry_id");

    let err = build_table(&entries, &catalog, &selection, &FlattenOptions::default()).unwrap_err();
    assert_eq!(
        err,
        ProjectError::DuplicateColumn {
            label: "entry_id".to_string()
        }
    );
}

#[test]
fn test_note_type_ending_in_number_gets_unique_column() {
    let entries = vec![
        RawEntry::new(Some("E1"))
            .with_term(
                RawTerm::new("en", "cat")
                    .with_note("usage", "a")
                    .with_note("usage_2", "c"),
            )
            .with_term(RawTerm::new("en", "kitty").with_note("usage", "b")),
    ];
    let (catalog, selection) = auto(&entries);

    let table = build_table(&entries, &catalog, &selection, &FlattenOptions::default()).unwrap();

    assert_eq!(
        table.columns(),
        [
            "entry_id",
            "en_term",
            "en_term_2",
            "en_termNote_usage",
            "en_termNote_usage_2",
            "en_termNote_usage_2_2",
        ]
    );
    assert_eq!(table.cell(0, "en_termNote_usage"), Some("a"));
    assert_eq!(table.cell(0, "en_termNote_usage_2"), Some("b"));
    assert_eq!(table.cell(0, "en_termNote_usage_2_2"), Some("c"));
}

#[test]
fn test_language_named_entry_does_not_clash_with_entry_columns() {
    let entries = vec![
        RawEntry::new(Some("E1"))
            .with_description("x", "entry level")
            .with_term(RawTerm::new("entry", "word").with_description("x", "term level")),
    ];
    let (catalog, selection) = auto(&entries);

    let table = build_table(&entries, &catalog, &selection, &FlattenOptions::default()).unwrap();

    assert_eq!(
        table.columns(),
        [
            "entry_id",
            "entry_descrip_x",
            "entry_term",
            "entry_descrip_x_2",
        ]
    );
    assert_eq!(table.cell(0, "entry_descrip_x"), Some("entry level"));
    assert_eq!(table.cell(0, "entry_descrip_x_2"), Some("term level"));
}

#[test]
fn test_empty_input_gives_empty_table() {
    let catalog = FieldCatalog::new();
    let table = build_table(&[], &catalog, &SelectionConfig::all(&catalog), &FlattenOptions::default())
        .unwrap();
    assert_eq!(table.column_count(), 0);
    assert_eq!(table.row_count(), 0);
}
