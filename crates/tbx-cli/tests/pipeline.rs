//! Integration tests for the conversion pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use tbx_cli::config::{load_selection, save_selection};
use tbx_cli::pipeline::{ConvertOptions, convert, ingest};
use tbx_model::{FieldTemplate, SelectionConfig};
use tbx_output::OutputFormat;
use tbx_transform::{FlattenOptions, RowLayout};
use tempfile::{TempDir, tempdir};

const GLOSSARY: &str = include_str!("fixtures/glossary.tbx");

fn fixture(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("glossary.tbx");
    fs::write(&path, GLOSSARY).unwrap();
    path
}

fn options(input: &Path) -> ConvertOptions {
    ConvertOptions {
        input: input.to_path_buf(),
        ..ConvertOptions::default()
    }
}

#[test]
fn test_ingest_builds_catalog_in_first_occurrence_order() {
    let dir = tempdir().unwrap();
    let ingested = ingest(&fixture(&dir)).unwrap();

    let names: Vec<String> = ingested.catalog.iter().map(FieldTemplate::name).collect();
    assert_eq!(
        names,
        [
            "entry_id",
            "entry_descrip_subjectField",
            "term",
            "termNote_partOfSpeech",
            "termNote_register",
            "termNote_grammaticalGender",
            "descrip_definition",
            "entry_descrip_definition",
        ]
    );
    assert_eq!(ingested.extraction.entries.len(), 3);
}

#[test]
fn test_automatic_conversion_to_csv() {
    let dir = tempdir().unwrap();
    let input = fixture(&dir);
    let output = dir.path().join("out/glossary.csv");
    let options = ConvertOptions {
        output: Some(output.clone()),
        ..options(&input)
    };

    let summary = convert(&options, |catalog| Ok(SelectionConfig::all(catalog))).unwrap();

    assert_eq!(summary.entries, 3);
    assert_eq!(summary.rows, 3);
    assert_eq!(summary.languages, ["en", "fr"]);
    assert_eq!(summary.columns.len(), 10);
    assert_eq!(summary.skipped_entries, 0);
    assert_eq!(summary.dropped_terms, 0);
    assert_eq!(summary.format, OutputFormat::Csv);
    assert_eq!(summary.output.as_deref(), Some(output.as_path()));

    let csv = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        [
            "entry_id,entry_descrip_subjectField,entry_descrip_definition,en_term,en_term_2,\
             en_termNote_partOfSpeech,en_termNote_register,fr_term,\
             fr_termNote_grammaticalGender,fr_descrip_definition",
            "E1,zoology,,cat,kitty,noun; n.,colloquial,chat,masculine,petit félin domestique",
            "E2,,A domesticated canine,dog,,,,,,",
            "E3,botany,,,,,,,,",
        ]
    );
}

#[test]
fn test_default_output_is_xlsx_next_to_input() {
    let dir = tempdir().unwrap();
    let input = fixture(&dir);

    let summary = convert(&options(&input), |catalog| Ok(SelectionConfig::all(catalog))).unwrap();

    let expected = dir.path().join("glossary.xlsx");
    assert_eq!(summary.output.as_deref(), Some(expected.as_path()));
    assert_eq!(&fs::read(&expected).unwrap()[0..2], b"PK");
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = fixture(&dir);
    let options = ConvertOptions {
        dry_run: true,
        ..options(&input)
    };

    let summary = convert(&options, |catalog| Ok(SelectionConfig::all(catalog))).unwrap();

    assert_eq!(summary.output, None);
    assert_eq!(summary.columns.len(), 10);
    assert!(!dir.path().join("glossary.xlsx").exists());
}

#[test]
fn test_renamed_selection_changes_headers_only() {
    let dir = tempdir().unwrap();
    let input = fixture(&dir);
    let output = dir.path().join("renamed.csv");
    let options = ConvertOptions {
        output: Some(output.clone()),
        ..options(&input)
    };

    let summary = convert(&options, |_| {
        Ok(
            [FieldTemplate::EntryId, FieldTemplate::Term]
                .into_iter()
                .collect::<SelectionConfig>()
                .with_rename(&FieldTemplate::EntryId, "ID")
                .with_rename(&FieldTemplate::Term, "Term"),
        )
    })
    .unwrap();

    assert_eq!(summary.columns, ["ID", "en_Term", "en_Term_2", "fr_Term"]);
    let csv = fs::read_to_string(&output).unwrap();
    assert_eq!(
        csv,
        "ID,en_Term,en_Term_2,fr_Term\nE1,cat,kitty,chat\nE2,dog,,\nE3,,,\n"
    );
}

#[test]
fn test_per_language_layout() {
    let dir = tempdir().unwrap();
    let input = fixture(&dir);
    let options = ConvertOptions {
        dry_run: true,
        flatten: FlattenOptions::default().with_layout(RowLayout::PerLanguage),
        ..options(&input)
    };

    let summary = convert(&options, |catalog| Ok(SelectionConfig::all(catalog))).unwrap();

    // E1 en, E1 fr, E2 en, E3 without terms.
    assert_eq!(summary.rows, 4);
    assert_eq!(summary.entries, 3);
}

#[test]
fn test_selection_file_round_trip() {
    let dir = tempdir().unwrap();
    let input = fixture(&dir);
    let selection_path = dir.path().join("config/selection.toml");
    let catalog = ingest(&input).unwrap().catalog;

    let selection: SelectionConfig = [FieldTemplate::EntryId, FieldTemplate::Term]
        .into_iter()
        .collect::<SelectionConfig>()
        .with_rename(&FieldTemplate::Term, "Term");
    save_selection(&selection_path, &selection).unwrap();

    let text = fs::read_to_string(&selection_path).unwrap();
    assert!(text.contains("fields = ["));
    assert!(text.contains("term = \"Term\""));
    assert_eq!(load_selection(&selection_path, &catalog).unwrap(), selection);
}

#[test]
fn test_selection_file_ignores_unknown_fields() {
    let dir = tempdir().unwrap();
    let input = fixture(&dir);
    let selection_path = dir.path().join("selection.toml");
    fs::write(
        &selection_path,
        "fields = [\"term\", \"termNote_nonexistent\"]\n\n[rename]\nterm = \"Term\"\n",
    )
    .unwrap();
    let catalog = ingest(&input).unwrap().catalog;

    let selection = load_selection(&selection_path, &catalog).unwrap();

    let fields: Vec<&FieldTemplate> = selection.fields().collect();
    assert_eq!(fields, [&FieldTemplate::Term]);
    assert_eq!(selection.display_name(&FieldTemplate::Term), "Term");
}

#[test]
fn test_save_selection_option_writes_file() {
    let dir = tempdir().unwrap();
    let input = fixture(&dir);
    let saved = dir.path().join("saved.toml");
    let options = ConvertOptions {
        dry_run: true,
        save_selection: Some(saved.clone()),
        ..options(&input)
    };

    convert(&options, |catalog| Ok(SelectionConfig::all(catalog))).unwrap();

    let catalog = ingest(&input).unwrap().catalog;
    assert_eq!(
        load_selection(&saved, &catalog).unwrap(),
        SelectionConfig::all(&catalog)
    );
}

#[test]
fn test_malformed_input_fails_without_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("broken.tbx");
    fs::write(&input, "<martif><text><body><termEntry></body></martif>").unwrap();

    let err = convert(&options(&input), |catalog| Ok(SelectionConfig::all(catalog))).unwrap_err();

    assert!(format!("{err:#}").contains("malformed XML"));
    assert!(!dir.path().join("broken.xlsx").exists());
}

#[test]
fn test_document_without_entries_is_an_error() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("empty.tbx");
    fs::write(&input, "<martif><text><body/></text></martif>").unwrap();

    let err = ingest(&input).unwrap_err();

    assert!(err.to_string().contains("no terminology entries"));
}

#[test]
fn test_empty_selection_is_an_error() {
    let dir = tempdir().unwrap();
    let input = fixture(&dir);

    let err = convert(&options(&input), |_| Ok(SelectionConfig::default())).unwrap_err();

    assert!(err.to_string().contains("no fields selected"));
}
