//! Export tests against real files.

use std::fs;

use tbx_model::TermTable;
use tbx_output::{ExportError, MAX_ROWS, OutputFormat, default_output_path, write_table};
use tempfile::tempdir;

fn glossary_table() -> TermTable {
    TermTable::new(
        vec![
            "entry_id".to_string(),
            "en_term".to_string(),
            "en_term_2".to_string(),
            "fr_term".to_string(),
        ],
        vec![
            vec![
                Some("E1".to_string()),
                Some("cat".to_string()),
                Some("kitty".to_string()),
                Some("chat".to_string()),
            ],
            vec![Some("E2".to_string()), Some("dog, domestic".to_string()), None, None],
        ],
        vec!["en".to_string(), "fr".to_string()],
    )
}

#[test]
fn test_csv_export_writes_header_and_empty_absent_cells() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("glossary.csv");

    let written = write_table(&glossary_table(), &path, OutputFormat::Csv).unwrap();

    assert_eq!(written, path);
    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(
        contents,
        "entry_id,en_term,en_term_2,fr_term\nE1,cat,kitty,chat\nE2,\"dog, domestic\",,\n"
    );
}

#[test]
fn test_xlsx_export_produces_a_zip_package() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("glossary.xlsx");

    write_table(&glossary_table(), &path, OutputFormat::Xlsx).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.len() > 4);
    assert_eq!(&bytes[0..2], b"PK");
}

#[test]
fn test_missing_parent_directories_are_created() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested/out/glossary.csv");

    write_table(&glossary_table(), &path, OutputFormat::Csv).unwrap();

    assert!(path.exists());
}

#[test]
fn test_no_temporary_file_is_left_behind() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("glossary.xlsx");

    write_table(&glossary_table(), &path, OutputFormat::Xlsx).unwrap();

    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["glossary.xlsx".to_string()]);
}

#[test]
fn test_existing_file_is_replaced() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("glossary.csv");
    fs::write(&path, "stale").unwrap();

    write_table(&glossary_table(), &path, OutputFormat::Csv).unwrap();

    assert!(fs::read_to_string(&path).unwrap().starts_with("entry_id,"));
}

#[test]
fn test_oversized_table_is_rejected_before_writing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("huge.xlsx");
    let rows = vec![Vec::new(); MAX_ROWS];
    let table = TermTable::new(vec!["entry_id".to_string()], rows, Vec::new());

    let err = write_table(&table, &path, OutputFormat::Xlsx).unwrap_err();

    assert!(matches!(err, ExportError::TooManyRows { rows, .. } if rows == MAX_ROWS + 1));
    assert!(!path.exists());
}

#[test]
fn test_empty_table_exports_header_only() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    let table = TermTable::new(vec!["entry_id".to_string()], Vec::new(), Vec::new());

    write_table(&table, &path, OutputFormat::Csv).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "entry_id\n");
}

#[test]
fn test_default_output_path_follows_input() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("glossary.tbx");
    let output = default_output_path(&input, OutputFormat::Xlsx);
    assert_eq!(output, dir.path().join("glossary.xlsx"));
}
