//! XLSX writer.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use tbx_model::TermTable;

use crate::error::{ExportError, Result};

pub const SHEET_NAME: &str = "Terminology";
/// Rows per worksheet, header included.
pub const MAX_ROWS: usize = 1_048_576;
pub const MAX_COLUMNS: usize = 16_384;
/// Widest automatic column, in characters.
pub const MAX_COLUMN_WIDTH: usize = 50;

/// Width of each column: the longest of header and cells plus padding, capped.
pub fn column_widths(table: &TermTable) -> Vec<usize> {
    table
        .columns()
        .iter()
        .enumerate()
        .map(|(index, header)| {
            let longest = table
                .rows()
                .iter()
                .filter_map(|row| row.get(index)?.as_deref())
                .map(|value| value.chars().count())
                .fold(header.chars().count(), usize::max);
            (longest + 2).min(MAX_COLUMN_WIDTH)
        })
        .collect()
}

pub(crate) fn check_limits(table: &TermTable) -> Result<()> {
    let rows = table.row_count() + 1;
    if rows > MAX_ROWS {
        return Err(ExportError::TooManyRows {
            rows,
            max: MAX_ROWS,
        });
    }
    if table.column_count() > MAX_COLUMNS {
        return Err(ExportError::TooManyColumns {
            columns: table.column_count(),
            max: MAX_COLUMNS,
        });
    }
    Ok(())
}

pub(crate) fn write_xlsx(table: &TermTable, path: &Path) -> Result<()> {
    check_limits(table)?;
    build_workbook(table)
        .and_then(|mut workbook| workbook.save(path))
        .map_err(|source| ExportError::Xlsx {
            path: path.to_path_buf(),
            source,
        })
}

fn build_workbook(table: &TermTable) -> std::result::Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in (0u16..).zip(table.columns()) {
        worksheet.write_string_with_format(0, col, header, &header_format)?;
    }
    for (row, values) in (1u32..).zip(table.rows()) {
        for (col, value) in (0u16..).zip(values) {
            if let Some(value) = value {
                worksheet.write_string(row, col, value)?;
            }
        }
    }
    for (col, width) in (0u16..).zip(column_widths(table)) {
        worksheet.set_column_width(col, width as f64)?;
    }
    worksheet.set_freeze_panes(1, 0)?;
    Ok(workbook)
}
