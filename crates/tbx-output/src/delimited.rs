//! CSV writer.

use std::path::Path;

use tbx_model::TermTable;

use crate::error::{ExportError, Result};

pub(crate) fn write_csv(table: &TermTable, path: &Path) -> Result<()> {
    let map_err = |source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(map_err)?;
    writer.write_record(table.columns()).map_err(map_err)?;
    for row in table.rows() {
        writer
            .write_record(row.iter().map(|value| value.as_deref().unwrap_or("")))
            .map_err(map_err)?;
    }
    writer.flush().map_err(|source| ExportError::Io {
        operation: "flush",
        path: path.to_path_buf(),
        source,
    })
}
