//! Atomic table export.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tbx_model::TermTable;
use tracing::{debug, info, warn};

use crate::delimited::write_csv;
use crate::error::{ExportError, Result};
use crate::format::OutputFormat;
use crate::workbook::write_xlsx;

/// Write `table` to `destination` in the given format.
///
/// The file is written next to the destination under a temporary name and
/// renamed into place once complete, so a failed export never leaves a
/// partial file behind. Missing parent directories are created.
pub fn write_table(table: &TermTable, destination: &Path, format: OutputFormat) -> Result<PathBuf> {
    let start = Instant::now();
    let temp_path = temp_path_for(destination)?;

    if let Some(parent) = destination
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        fs::create_dir_all(parent).map_err(|source| ExportError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source,
        })?;
    }

    debug!(path = %temp_path.display(), %format, "writing temporary file");
    let written = match format {
        OutputFormat::Xlsx => write_xlsx(table, &temp_path),
        OutputFormat::Csv => write_csv(table, &temp_path),
    };
    if let Err(error) = written {
        discard(&temp_path);
        return Err(error);
    }

    if let Err(source) = fs::rename(&temp_path, destination) {
        discard(&temp_path);
        return Err(ExportError::AtomicWriteFailed {
            temp_path,
            target_path: destination.to_path_buf(),
            source,
        });
    }

    info!(
        path = %destination.display(),
        %format,
        rows = table.row_count(),
        columns = table.column_count(),
        duration_ms = start.elapsed().as_millis(),
        "export complete"
    );
    Ok(destination.to_path_buf())
}

/// Hidden sibling of the destination, e.g. `out/.terms.xlsx.tmp`.
fn temp_path_for(destination: &Path) -> Result<PathBuf> {
    let name = destination
        .file_name()
        .ok_or_else(|| ExportError::InvalidDestination {
            path: destination.to_path_buf(),
        })?;
    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(name);
    temp_name.push(".tmp");
    Ok(destination.with_file_name(temp_name))
}

fn discard(temp_path: &Path) {
    if temp_path.exists()
        && let Err(error) = fs::remove_file(temp_path)
    {
        warn!(path = %temp_path.display(), %error, "could not remove temporary file");
    }
}
