//! Selection files: TOML lists of fields to export and their display names.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tbx_model::{FieldCatalog, SelectionConfig, SelectionFile};
use tracing::{info, warn};

/// Load a selection file and resolve it against the document's catalog.
///
/// Names that do not match any catalog field are logged and ignored.
pub fn load_selection(path: &Path, catalog: &FieldCatalog) -> Result<SelectionConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read selection file {}", path.display()))?;
    let file: SelectionFile = toml::from_str(&text)
        .with_context(|| format!("parse selection file {}", path.display()))?;
    let resolved = file.resolve(catalog);
    for name in &resolved.unresolved {
        warn!(
            field = %name,
            path = %path.display(),
            "selection names a field not present in the document; ignoring"
        );
    }
    info!(
        path = %path.display(),
        fields = resolved.selection.len(),
        ignored = resolved.unresolved.len(),
        "loaded selection"
    );
    Ok(resolved.selection)
}

/// Write a selection as TOML, creating parent directories.
pub fn save_selection(path: &Path, selection: &SelectionConfig) -> Result<()> {
    let text = toml::to_string_pretty(&selection.to_file()).context("serialize selection")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    fs::write(path, text).with_context(|| format!("write selection file {}", path.display()))?;
    info!(path = %path.display(), fields = selection.len(), "saved selection");
    Ok(())
}
