//! Conversion pipeline with explicit stages.
//!
//! 1. **Ingest**: parse the TBX file and discover the field catalog
//! 2. **Select**: supplied by the caller (selection file, automatic, or interactive)
//! 3. **Transform**: flatten entries and project them onto a table
//! 4. **Export**: write XLSX or CSV
//!
//! Each stage takes the output of the previous stage and returns typed results.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tbx_ingest::load_tbx;
use tbx_model::{Extraction, FieldCatalog, SelectionConfig, TermTable};
use tbx_output::{OutputFormat, default_output_path, write_table};
use tbx_transform::{FlattenOptions, build_catalog, build_table};
use tracing::{info, info_span};

use crate::config::save_selection;

// ============================================================================
// Stage 1: Ingest
// ============================================================================

/// Result of the ingest stage.
#[derive(Debug)]
pub struct IngestResult {
    pub extraction: Extraction,
    /// Every field found in the document, in first-occurrence order.
    pub catalog: FieldCatalog,
}

/// Parse the input and build its field catalog.
pub fn ingest(input: &Path) -> Result<IngestResult> {
    let start = Instant::now();
    let extraction = load_tbx(input).with_context(|| format!("load {}", input.display()))?;
    if extraction.entries.is_empty() {
        bail!("no terminology entries found in {}", input.display());
    }
    let catalog = build_catalog(&extraction.entries);
    info!(
        entries = extraction.entries.len(),
        fields = catalog.len(),
        skipped_entries = extraction.skipped_entries(),
        dropped_terms = extraction.dropped_terms(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(IngestResult {
        extraction,
        catalog,
    })
}

// ============================================================================
// Stage 3: Transform
// ============================================================================

/// Flatten and project the extracted entries.
pub fn transform(
    extraction: &Extraction,
    catalog: &FieldCatalog,
    selection: &SelectionConfig,
    options: &FlattenOptions,
) -> Result<TermTable> {
    if selection.is_empty() {
        bail!("no fields selected");
    }
    let start = Instant::now();
    let table = build_table(&extraction.entries, catalog, selection, options)
        .context("build output table")?;
    info!(
        rows = table.row_count(),
        columns = table.column_count(),
        languages = table.languages().len(),
        layout = options.layout.as_str(),
        duration_ms = start.elapsed().as_millis(),
        "transform complete"
    );
    Ok(table)
}

// ============================================================================
// Stage 4: Export
// ============================================================================

/// Where and how to write the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub path: PathBuf,
    pub format: OutputFormat,
}

impl OutputTarget {
    /// Resolve the destination.
    ///
    /// An explicit format wins, then the output path's extension, then XLSX.
    /// Without an output path, the input path gets the format's extension.
    pub fn resolve(input: &Path, output: Option<&Path>, format: Option<OutputFormat>) -> Self {
        let format = format
            .or_else(|| output.and_then(OutputFormat::from_path))
            .unwrap_or_default();
        let path = output.map_or_else(|| default_output_path(input, format), Path::to_path_buf);
        Self { path, format }
    }
}

pub fn export(table: &TermTable, target: &OutputTarget) -> Result<PathBuf> {
    write_table(table, &target.path, target.format)
        .with_context(|| format!("write {}", target.path.display()))
}

// ============================================================================
// Whole run
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub flatten: FlattenOptions,
    /// Run every stage except writing the output file.
    pub dry_run: bool,
    /// Also write the chosen selection to this TOML file.
    pub save_selection: Option<PathBuf>,
}

/// Counts reported after a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Entries kept by extraction. Differs from `rows` in the per-language layout.
    pub entries: usize,
    pub rows: usize,
    /// Languages contributing columns, in column order.
    pub languages: Vec<String>,
    pub columns: Vec<String>,
    pub skipped_entries: usize,
    pub dropped_terms: usize,
    pub duplicate_ids: usize,
    /// `None` for dry runs.
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
}

impl ConversionSummary {
    pub fn new(
        extraction: &Extraction,
        table: &TermTable,
        target: &OutputTarget,
        written: bool,
    ) -> Self {
        Self {
            entries: extraction.entries.len(),
            rows: table.row_count(),
            languages: table.languages().to_vec(),
            columns: table.columns().to_vec(),
            skipped_entries: extraction.skipped_entries(),
            dropped_terms: extraction.dropped_terms(),
            duplicate_ids: extraction.duplicate_entry_ids(),
            output: written.then(|| target.path.clone()),
            format: target.format,
        }
    }
}

/// Run all stages. `select` supplies the selection once the catalog is known.
pub fn convert<F>(options: &ConvertOptions, select: F) -> Result<ConversionSummary>
where
    F: FnOnce(&FieldCatalog) -> Result<SelectionConfig>,
{
    let run_span = info_span!("convert", input = %options.input.display());
    let _run_guard = run_span.enter();
    let total = Instant::now();

    let IngestResult {
        extraction,
        catalog,
    } = info_span!("ingest").in_scope(|| ingest(&options.input))?;

    let selection = info_span!("select", fields = catalog.len()).in_scope(|| select(&catalog))?;
    if let Some(path) = &options.save_selection {
        save_selection(path, &selection)?;
    }

    let table = info_span!("transform")
        .in_scope(|| transform(&extraction, &catalog, &selection, &options.flatten))?;

    let target = OutputTarget::resolve(
        &options.input,
        options.output.as_deref(),
        options.format,
    );
    let written = if options.dry_run {
        info!(path = %target.path.display(), "dry run; skipping export");
        false
    } else {
        info_span!("export", path = %target.path.display()).in_scope(|| export(&table, &target))?;
        true
    };

    info!(
        duration_ms = total.elapsed().as_millis(),
        "conversion complete"
    );
    Ok(ConversionSummary::new(&extraction, &table, &target, written))
}
