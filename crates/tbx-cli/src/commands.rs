use std::io;

use anyhow::{Context, Result};
use comfy_table::{Cell, CellAlignment, Table};
use serde::Serialize;
use tracing::info;

use tbx_cli::config::load_selection;
use tbx_cli::pipeline::{ConvertOptions, convert, ingest};
use tbx_cli::prompt::SelectionPrompt;
use tbx_model::{FieldCatalog, SelectionConfig};
use tbx_output::OutputFormat;
use tbx_transform::{FlattenOptions, RowLayout};

use crate::cli::{ConvertArgs, FieldsArgs, LayoutArg, OutputFormatArg};
use crate::summary::{align_column, apply_table_style, dim_cell, header_cell};
use crate::types::ConvertResult;

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertResult> {
    let options = ConvertOptions {
        input: args.input.clone(),
        output: args.output.clone(),
        format: args.format.map(|format| match format {
            OutputFormatArg::Xlsx => OutputFormat::Xlsx,
            OutputFormatArg::Csv => OutputFormat::Csv,
        }),
        flatten: FlattenOptions::default()
            .with_layout(match args.layout {
                LayoutArg::PerEntry => RowLayout::PerEntry,
                LayoutArg::PerLanguage => RowLayout::PerLanguage,
            })
            .with_separator(&args.separator),
        dry_run: args.dry_run,
        save_selection: args.save_selection.clone(),
    };

    let mut interactive = false;
    let summary = convert(&options, |catalog| {
        choose_selection(args, catalog, &mut interactive)
    })?;
    Ok(ConvertResult {
        summary,
        show_summary: args.summary || interactive,
    })
}

/// Selection file first, then automatic mode, then the interactive prompt.
fn choose_selection(
    args: &ConvertArgs,
    catalog: &FieldCatalog,
    interactive: &mut bool,
) -> Result<SelectionConfig> {
    if let Some(path) = &args.selection {
        return load_selection(path, catalog);
    }
    if args.auto {
        info!(
            fields = catalog.len(),
            "automatic mode: using every field under its original name"
        );
        return Ok(SelectionConfig::all(catalog));
    }
    *interactive = true;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompt = SelectionPrompt::new(stdin.lock(), stdout.lock());
    prompt
        .run(catalog)
        .context("interactive field selection (use --auto or --selection to skip the prompt)")
}

#[derive(Serialize)]
struct FieldRow {
    number: usize,
    name: String,
    level: &'static str,
}

pub fn run_fields(args: &FieldsArgs) -> Result<()> {
    let ingested = ingest(&args.input)?;
    let rows: Vec<FieldRow> = ingested
        .catalog
        .numbered()
        .map(|(number, template)| FieldRow {
            number,
            name: template.name(),
            level: if template.is_entry_level() {
                "entry"
            } else {
                "term"
            },
        })
        .collect();

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&rows).context("serialize field list")?
        );
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Field"),
        header_cell("Level"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for row in rows {
        table.add_row(vec![dim_cell(row.number), Cell::new(row.name), Cell::new(row.level)]);
    }
    println!("{table}");
    Ok(())
}
