use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tbx_cli::pipeline::ConversionSummary;

pub fn print_summary(summary: &ConversionSummary) {
    println!();
    println!("Conversion summary");
    match &summary.output {
        Some(path) => println!("Output: {} ({})", path.display(), summary.format),
        None => println!("Output: not written (dry run)"),
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Entries"), Cell::new(summary.entries)]);
    table.add_row(vec![Cell::new("Rows"), Cell::new(summary.rows)]);
    table.add_row(vec![
        Cell::new("Languages"),
        Cell::new(summary.languages.len()),
    ]);
    table.add_row(vec![Cell::new("Columns"), Cell::new(summary.columns.len())]);
    table.add_row(vec![
        Cell::new("Skipped entries"),
        count_cell(summary.skipped_entries, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Dropped terms"),
        count_cell(summary.dropped_terms, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Duplicate entry ids"),
        count_cell(summary.duplicate_ids, Color::Yellow),
    ]);
    println!("{table}");

    if !summary.languages.is_empty() {
        println!("Languages: {}", summary.languages.join(", "));
    }
    print_column_table(&summary.columns);
}

fn print_column_table(columns: &[String]) {
    if columns.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Column")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, column) in columns.iter().enumerate() {
        table.add_row(vec![dim_cell(index + 1), Cell::new(column)]);
    }
    println!("Columns:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
