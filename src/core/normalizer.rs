use crate::domain::model::{Table, TableText};
use crate::utils::error::Result;
use csv::ReaderBuilder;

/// Turns pasted text into a `TableText`. Returns `None` for empty input
/// ("no table provided"). Parse failures never escape: anything that does
/// not fit the tab-delimited structure comes back as `TableText::Raw` with
/// the original text untouched.
pub fn normalize(input: &str) -> Option<TableText> {
    if input.trim().is_empty() {
        return None;
    }

    // A header line without the delimiter is not a table at all.
    let header_line = input.lines().next().unwrap_or("");
    if !header_line.contains('\t') {
        tracing::debug!("No tab delimiter in first line, keeping raw text");
        return Some(TableText::Raw(input.to_string()));
    }

    match parse_table(input) {
        Ok(table) => Some(TableText::Structured(table)),
        Err(e) => {
            tracing::debug!("Table parse failed, degrading to raw text: {}", e);
            Some(TableText::Raw(input.to_string()))
        }
    }
}

/// Strict tab-delimited parse: first line is the header, every row must
/// match the header's column count.
fn parse_table(input: &str) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(false)
        .has_headers(true)
        .from_reader(input.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table { headers, rows })
}

/// Flattened rendering embedded into the outbound request: fixed-width
/// columns, two-space gutters, no index column. Raw text passes through
/// unchanged.
pub fn render(text: &TableText) -> String {
    match text {
        TableText::Raw(s) => s.clone(),
        TableText::Structured(table) => render_fixed_width(table),
    }
}

fn render_fixed_width(table: &Table) -> String {
    let columns = table.column_count();
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate().take(columns) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let format_line = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:>width$}", cell, width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ")
    };

    let mut lines = vec![format_line(&table.headers)];
    for row in &table.rows {
        lines.push(format_line(row));
    }
    lines.join("\n")
}
