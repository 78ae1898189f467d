// SkuFinder - ui/table.rs
//
// Plain-text list view of search results and the status line.
// Writes to any `Write` so the CLI can target stdout and tests a buffer.

use crate::app::state::{AppState, StatusKind};
use crate::core::model::{ResultRow, ResultTable};
use crate::util::constants;
use std::io::{self, Write};

const INDEX_HEADER: &str = "#";

/// Render the status line, prefixed by its kind.
pub fn render_status<W: Write>(out: &mut W, state: &AppState) -> io::Result<()> {
    let prefix = match state.status_kind {
        StatusKind::Info => "",
        StatusKind::Success => "OK: ",
        StatusKind::Warning => "WARN: ",
    };
    writeln!(out, "{prefix}{}", state.status_message)
}

/// Render the result list as an aligned text table.
///
/// The first column is the result index used to select a row.
pub fn render_results<W: Write>(out: &mut W, rows: &ResultTable) -> io::Result<()> {
    let cells: Vec<[String; 4]> = rows
        .indexed()
        .map(|(idx, row)| row_cells(idx, row))
        .collect();

    let header = [
        INDEX_HEADER.to_string(),
        constants::EXPORT_HEADERS[0].to_string(),
        constants::EXPORT_HEADERS[1].to_string(),
        constants::EXPORT_HEADERS[2].to_string(),
    ];

    let mut widths = header.clone().map(|h| h.chars().count());
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    write_line(out, &header, &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(out, "{}", rule.join("-+-"))?;
    for row in &cells {
        write_line(out, row, &widths)?;
    }
    Ok(())
}

/// Render every field of one result row.
pub fn render_detail<W: Write>(out: &mut W, index: usize, row: &ResultRow) -> io::Result<()> {
    writeln!(out, "Result #{index}")?;
    writeln!(
        out,
        "  {:<16} {}",
        constants::EXPORT_HEADERS[0],
        row.product_code.as_deref().unwrap_or("")
    )?;
    writeln!(
        out,
        "  {:<16} {}",
        constants::EXPORT_HEADERS[1],
        row.product_description.as_deref().unwrap_or("")
    )?;
    writeln!(
        out,
        "  {:<16} {}",
        constants::EXPORT_HEADERS[2],
        row.new_description_label()
    )
}

fn row_cells(idx: usize, row: &ResultRow) -> [String; 4] {
    [
        idx.to_string(),
        truncate(row.product_code.as_deref().unwrap_or("")),
        truncate(row.product_description.as_deref().unwrap_or("")),
        truncate(row.new_description_label()),
    ]
}

fn write_line<W: Write>(out: &mut W, cells: &[String; 4], widths: &[usize; 4]) -> io::Result<()> {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{cell:<w$}", w = *w))
        .collect();
    writeln!(out, "{}", padded.join(" | ").trim_end())
}

/// Shorten `value` to the display width limit, marking the cut with "...".
fn truncate(value: &str) -> String {
    let max = constants::MAX_DISPLAY_COLUMN_WIDTH;
    if value.chars().count() <= max {
        return value.to_string();
    }
    let kept: String = value.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
