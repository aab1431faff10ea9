//! Text renderings of a dataset for the console

use crate::dataset::{COLUMNS, Dataset};
use crate::error::Result;
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

/// Shown for a missing camera
const NULL_TEXT: &str = "None";
/// Shown for a missing capture date
const NULL_DATE: &str = "NaT";

/// Aligned table with a row index, one line per record
pub fn render_table(dataset: &Dataset) -> String {
    let rows: Vec<[String; 4]> = dataset
        .iter()
        .enumerate()
        .map(|(i, r)| {
            [
                i.to_string(),
                r.photo.clone(),
                r.capture_date
                    .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_else(|| NULL_DATE.to_string()),
                r.camera.clone().unwrap_or_else(|| NULL_TEXT.to_string()),
            ]
        })
        .collect();

    let header = ["", COLUMNS[0], COLUMNS[1], COLUMNS[2]];
    let mut widths = header.map(|h| h.width());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.width());
        }
    }

    let mut out = String::new();
    if rows.is_empty() {
        let _ = writeln!(out, "Empty dataset\nColumns: [{}]", COLUMNS.join(", "));
        return out;
    }

    let header: Vec<String> = header.iter().map(|s| s.to_string()).collect();
    push_line(&mut out, &header, &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out
}

/// Index right-aligned, other cells left-aligned, two spaces between columns
fn push_line(out: &mut String, cells: &[String], widths: &[usize; 4]) {
    let mut line = String::new();
    for (n, (cell, width)) in cells.iter().zip(widths).enumerate() {
        let pad = " ".repeat(width - cell.width());
        if n == 0 {
            line.push_str(&pad);
            line.push_str(cell);
        } else {
            line.push_str("  ");
            line.push_str(cell);
            line.push_str(&pad);
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Shape and per-column non-null counts
pub fn render_info(dataset: &Dataset) -> String {
    let (rows, columns) = dataset.shape();
    let name_width = COLUMNS.iter().map(|c| c.len()).max().unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "rows: {rows}, columns: {columns}");
    for (column, count) in COLUMNS.iter().zip(dataset.non_null_counts()) {
        let _ = writeln!(out, "  {column:<name_width$}  {count} non-null");
    }
    out
}

/// Records as a pretty-printed JSON array
pub fn render_json(dataset: &Dataset) -> Result<String> {
    Ok(serde_json::to_string_pretty(dataset)?)
}
