// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Column-aligned tables for terminal output.

use crate::color;

/// Narrowest the last column is ever padded to.
const MIN_LAST_COLUMN: usize = 32;
const SEPARATOR: &str = " | ";

pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<&'static str>) -> Self {
        Self { headers, rows: Vec::new() }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    /// Render with every column padded to its widest cell. The last column
    /// takes the remaining terminal `width` (at least 32 characters).
    pub fn render(&self, width: usize) -> String {
        let Some(last) = self.headers.len().checked_sub(1) else {
            return String::new();
        };
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }
        let leading: usize =
            widths[..last].iter().sum::<usize>() + SEPARATOR.len() * last.saturating_sub(1);
        widths[last] = width.saturating_sub(SEPARATOR.len() + leading).max(MIN_LAST_COLUMN);

        let header = format_row(self.headers.iter().copied(), &widths);
        let rule = "=".repeat(header.chars().count());
        let mut out = format!("{}\n{}\n", color::header(&header), color::muted(&rule));
        for row in &self.rows {
            out.push_str(&format_row(row.iter().map(String::as_str), &widths));
            out.push('\n');
        }
        out
    }
}

fn format_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Shorten `s` to `max` characters, ending in `...` when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
