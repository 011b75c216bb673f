//! Pipe table detection and parsing
//!
//! Tables are recognized by a line containing `|` followed by a separator
//! row (`|---|:--:|`). Parsing is deliberately lenient: rows are split on
//! pipes without validating the column count against the header.

use crate::block::TableRow;
use regex::Regex;
use std::sync::LazyLock;

/// A separator row is made only of pipes, dashes, colons and whitespace.
static SEPARATOR_ROW_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\s|:-]+$").unwrap());

/// Check whether a line looks like a table header separator row.
///
/// Note that a whitespace-only line also qualifies.
pub fn is_separator_row(line: &str) -> bool {
    SEPARATOR_ROW_REGEX.is_match(line)
}

/// Find where a table starting at `start` ends.
///
/// Returns the exclusive end index of the table lines, or `None` if no table
/// starts here. The header and the separator are always consumed; after that
/// every line containing a pipe is taken until the first one without.
pub fn table_extent(lines: &[&str], start: usize) -> Option<usize> {
    if !lines.get(start)?.contains('|') {
        return None;
    }
    if !is_separator_row(lines.get(start + 1)?) {
        return None;
    }

    let mut end = start + 2;
    while end < lines.len() && lines[end].contains('|') {
        end += 1;
    }
    Some(end)
}

/// Split a table line into trimmed cells.
///
/// One leading and one trailing empty cell (produced by bounding pipes) are
/// dropped. Inner empty cells are kept.
pub fn split_row(line: &str) -> TableRow<'_> {
    let mut cells: Vec<&str> = line.trim().split('|').map(str::trim).collect();
    if cells.first().is_some_and(|c| c.is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    cells
}

/// Parse the lines of a table block into rows, removing the separator row.
pub fn parse_table<'a>(block_lines: &[&'a str]) -> Vec<TableRow<'a>> {
    let mut rows: Vec<TableRow<'a>> = block_lines.iter().copied().map(split_row).collect();

    // The extent check already saw a separator here; re-check before dropping
    // so that callers passing arbitrary lines never lose a data row.
    if rows.len() >= 2 && is_separator_row(block_lines[1]) {
        rows.remove(1);
    }
    rows
}
