//! TSV parser
//!
//! Rows are separated by any run of `\n` and `\r` bytes, so blank lines never
//! produce a row. Columns are separated by single `\t` bytes. A line made only
//! of tabs is still a row (of empty columns).

use crate::error::{Error, Result};
use crate::table::{Row, Span, Table};
use tracing::debug;

/// Parse TSV text into a Table, copying the input
pub fn parse(source: &str) -> Result<Table> {
    parse_owned(source.to_owned())
}

/// Parse TSV text into a Table, retaining `source` as the cell storage
pub fn parse_owned(source: String) -> Result<Table> {
    if source.is_empty() {
        debug!("refusing to parse empty TSV input");
        return Err(Error::EmptyInput);
    }

    let rows = split_rows(source.as_bytes());

    debug!(
        rows = rows.len(),
        bytes = source.len(),
        "parsed TSV table"
    );

    Ok(Table::from_parts(source, rows))
}

fn is_line_break(b: u8) -> bool {
    b == b'\n' || b == b'\r'
}

/// Segment the buffer into non-blank lines, then split each on tabs
fn split_rows(bytes: &[u8]) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        // Skip blank lines, including any \r\n mixture
        if is_line_break(bytes[pos]) {
            pos += 1;
            continue;
        }

        let start = pos;
        while pos < bytes.len() && !is_line_break(bytes[pos]) {
            pos += 1;
        }

        rows.push(split_columns(bytes, Span::new(start, pos)));
    }

    rows
}

/// Split one line on tabs. N tabs always yield N + 1 columns.
fn split_columns(bytes: &[u8], line: Span) -> Row {
    let mut cells = Vec::new();
    let mut start = line.start;

    for (offset, &b) in bytes[line.start..line.end].iter().enumerate() {
        if b == b'\t' {
            let tab = line.start + offset;
            cells.push(Span::new(start, tab));
            start = tab + 1;
        }
    }

    // The last column runs up to the line break
    cells.push(Span::new(start, line.end));

    Row::new(line, cells)
}
