//! Core table types for representing parsed TSV data

use crate::error::{Error, Result};
use crate::parser;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;
use std::str::FromStr;

/// Byte range into the table's retained source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub(crate) fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    fn slice<'a>(&self, source: &'a str) -> &'a str {
        // Spans always sit on ASCII delimiters, which are char boundaries
        &source[self.start..self.end]
    }
}

/// Column boundaries of one parsed line
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Row {
    /// Whole line, tabs included
    line: Span,
    /// One span per column, never empty
    cells: Vec<Span>,
}

impl Row {
    pub(crate) fn new(line: Span, cells: Vec<Span>) -> Self {
        Self { line, cells }
    }
}

/// A parsed TSV table
///
/// The table owns one copy of the source text; every cell is a view into
/// it. Nothing can be changed after parsing, so a `&Table` can be shared
/// freely across threads. Dropping the table releases all rows and cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    source: String,
    rows: Vec<Row>,
}

impl Table {
    pub(crate) fn from_parts(source: String, rows: Vec<Row>) -> Self {
        Self { source, rows }
    }

    /// Parse TSV text, copying it into the table
    pub fn parse(source: &str) -> Result<Self> {
        parser::parse(source)
    }

    /// Parse TSV text, keeping `source` as the table's storage
    pub fn from_string(source: String) -> Result<Self> {
        parser::parse_owned(source)
    }

    /// The retained source text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns in a row, or `None` if the row doesn't exist
    pub fn column_count(&self, row: usize) -> Option<usize> {
        self.rows.get(row).map(|r| r.cells.len())
    }

    /// Widest row in the table (0 for a table with no rows)
    pub fn max_column_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }

    /// Whether rows differ in column count
    pub fn is_ragged(&self) -> bool {
        match self.rows.split_first() {
            Some((first, rest)) => rest.iter().any(|r| r.cells.len() != first.cells.len()),
            None => false,
        }
    }

    /// Get a cell by row and column index
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.cells.get(col))
            .map(|span| span.slice(&self.source))
    }

    /// Get a cell by `x` (column) and `y` (row), both 0-based
    pub fn get_cell(&self, x: usize, y: usize) -> Option<&str> {
        self.cell(y, x)
    }

    /// Find the first column in `row` whose text equals `name` exactly
    pub fn find_column(&self, row: usize, name: &str) -> Option<usize> {
        self.row(row).and_then(|r| r.find(name))
    }

    /// Get a cell of `row` by the column name found in row 0
    pub fn cell_by_name(&self, row: usize, name: &str) -> Option<&str> {
        let col = self.find_column(0, name)?;
        self.cell(row, col)
    }

    /// Raw text of a row's source line, tabs included
    pub fn line(&self, row: usize) -> Option<&str> {
        self.rows.get(row).map(|r| r.line.slice(&self.source))
    }

    /// Get a view of one row
    pub fn row(&self, index: usize) -> Option<RowRef<'_>> {
        self.rows.get(index).map(|row| RowRef {
            source: &self.source,
            row,
            index,
        })
    }

    /// Iterate over all rows in source order
    pub fn rows(&self) -> impl ExactSizeIterator<Item = RowRef<'_>> + '_ {
        self.rows.iter().enumerate().map(|(index, row)| RowRef {
            source: &self.source,
            row,
            index,
        })
    }

    /// Render every row as `| a | b |` lines, for diagnostics only
    pub fn dump(&self) -> String {
        self.to_string()
    }
}

impl FromStr for Table {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Table::parse(s)
    }
}

impl TryFrom<String> for Table {
    type Error = Error;

    fn try_from(source: String) -> Result<Self> {
        Table::from_string(source)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row.cells() {
                write!(f, "| {} ", cell)?;
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.row_count()))?;
        for row in self.rows() {
            seq.serialize_element(&row)?;
        }
        seq.end()
    }
}

/// A borrowed view of one row of a Table
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    source: &'a str,
    row: &'a Row,
    index: usize,
}

impl<'a> RowRef<'a> {
    /// Position of this row in the table
    pub fn index(&self) -> usize {
        self.index
    }

    /// Get the number of columns
    pub fn len(&self) -> usize {
        self.row.cells.len()
    }

    /// Always false for rows of a parsed table, which have at least one column
    pub fn is_empty(&self) -> bool {
        self.row.cells.is_empty()
    }

    /// Get a cell by column index
    pub fn get(&self, col: usize) -> Option<&'a str> {
        let (source, row) = (self.source, self.row);
        row.cells.get(col).map(|span| span.slice(source))
    }

    /// Iterate over cells left to right
    pub fn cells(&self) -> impl ExactSizeIterator<Item = &'a str> + 'a {
        let (source, row) = (self.source, self.row);
        row.cells.iter().map(move |span| span.slice(source))
    }

    /// Index of the first cell equal to `name` (case-sensitive, untrimmed)
    pub fn find(&self, name: &str) -> Option<usize> {
        self.cells().position(|cell| cell == name)
    }

    /// Raw text of the source line
    pub fn line(&self) -> &'a str {
        self.row.line.slice(self.source)
    }
}

impl Serialize for RowRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for cell in self.cells() {
            seq.serialize_element(cell)?;
        }
        seq.end()
    }
}
