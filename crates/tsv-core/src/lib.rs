//! tsv-core: Core library for parsing Tab-Separated-Value text
//!
//! This library provides functionality to:
//! - Parse TSV text (tab columns, `\n`/`\r` rows) into an immutable table
//! - Look up cells by coordinate and columns by name within a row
//! - Render a table for diagnostics or serialize it with serde
//!
//! Cells are opaque text. There is no quoting, escaping, trimming or type
//! coercion, and rows may have differing column counts.

pub mod error;
pub mod parser;
pub mod table;

pub use error::{Error, Result};
pub use parser::parse;
pub use table::{RowRef, Table};
