//! TSV Table CLI
//!
//! Command-line tool for inspecting, querying, and converting TSV tables.

mod error;
mod logging;

use clap::{Parser, Subcommand};
use error::{Error, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tsv_core::{RowRef, Table};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "tsv")]
#[command(about = "Tab-Separated-Value table tool", long_about = None)]
#[command(version)]
struct Cli {
    /// Show debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a TSV file and print a summary
    Parse {
        /// Path to TSV file ("-" for stdin)
        #[arg(short, long, default_value = "-")]
        file: PathBuf,

        /// Maximum number of rows to display
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Print every row with cells separated by |
    Dump {
        /// Path to TSV file ("-" for stdin)
        #[arg(short, long, default_value = "-")]
        file: PathBuf,
    },

    /// Print a single cell
    Cell {
        /// Path to TSV file ("-" for stdin)
        #[arg(short, long, default_value = "-")]
        file: PathBuf,

        /// Row index (0-based)
        #[arg(long)]
        row: usize,

        /// Column index (0-based)
        #[arg(long)]
        col: usize,
    },

    /// Print the index of the first column matching a name
    Find {
        /// Path to TSV file ("-" for stdin)
        #[arg(short, long, default_value = "-")]
        file: PathBuf,

        /// Column text to look for
        #[arg(short, long)]
        name: String,

        /// Row to search (0-based)
        #[arg(long, default_value_t = 0)]
        row: usize,
    },

    /// Show a table using row 0 as the header
    Show {
        /// Path to TSV file ("-" for stdin)
        #[arg(short, long, default_value = "-")]
        file: PathBuf,

        /// Columns to display (comma-separated header names)
        #[arg(short, long)]
        columns: Option<String>,

        /// Maximum number of data rows to display
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Export a table to CSV or JSON
    Export {
        /// Path to TSV file ("-" for stdin)
        #[arg(short, long, default_value = "-")]
        file: PathBuf,

        /// Output format (csv or json)
        #[arg(long, default_value = "csv")]
        format: String,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Scan directories for .tsv files and summarize each
    Scan {
        /// Root directories to scan
        #[arg(short, long, required = true)]
        root: Vec<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Parse { file, limit } => cmd_parse(&file, limit),
        Commands::Dump { file } => cmd_dump(&file),
        Commands::Cell { file, row, col } => cmd_cell(&file, row, col),
        Commands::Find { file, name, row } => cmd_find(&file, &name, row),
        Commands::Show {
            file,
            columns,
            limit,
        } => cmd_show(&file, columns.as_deref(), limit),
        Commands::Export {
            file,
            format,
            output,
        } => cmd_export(&file, &format, &output),
        Commands::Scan { root } => cmd_scan(&root),
    }
}

/// Human-readable name for an input path
fn source_name(path: &Path) -> String {
    if is_stdin(path) {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read the whole input into memory and parse it
fn load_table(path: &Path) -> Result<Table> {
    let text = if is_stdin(path) {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        text
    } else {
        fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?
    };

    debug!(source = %source_name(path), bytes = text.len(), "loaded input");

    Table::from_string(text).map_err(|e| Error::Parse {
        name: source_name(path),
        source: e,
    })
}

fn cmd_parse(file: &Path, limit: usize) -> Result<()> {
    let table = load_table(file)?;

    println!("File: {}", source_name(file));
    println!("Rows: {}", table.row_count());
    println!("Columns: {}", table.max_column_count());
    println!("Ragged: {}", if table.is_ragged() { "yes" } else { "no" });
    println!();

    for row in table.rows().take(limit) {
        let values: Vec<&str> = row.cells().collect();
        println!("{}", values.join("\t"));
    }

    if table.row_count() > limit {
        println!("... ({} more rows)", table.row_count() - limit);
    }

    Ok(())
}

fn cmd_dump(file: &Path) -> Result<()> {
    let table = load_table(file)?;
    print!("{}", table.dump());
    Ok(())
}

fn cmd_cell(file: &Path, row: usize, col: usize) -> Result<()> {
    let table = load_table(file)?;

    let value = table
        .cell(row, col)
        .ok_or(Error::CellOutOfRange { row, col })?;
    println!("{}", value);

    Ok(())
}

fn cmd_find(file: &Path, name: &str, row: usize) -> Result<()> {
    let table = load_table(file)?;

    let index = table
        .find_column(row, name)
        .ok_or_else(|| Error::ColumnNotFound {
            name: name.to_string(),
            row,
        })?;
    println!("{}", index);

    Ok(())
}

/// Resolve a comma-separated list of header names to (index, name) pairs.
/// With no filter every header column is selected.
fn select_columns<'a>(header: RowRef<'a>, filter: Option<&str>) -> Result<Vec<(usize, &'a str)>> {
    let Some(filter) = filter else {
        return Ok(header.cells().enumerate().collect());
    };

    filter
        .split(',')
        .map(|name| {
            header
                .find(name)
                .map(|index| (index, header.get(index).unwrap_or_default()))
                .ok_or_else(|| Error::ColumnNotFound {
                    name: name.to_string(),
                    row: header.index(),
                })
        })
        .collect()
}

fn cmd_show(file: &Path, columns: Option<&str>, limit: Option<usize>) -> Result<()> {
    let table = load_table(file)?;

    let Some(header) = table.row(0) else {
        println!("(no rows)");
        return Ok(());
    };

    let display_cols = select_columns(header, columns)?;

    // Print header
    let names: Vec<&str> = display_cols.iter().map(|(_, name)| *name).collect();
    println!("{}", names.join("\t"));
    println!("{}", "-".repeat(names.len() * 12));

    // Print data rows
    let data_rows = table.row_count() - 1;
    let row_limit = limit.unwrap_or(data_rows);
    for row in table.rows().skip(1).take(row_limit) {
        if row.len() != header.len() {
            warn!(
                "row {} has {} columns, header has {}",
                row.index(),
                row.len(),
                header.len()
            );
        }

        let values: Vec<&str> = display_cols
            .iter()
            .map(|(index, _)| row.get(*index).unwrap_or_default())
            .collect();
        println!("{}", values.join("\t"));
    }

    if data_rows > row_limit {
        println!("... ({} more rows)", data_rows - row_limit);
    }

    Ok(())
}

fn cmd_export(file: &Path, format: &str, output: &Path) -> Result<()> {
    let table = load_table(file)?;

    match format.to_lowercase().as_str() {
        "csv" => {
            // Rows keep their own widths
            let mut writer = csv::WriterBuilder::new()
                .flexible(true)
                .from_path(output)?;
            for row in table.rows() {
                writer.write_record(row.cells())?;
            }
            writer.flush()?;
        }
        "json" => {
            let mut writer = BufWriter::new(File::create(output)?);
            serde_json::to_writer_pretty(&mut writer, &table)?;
            writeln!(writer)?;
            writer.flush()?;
        }
        _ => return Err(Error::UnknownFormat(format.to_string())),
    }

    println!("Exported {} rows to {}", table.row_count(), output.display());

    Ok(())
}

fn is_tsv_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("tsv"))
}

/// Outcome of reading one file during a scan
#[derive(Debug, PartialEq)]
enum ScanStatus {
    Parsed { rows: usize, columns: usize },
    Empty,
    Unreadable(String),
}

/// Walk `roots` and summarize every .tsv file, sorted by name.
/// Problem files are reported in the result instead of stopping the walk.
fn scan_roots(roots: &[PathBuf]) -> Vec<(PathBuf, ScanStatus)> {
    let mut results = Vec::new();

    for root in roots {
        for entry in WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!("skipping entry: {}", err);
                    None
                }
            })
        {
            let path = entry.path();

            if !entry.file_type().is_file() || !is_tsv_file(path) {
                continue;
            }

            let status = match fs::read_to_string(path) {
                Ok(text) => match Table::from_string(text) {
                    Ok(table) => ScanStatus::Parsed {
                        rows: table.row_count(),
                        columns: table.max_column_count(),
                    },
                    Err(tsv_core::Error::EmptyInput) => ScanStatus::Empty,
                },
                Err(e) => {
                    warn!("cannot read {}: {}", path.display(), e);
                    ScanStatus::Unreadable(e.to_string())
                }
            };

            results.push((path.to_path_buf(), status));
        }
    }

    results
}

fn cmd_scan(roots: &[PathBuf]) -> Result<()> {
    let results = scan_roots(roots);

    for (path, status) in &results {
        match status {
            ScanStatus::Parsed { rows, columns } => {
                println!("{}\t{} rows\t{} columns", path.display(), rows, columns)
            }
            ScanStatus::Empty => println!("{}\t(empty)", path.display()),
            ScanStatus::Unreadable(err) => println!("{}\t(unreadable: {})", path.display(), err),
        }
    }

    println!();
    println!("Found {} TSV files in {} root(s)", results.len(), roots.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_all_columns() {
        let table = Table::parse("id\tname\tvalue\n1\tfoo\t10").unwrap();
        let cols = select_columns(table.row(0).unwrap(), None).unwrap();

        assert_eq!(cols, vec![(0, "id"), (1, "name"), (2, "value")]);
    }

    #[test]
    fn test_select_named_columns() {
        let table = Table::parse("id\tname\tvalue\n1\tfoo\t10").unwrap();
        let cols = select_columns(table.row(0).unwrap(), Some("value,id")).unwrap();

        assert_eq!(cols, vec![(2, "value"), (0, "id")]);
    }

    #[test]
    fn test_select_missing_column() {
        let table = Table::parse("id\tname").unwrap();
        let err = select_columns(table.row(0).unwrap(), Some("id,nope")).unwrap_err();

        assert!(matches!(err, Error::ColumnNotFound { ref name, row: 0 } if name == "nope"));
    }

    #[test]
    fn test_source_name() {
        assert_eq!(source_name(Path::new("-")), "<stdin>");
        assert_eq!(source_name(Path::new("data.tsv")), "data.tsv");
    }

    #[test]
    fn test_is_tsv_file() {
        assert!(is_tsv_file(Path::new("a/b.tsv")));
        assert!(is_tsv_file(Path::new("B.TSV")));
        assert!(!is_tsv_file(Path::new("b.csv")));
        assert!(!is_tsv_file(Path::new("tsv")));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_table(Path::new("/nonexistent/input.tsv")).unwrap_err();

        assert!(matches!(err, Error::FileRead { .. }));
    }

    #[test]
    fn test_scan_reports_every_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a_good.tsv"), "x\ty\n1\t2\n").unwrap();
        fs::write(dir.path().join("b_bad.tsv"), [0xff, 0xfe, b'\t', b'x']).unwrap();
        fs::write(dir.path().join("c_good.tsv"), "z").unwrap();
        fs::write(dir.path().join("d_empty.tsv"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let results = scan_roots(&[dir.path().to_path_buf()]);
        let names: Vec<_> = results
            .iter()
            .map(|(path, _)| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a_good.tsv", "b_bad.tsv", "c_good.tsv", "d_empty.tsv"]);
        assert_eq!(results[0].1, ScanStatus::Parsed { rows: 2, columns: 2 });
        assert!(matches!(results[1].1, ScanStatus::Unreadable(_)));
        assert_eq!(results[2].1, ScanStatus::Parsed { rows: 1, columns: 1 });
        assert_eq!(results[3].1, ScanStatus::Empty);
    }

    #[test]
    fn test_scan_missing_root() {
        let results = scan_roots(&[PathBuf::from("/nonexistent/scan/root")]);

        assert!(results.is_empty());
    }

    #[test]
    fn test_export_csv_ragged() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.tsv");
        let output = dir.path().join("out.csv");
        fs::write(&input, "a\tb\tc\n1\n2\t3\n").unwrap();

        cmd_export(&input, "csv", &output).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "a,b,c\n1\n2,3\n");
    }

    #[test]
    fn test_export_json() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.tsv");
        let output = dir.path().join("out.json");
        fs::write(&input, "name\tvalue\n\nx\t\n").unwrap();

        cmd_export(&input, "JSON", &output).unwrap();

        let rows: Vec<Vec<String>> =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(rows, vec![vec!["name", "value"], vec!["x", ""]]);
    }

    #[test]
    fn test_export_unknown_format() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.tsv");
        fs::write(&input, "a").unwrap();

        let err = cmd_export(&input, "xml", &dir.path().join("out.xml")).unwrap_err();

        assert!(matches!(err, Error::UnknownFormat(ref f) if f == "xml"));
    }
}
