//! Delimited team tables
//!
//! One export file becomes a [`SeasonTable`]: the header row kept aside and
//! every following line as a [`RawRow`] of string fields. Columns are
//! positional; see [`crate::data::schema`] for the names of the ones we use.

use crate::{HoopsError, Result};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Column holding the team name in every export
pub const NAME_COLUMN: usize = 1;

/// Decorator basketball-reference appends to playoff teams
pub const NAME_MARKER: char = '*';

/// One data line of a table
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 1-based line number in the source file
    pub line: usize,
    pub fields: Vec<String>,
}

impl RawRow {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, column: usize) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

/// A parsed export with its header removed from the rows
#[derive(Debug, Clone)]
pub struct SeasonTable {
    path: PathBuf,
    headers: Vec<String>,
    rows: Vec<RawRow>,
}

impl SeasonTable {
    pub fn new(path: impl Into<PathBuf>, headers: Vec<String>, rows: Vec<RawRow>) -> Self {
        SeasonTable {
            path: path.into(),
            headers,
            rows,
        }
    }

    /// Parse comma-separated text. `path` is only used in error messages.
    pub fn from_reader<R: Read>(path: &Path, reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(rows.len() + 2);
            rows.push(RawRow {
                line,
                fields: record.iter().map(String::from).collect(),
            });
        }

        Ok(SeasonTable::new(path, headers, rows))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn header(&self, column: usize) -> Option<&str> {
        self.headers.get(column).map(String::as_str)
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Field at `column`, or a format error naming the offending line
    pub fn field<'a>(&self, row: &'a RawRow, column: usize) -> Result<&'a str> {
        row.get(column).ok_or_else(|| HoopsError::Format {
            path: self.path.clone(),
            line: row.line,
            column,
            width: row.len(),
        })
    }

    /// Field at `column` parsed as a float
    pub fn number(&self, row: &RawRow, column: usize) -> Result<f64> {
        let value = self.field(row, column)?;
        value.parse::<f64>().map_err(|_| HoopsError::Parse {
            path: self.path.clone(),
            line: row.line,
            column,
            value: value.to_string(),
        })
    }

    pub fn team_name<'a>(&self, row: &'a RawRow) -> Result<&'a str> {
        self.field(row, NAME_COLUMN)
    }

    /// Strip [`NAME_MARKER`] from every team name so the per-game and
    /// advanced exports agree on names.
    pub fn normalize_names(&mut self) {
        for row in &mut self.rows {
            if let Some(name) = row.fields.get_mut(NAME_COLUMN) {
                if name.contains(NAME_MARKER) {
                    *name = remove_markers(name, NAME_MARKER);
                }
            }
        }
    }
}

/// Remove every `marker` from `name`, keeping everything else in order
pub fn remove_markers(name: &str, marker: char) -> String {
    name.chars().filter(|&c| c != marker).collect()
}

/// Read an export from disk. The file is closed before this returns.
pub fn read_table(path: &Path) -> Result<SeasonTable> {
    let file = File::open(path).map_err(|source| HoopsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let table = SeasonTable::from_reader(path, file)?;
    log::debug!("Read {} rows from {}", table.len(), path.display());
    Ok(table)
}
