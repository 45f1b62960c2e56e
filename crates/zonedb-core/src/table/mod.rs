//! Module: table
//! Responsibility: header-first delimited text input, column resolution by
//! name, and typed cell access with line-accurate errors.
//! Does not own: foreign-key resolution or any domain defaults.
//!
//! Invariants:
//! - The delimiter is chosen once per file from the header line.
//! - Column names match case-insensitively; file column order is free.
//! - An absent or empty cell is "missing", never an implicit zero.


use crate::error::ErrorClass;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::FromStr,
};
use thiserror::Error as ThisError;

///
/// TableError
///

#[derive(Debug, ThisError)]
pub enum TableError {
    #[error("{file}: cannot read input ({source})")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{file}: missing column '{column}'")]
    MissingColumn { file: String, column: String },

    #[error("{file}:{line}: column '{column}' has no value")]
    MissingValue {
        file: String,
        line: usize,
        column: String,
    },

    #[error("{file}:{line}: column '{column}' has invalid value '{value}'")]
    InvalidValue {
        file: String,
        line: usize,
        column: String,
        value: String,
    },
}

impl TableError {
    pub(crate) const fn class(&self) -> ErrorClass {
        match self {
            Self::Io { .. } => ErrorClass::Io,
            Self::MissingColumn { .. } => ErrorClass::MissingColumn,
            Self::MissingValue { .. } | Self::InvalidValue { .. } => ErrorClass::Parse,
        }
    }
}

///
/// Delimiter
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Delimiter {
    Tab,
    Comma,
    Whitespace,
}

impl Delimiter {
    /// Pick the delimiter a header line is written with.
    #[must_use]
    pub fn detect(header: &str) -> Self {
        if header.contains('\t') {
            Self::Tab
        } else if header.contains(',') {
            Self::Comma
        } else {
            Self::Whitespace
        }
    }

    fn split(self, line: &str) -> Vec<String> {
        match self {
            Self::Tab => line.split('\t').map(|c| c.trim().to_string()).collect(),
            Self::Comma => line.split(',').map(|c| c.trim().to_string()).collect(),
            Self::Whitespace => line.split_whitespace().map(str::to_string).collect(),
        }
    }
}

///
/// Column
///
/// A resolved column position plus its header name for diagnostics.
///

#[derive(Clone, Debug)]
pub struct Column {
    position: usize,
    name: String,
}

impl Column {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

///
/// Table
///

#[derive(Clone, Debug)]
pub struct Table {
    label: String,
    delimiter: Delimiter,
    headers: Vec<String>,
    rows: Vec<Row>,
}

#[derive(Clone, Debug)]
struct Row {
    line: usize,
    cells: Vec<String>,
}

impl Table {
    /// Open and fully read a table from disk.
    pub fn open(path: &Path) -> Result<Self, TableError> {
        let label = path.display().to_string();
        let file = File::open(path).map_err(|source| TableError::Io {
            file: label.clone(),
            source,
        })?;

        Self::from_reader(label, BufReader::new(file))
    }

    /// Read a table from any buffered source; `label` names it in errors.
    pub fn from_reader(label: impl Into<String>, reader: impl BufRead) -> Result<Self, TableError> {
        let label = label.into();
        let mut delimiter = Delimiter::Comma;
        let mut headers = None;
        let mut rows = Vec::new();

        for (number, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| TableError::Io {
                file: label.clone(),
                source,
            })?;
            let text = line.trim_start_matches('\u{feff}').trim_end();
            if text.trim().is_empty() {
                continue;
            }

            if headers.is_none() {
                delimiter = Delimiter::detect(text);
                headers = Some(delimiter.split(text));
                continue;
            }

            rows.push(Row {
                line: number + 1,
                cells: delimiter.split(text),
            });
        }

        Ok(Self {
            label,
            delimiter,
            headers: headers.unwrap_or_default(),
            rows,
        })
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub const fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows (header and blank lines excluded).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Resolve an optional column by name.
    #[must_use]
    pub fn try_column(&self, name: &str) -> Option<Column> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .map(|position| Column {
                position,
                name: self.headers[position].clone(),
            })
    }

    /// Resolve a column the caller cannot proceed without.
    pub fn column(&self, name: &str) -> Result<Column, TableError> {
        self.try_column(name)
            .ok_or_else(|| TableError::MissingColumn {
                file: self.label.clone(),
                column: name.to_string(),
            })
    }

    /// Iterate data rows in file order.
    pub fn rows(&self) -> impl Iterator<Item = RowRef<'_>> {
        self.rows.iter().map(|row| RowRef { table: self, row })
    }
}

///
/// RowRef
///

#[derive(Clone, Copy, Debug)]
pub struct RowRef<'a> {
    table: &'a Table,
    row: &'a Row,
}

impl<'a> RowRef<'a> {
    /// One-based line number in the source file.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.row.line
    }

    /// Raw cell text, or `None` when the cell is absent or empty.
    #[must_use]
    pub fn text(&self, column: &Column) -> Option<&'a str> {
        self.row
            .cells
            .get(column.position)
            .map(String::as_str)
            .filter(|cell| !cell.is_empty())
    }

    /// Parse a cell that may be missing.
    pub fn get<T>(&self, column: &Column) -> Result<Option<T>, TableError>
    where
        T: FromStr,
    {
        let Some(text) = self.text(column) else {
            return Ok(None);
        };

        text.parse()
            .map(Some)
            .map_err(|_| TableError::InvalidValue {
                file: self.table.label.clone(),
                line: self.row.line,
                column: column.name.clone(),
                value: text.to_string(),
            })
    }

    /// Parse a cell that must be present.
    pub fn require<T>(&self, column: &Column) -> Result<T, TableError>
    where
        T: FromStr,
    {
        self.get(column)?.ok_or_else(|| TableError::MissingValue {
            file: self.table.label.clone(),
            line: self.row.line,
            column: column.name.clone(),
        })
    }
}
