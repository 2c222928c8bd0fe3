//! In-memory tabular data shared by the crawler, the upload reader and the renderers

use crate::{OutputError, OutputResult};
use std::collections::{HashMap, HashSet};

/// A rectangular table: a header row plus data rows of the same width
///
/// Column names are unique; repeated names get a `.1`, `.2`, ... suffix.
/// Cells are plain text unless the table was built with
/// [`Table::with_inferred_types`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    typed: bool,
}

impl Table {
    /// Creates an empty table with the given column names
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: unique_column_names(columns.into_iter().map(Into::into)),
            rows: Vec::new(),
            typed: false,
        }
    }

    /// Lets typed formats (json, xlsx) write numeric columns as numbers
    pub fn with_inferred_types(mut self) -> Self {
        self.typed = true;
        self
    }

    /// Appends a data row
    ///
    /// # Errors
    ///
    /// `OutputError::InvalidInput` when the row width differs from the column count
    pub fn push_row(&mut self, row: Vec<String>) -> OutputResult<()> {
        if row.len() != self.columns.len() {
            return Err(OutputError::InvalidInput(format!(
                "row {} has {} cells, expected {}",
                self.rows.len() + 1,
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows (the header is not counted)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Type of every column, in column order
    ///
    /// All `Text` unless type inference was enabled. A column is numeric only
    /// when every non-blank cell in it converts without loss.
    pub fn column_types(&self) -> Vec<ColumnType> {
        (0..self.columns.len())
            .map(|index| {
                if self.typed {
                    ColumnType::infer(self.rows.iter().map(|row| row[index].as_str()))
                } else {
                    ColumnType::Text
                }
            })
            .collect()
    }
}

/// Makes repeated names unique: `a, a, a` becomes `a, a.1, a.2`
fn unique_column_names(names: impl Iterator<Item = String>) -> Vec<String> {
    let names: Vec<String> = names.collect();
    let mut taken: HashSet<String> = names.iter().cloned().collect();
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut unique = Vec::with_capacity(names.len());

    for name in names {
        let count = seen.entry(name.clone()).or_insert(0);
        if *count == 0 {
            *count = 1;
            unique.push(name);
            continue;
        }

        let mut candidate = format!("{}.{}", name, count);
        while taken.contains(&candidate) {
            *count += 1;
            candidate = format!("{}.{}", name, count);
        }
        *count += 1;
        taken.insert(candidate.clone());
        unique.push(candidate);
    }

    unique
}

/// How a column is written by typed formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Text,
}

impl ColumnType {
    /// Infers the narrowest lossless type for a column's cells
    ///
    /// Blank cells are ignored; a column of only blanks is text. Integers
    /// outside the `i64` range keep the column as text.
    pub fn infer<'a>(cells: impl IntoIterator<Item = &'a str>) -> Self {
        let mut column = None;

        for cell in cells {
            let cell = cell.trim();
            if cell.is_empty() {
                continue;
            }
            let kind = match classify(cell) {
                Some(kind) => kind,
                None => return Self::Text,
            };
            column = match (column, kind) {
                (None, kind) => Some(kind),
                (Some(Self::Integer), Self::Integer) => Some(Self::Integer),
                _ => Some(Self::Float),
            };
        }

        column.unwrap_or(Self::Text)
    }
}

/// Numeric kind of a single non-blank cell, or `None` for text
fn classify(cell: &str) -> Option<ColumnType> {
    let digits = cell.strip_prefix(['-', '+']).unwrap_or(cell);
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        return cell.parse::<i64>().ok().map(|_| ColumnType::Integer);
    }

    // Plain decimal notation only; "inf" and "NaN" stay text
    let numeric_chars = cell.chars().any(|c| c.is_ascii_digit())
        && cell
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'));
    if !numeric_chars {
        return None;
    }
    match cell.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(ColumnType::Float),
        _ => None,
    }
}

/// A cell value as typed formats should write it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    Integer(i64),
    Float(f64),
    Text(&'a str),
    /// Blank cell in a numeric column
    Empty,
}

impl<'a> CellValue<'a> {
    /// Reads a cell according to its column type
    pub fn read(cell: &'a str, column: ColumnType) -> Self {
        let trimmed = cell.trim();
        match column {
            ColumnType::Text => Self::Text(cell),
            _ if trimmed.is_empty() => Self::Empty,
            ColumnType::Integer => trimmed.parse().map(Self::Integer).unwrap_or(Self::Text(cell)),
            ColumnType::Float => trimmed.parse().map(Self::Float).unwrap_or(Self::Text(cell)),
        }
    }
}
