//! CSV ingest and column typing.
//!
//! This module turns an arbitrary CSV file with a header row into a small
//! in-memory table of string cells plus an inferred dtype per column. One
//! numeric column can then be extracted as the fitting [`Sample`].
//!
//! Design goals:
//! - **Lenient rows**: ragged rows are accepted (missing cells are empty),
//!   and problems are collected as [`RowError`]s instead of aborting
//! - **Predictable typing**: `int64` / `float64` / `object`, decided from the
//!   non-empty cells of each column
//! - **Separation of concerns**: no fitting logic here

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use serde::Serialize;

use crate::domain::Sample;
use crate::error::{AppError, FitError};

/// Inferred column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dtype {
    Int64,
    Float64,
    Object,
}

impl Dtype {
    pub fn is_numeric(self) -> bool {
        matches!(self, Dtype::Int64 | Dtype::Float64)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dtype::Int64 => "int64",
            Dtype::Float64 => "float64",
            Dtype::Object => "object",
        }
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column: header name, inferred dtype, and raw (trimmed) cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub dtype: Dtype,
    pub cells: Vec<String>,
}

impl Column {
    /// Parsed numeric values plus the number of empty cells skipped.
    ///
    /// `None` for `object` columns.
    pub fn numeric_values(&self) -> Option<(Vec<f64>, usize)> {
        if !self.dtype.is_numeric() {
            return None;
        }
        let mut values = Vec::with_capacity(self.cells.len());
        let mut missing = 0usize;
        for cell in &self.cells {
            if cell.is_empty() {
                missing += 1;
                continue;
            }
            values.push(cell.parse::<f64>().ok()?);
        }
        Some((values, missing))
    }
}

/// A row-level problem encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    /// 1-based line number in the file (the header is line 1).
    pub line: usize,
    pub message: String,
}

/// Parsed CSV file.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: usize,
    pub row_errors: Vec<RowError>,
}

/// A numeric sample extracted from one column.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleLoad {
    pub column: String,
    pub sample: Sample,
    /// Empty or non-finite cells left out of the sample.
    pub dropped: usize,
}

impl Table {
    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns.len())
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn numeric_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.dtype.is_numeric())
    }

    /// Find a column by exact name, falling back to a case-insensitive match.
    pub fn column(&self, name: &str) -> Option<&Column> {
        let name = normalize_header_name(name);
        self.columns
            .iter()
            .find(|c| c.name == name)
            .or_else(|| self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(&name)))
    }

    /// Extract `column` as a numeric sample.
    pub fn sample(&self, column: &str) -> Result<SampleLoad, FitError> {
        let Some(col) = self.column(column) else {
            return Err(FitError::MalformedSample(format!(
                "column '{column}' not found (available: {})",
                self.column_names().join(", ")
            )));
        };

        let Some((values, missing)) = col.numeric_values() else {
            return Err(FitError::MalformedSample(format!(
                "column '{}' is not numeric (dtype {})",
                col.name, col.dtype
            )));
        };

        let sample = Sample::with_missing(values, missing);
        Ok(SampleLoad {
            column: col.name.clone(),
            dropped: sample.dropped(),
            sample,
        })
    }
}

/// Load a CSV file from disk.
pub fn load_table(path: &Path) -> Result<Table, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    let table = read_table(file)?;

    tracing::debug!(
        path = %path.display(),
        rows = table.rows,
        columns = table.columns.len(),
        row_errors = table.row_errors.len(),
        "loaded table"
    );
    Ok(table)
}

/// Parse CSV from any reader (header row required).
pub fn read_table<R: Read>(reader: R) -> Result<Table, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let names = header_names(&headers);
    if names.is_empty() {
        return Err(AppError::new(2, "CSV has no header row."));
    }

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); names.len()];
    let mut row_errors = Vec::new();
    let mut rows = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header, which is line 1.
        let line = idx + 2;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };
        if record.iter().all(str::is_empty) {
            continue;
        }

        if record.len() != names.len() {
            row_errors.push(RowError {
                line,
                message: format!("expected {} fields, found {}", names.len(), record.len()),
            });
        }
        for (i, column) in cells.iter_mut().enumerate() {
            column.push(record.get(i).unwrap_or("").to_string());
        }
        rows += 1;
    }

    let columns = names
        .into_iter()
        .zip(cells)
        .map(|(name, cells)| Column {
            dtype: infer_dtype(&cells),
            name,
            cells,
        })
        .collect();

    Ok(Table {
        columns,
        rows,
        row_errors,
    })
}

fn header_names(headers: &StringRecord) -> Vec<String> {
    let names: Vec<String> = headers.iter().map(normalize_header_name).collect();
    if names.iter().all(String::is_empty) {
        return Vec::new();
    }
    names
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. Left in place, the column would never match by name.
    name.trim().trim_start_matches('\u{feff}').trim().to_string()
}

/// `int64` when every non-empty cell is an integer and none is missing,
/// `float64` when every non-empty cell is a number, `object` otherwise.
fn infer_dtype(cells: &[String]) -> Dtype {
    let mut any_missing = false;
    let mut all_int = true;
    for cell in cells {
        if cell.is_empty() {
            any_missing = true;
            continue;
        }
        if cell.parse::<i64>().is_ok() {
            continue;
        }
        all_int = false;
        if cell.parse::<f64>().is_err() {
            return Dtype::Object;
        }
    }
    if all_int && !any_missing && !cells.is_empty() {
        Dtype::Int64
    } else {
        Dtype::Float64
    }
}
