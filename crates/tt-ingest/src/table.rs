//! Normalized tables: a known header row, lower-case column names, and the
//! identifier column renamed to its canonical name.

use std::path::{Path, PathBuf};

use tracing::debug;

use tt_model::IDENTIFIER_COLUMN;

use crate::error::{IngestError, Result};
use crate::header::{detect_header_row, is_identifier_header, matches_alias, normalize_headers};
use crate::sheet::{RawSheet, SourceFormat, is_blank_row};

/// A sheet with its header resolved.
#[derive(Debug, Clone)]
pub struct NormalizedTable {
    pub source: PathBuf,
    /// Zero-based row index of the header in the original sheet.
    pub header_row: usize,
    pub columns: Vec<String>,
    /// Data rows, each padded or truncated to `columns.len()`.
    pub rows: Vec<Vec<String>>,
    /// 1-based sheet line of each data row, aligned with `rows`.
    pub lines: Vec<usize>,
}

impl NormalizedTable {
    /// Builds a table from raw rows using `header_row` as the header.
    ///
    /// Blank data rows are dropped.
    pub fn from_rows(source: &Path, rows: &[Vec<String>], header_row: usize) -> Self {
        let columns = rows
            .get(header_row)
            .map(|header| normalize_headers(header))
            .unwrap_or_default();
        let width = columns.len();
        let (lines, data) = rows
            .iter()
            .enumerate()
            .skip(header_row + 1)
            .filter(|(_, row)| !is_blank_row(row))
            .map(|(idx, row)| {
                let cells = (0..width)
                    .map(|col| row.get(col).cloned().unwrap_or_default())
                    .collect();
                (idx + 1, cells)
            })
            .unzip();
        Self {
            source: source.to_path_buf(),
            header_row,
            columns,
            rows: data,
            lines,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the column with exactly this (normalized) name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Finds a column by aliases: exact matches first, in alias order, then
    /// the first column containing any alias.
    pub fn find_column(&self, aliases: &[&str]) -> Option<usize> {
        aliases
            .iter()
            .find_map(|alias| self.column_index(alias))
            .or_else(|| {
                self.columns
                    .iter()
                    .position(|column| matches_alias(column, aliases))
            })
    }

    /// Like [`find_column`](Self::find_column) but fails with the discovered columns.
    pub fn require_column(&self, label: &str, aliases: &[&str]) -> Result<usize> {
        self.find_column(aliases)
            .ok_or_else(|| IngestError::MissingColumn {
                column: label.to_string(),
                path: self.source.clone(),
                columns: self.columns.clone(),
            })
    }

    /// Cell text at `(row, column)`, empty when out of range.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|values| values.get(column))
            .map_or("", String::as_str)
    }

    /// 1-based sheet line of data row `row`.
    pub fn line(&self, row: usize) -> usize {
        self.lines
            .get(row)
            .copied()
            .unwrap_or(self.header_row + row + 2)
    }

    /// Index of the canonical identifier column, if the table has one.
    pub fn identifier_index(&self) -> Option<usize> {
        self.column_index(IDENTIFIER_COLUMN)
    }
}

/// Resolves the header of a roster sheet and canonicalizes its identifier
/// column.
///
/// CSV files carry their header on the first non-blank line. Spreadsheets
/// are scanned for the first of `scan_rows` rows containing a roll-number
/// header.
pub fn normalize_roster_sheet(sheet: &RawSheet, scan_rows: usize) -> Result<NormalizedTable> {
    let header_row = match sheet.format {
        SourceFormat::Csv => sheet.rows.iter().position(|row| !is_blank_row(row)),
        SourceFormat::Spreadsheet => detect_header_row(&sheet.rows, scan_rows, is_identifier_header),
    }
    .ok_or_else(|| IngestError::HeaderNotFound {
        path: sheet.path.clone(),
        scanned: scan_rows.min(sheet.rows.len()),
    })?;

    let mut table = NormalizedTable::from_rows(&sheet.path, &sheet.rows, header_row);
    canonicalize_identifier(&mut table)?;
    debug!(
        path = %sheet.path.display(),
        header_row,
        columns = table.columns.len(),
        rows = table.len(),
        "normalized roster sheet"
    );
    Ok(table)
}

/// Renames the single roll-number column to [`IDENTIFIER_COLUMN`].
pub fn canonicalize_identifier(table: &mut NormalizedTable) -> Result<()> {
    let matches: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .filter(|(_, column)| column.as_str() == IDENTIFIER_COLUMN || is_identifier_header(column))
        .map(|(idx, _)| idx)
        .collect();
    match matches.as_slice() {
        [] => Err(IngestError::MissingIdentifier {
            path: table.source.clone(),
            columns: table.columns.clone(),
        }),
        [idx] => {
            table.columns[*idx] = IDENTIFIER_COLUMN.to_string();
            Ok(())
        }
        _ => Err(IngestError::AmbiguousIdentifier {
            path: table.source.clone(),
            matches: matches
                .iter()
                .map(|idx| table.columns[*idx].clone())
                .collect(),
        }),
    }
}
