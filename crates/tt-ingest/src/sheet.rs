//! Raw sheet reading for CSV files and spreadsheets.
//!
//! Both formats are read without assuming a header row: every row, including
//! leading titles and blank lines, is kept so that detected header offsets
//! match the row numbers a user sees in the file.

use std::path::{Path, PathBuf};

use calamine::{Data, Reader, open_workbook_auto};
use csv::ReaderBuilder;
use tracing::debug;

use tt_common::{format_numeric, normalize_cell};

use crate::error::{IngestError, Result};

/// Extensions read through the spreadsheet backend.
pub const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Input container format, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Spreadsheet,
}

impl SourceFormat {
    /// Classifies a path by extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        if extension == "csv" {
            return Ok(SourceFormat::Csv);
        }
        if SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
            return Ok(SourceFormat::Spreadsheet);
        }
        Err(IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        })
    }

    pub fn is_supported(path: &Path) -> bool {
        Self::from_path(path).is_ok()
    }
}

/// Cell text of a sheet, row by row, with no header interpretation.
#[derive(Debug, Clone)]
pub struct RawSheet {
    pub path: PathBuf,
    pub format: SourceFormat,
    pub rows: Vec<Vec<String>>,
}

impl RawSheet {
    pub fn new(path: impl Into<PathBuf>, format: SourceFormat, rows: Vec<Vec<String>>) -> Self {
        Self {
            path: path.into(),
            format,
            rows,
        }
    }
}

/// True when every cell of the row is empty.
pub fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// Reads a CSV or spreadsheet file into a [`RawSheet`].
pub fn read_sheet(path: &Path) -> Result<RawSheet> {
    let format = SourceFormat::from_path(path)?;
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let rows = match format {
        SourceFormat::Csv => read_csv_rows(path)?,
        SourceFormat::Spreadsheet => read_spreadsheet_rows(path)?,
    };
    if rows.iter().all(|row| is_blank_row(row)) {
        return Err(IngestError::EmptySheet {
            path: path.to_path_buf(),
        });
    }
    debug!(path = %path.display(), rows = rows.len(), "read sheet");
    Ok(RawSheet::new(path, format, rows))
}

fn read_csv_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        rows.push(record.iter().map(normalize_cell).collect());
    }
    Ok(rows)
}

fn read_spreadsheet_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let spreadsheet_error = |message: String| IngestError::Spreadsheet {
        path: path.to_path_buf(),
        message,
    };
    let mut workbook = open_workbook_auto(path).map_err(|e| spreadsheet_error(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::EmptySheet {
            path: path.to_path_buf(),
        })?
        .map_err(|e| spreadsheet_error(e.to_string()))?;

    // The range starts at the first used cell; pad so row indices stay sheet-absolute.
    let (row_offset, col_offset) = range
        .start()
        .map_or((0, 0), |(row, col)| (row as usize, col as usize));
    let mut rows: Vec<Vec<String>> = vec![Vec::new(); row_offset];
    for cells in range.rows() {
        let mut row = vec![String::new(); col_offset];
        row.extend(cells.iter().map(spreadsheet_cell_text));
        rows.push(row);
    }
    Ok(rows)
}

/// Renders a spreadsheet cell the way it reads on screen.
///
/// Whole-number floats drop their `.0`; time-only values render as
/// `HH:MM:SS`.
pub fn spreadsheet_cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(value) | Data::DateTimeIso(value) | Data::DurationIso(value) => {
            normalize_cell(value)
        }
        Data::Int(value) => value.to_string(),
        Data::Float(value) => format_numeric(*value),
        Data::Bool(value) => value.to_string(),
        Data::DateTime(value) => {
            let serial = value.as_f64();
            match value.as_datetime() {
                Some(datetime) if (0.0..1.0).contains(&serial) => {
                    datetime.format("%H:%M:%S").to_string()
                }
                Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
                None => format_numeric(serial),
            }
        }
        Data::Error(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_extensions() {
        assert_eq!(
            SourceFormat::from_path(Path::new("roster.CSV")).unwrap(),
            SourceFormat::Csv
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("EC301.xlsx")).unwrap(),
            SourceFormat::Spreadsheet
        );
        let err = SourceFormat::from_path(Path::new("roster.pdf")).unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat { ref extension, .. } if extension == "pdf"));
        assert!(!SourceFormat::is_supported(Path::new("notes")));
    }

    #[test]
    fn spreadsheet_numbers_read_as_text() {
        assert_eq!(spreadsheet_cell_text(&Data::Float(1023.0)), "1023");
        assert_eq!(spreadsheet_cell_text(&Data::Int(7)), "7");
        assert_eq!(
            spreadsheet_cell_text(&Data::String("  EC3011 ".to_string())),
            "EC3011"
        );
        assert_eq!(spreadsheet_cell_text(&Data::Empty), "");
    }

    #[test]
    fn blank_rows() {
        assert!(is_blank_row(&["".to_string(), "  ".to_string()]));
        assert!(!is_blank_row(&["".to_string(), "x".to_string()]));
    }
}
