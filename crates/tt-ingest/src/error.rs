//! Error types for roster and timetable ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading and normalizing input files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Input-Format Errors ===
    /// File extension is neither CSV nor a spreadsheet.
    #[error("unsupported format '{extension}' for {path}: expected .csv, .xlsx, .xlsm, .xls or .ods")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// Failed to parse a CSV file.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed to open or read a spreadsheet.
    #[error("failed to read spreadsheet {path}: {message}")]
    Spreadsheet { path: PathBuf, message: String },

    /// The file (or its first worksheet) holds no cells.
    #[error("no data found in {path}")]
    EmptySheet { path: PathBuf },

    // === Schema Errors ===
    /// No header row within the scan window.
    #[error("header not found in {path}: no recognized header in the first {scanned} rows")]
    HeaderNotFound { path: PathBuf, scanned: usize },

    /// No column matches a roll-number header.
    #[error("missing identifier column in {path}; found columns: [{}]", .columns.join(", "))]
    MissingIdentifier { path: PathBuf, columns: Vec<String> },

    /// More than one column matches a roll-number header.
    #[error("ambiguous identifier column in {path}: [{}] all look like roll numbers", .matches.join(", "))]
    AmbiguousIdentifier { path: PathBuf, matches: Vec<String> },

    /// A column the operation needs is absent.
    #[error("required column '{column}' not found in {path}; found columns: [{}]", .columns.join(", "))]
    MissingColumn {
        column: String,
        path: PathBuf,
        columns: Vec<String>,
    },

    /// Timetable matches neither the direct nor the grid layout.
    #[error("unrecognized timetable layout in {path}; found columns: [{}]", .columns.join(", "))]
    UnrecognizedTimetable { path: PathBuf, columns: Vec<String> },
}

impl IngestError {
    /// Discovered column names, for schema errors that carry them.
    pub fn discovered_columns(&self) -> Option<&[String]> {
        match self {
            IngestError::MissingIdentifier { columns, .. }
            | IngestError::MissingColumn { columns, .. }
            | IngestError::UnrecognizedTimetable { columns, .. } => Some(columns),
            _ => None,
        }
    }

    /// True for header and column errors the user fixes by editing headers.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            IngestError::HeaderNotFound { .. }
                | IngestError::MissingIdentifier { .. }
                | IngestError::AmbiguousIdentifier { .. }
                | IngestError::MissingColumn { .. }
                | IngestError::UnrecognizedTimetable { .. }
        )
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
