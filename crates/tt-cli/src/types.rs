use std::path::PathBuf;

use tt_core::CheckOutcome;
use tt_model::{BatchTable, ProcessingOptions};

#[derive(Debug)]
pub struct BatchesResult {
    pub table: BatchTable,
    pub output: PathBuf,
    pub options: ProcessingOptions,
    /// Per-file failures; other files were still processed.
    pub errors: Vec<String>,
}

#[derive(Debug)]
pub struct CheckResult {
    pub timetable: PathBuf,
    pub outcome: CheckOutcome,
    pub batches: Option<BatchTable>,
    pub outputs: Vec<PathBuf>,
    pub errors: Vec<String>,
}

#[derive(Debug)]
pub struct RosterReport {
    pub path: PathBuf,
    /// 1-based row number of the header as shown in a spreadsheet.
    pub header_row: usize,
    pub columns: Vec<String>,
    pub rows: usize,
    pub subject: Option<String>,
    pub has_subject_column: bool,
}

#[derive(Debug)]
pub struct ScanEntry {
    pub path: PathBuf,
    pub subject: Option<String>,
}
