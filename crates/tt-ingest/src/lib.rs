//! Roster and timetable ingestion.
//!
//! This crate turns uploaded files into normalized tables the engine can
//! join on:
//!
//! - **Sheet reading**: CSV through `csv`, spreadsheets through `calamine`,
//!   with no header assumed
//! - **Header detection**: the first of the leading rows that names a
//!   roll-number column
//! - **Column normalization**: trimmed, lower-case names, with the single
//!   identifier column renamed to `roll_no`
//! - **Timetables**: direct (subject/day/start/end) or grid (class time ×
//!   weekday) layout detection
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use tt_ingest::{StudentColumns, load_roster};
//! use tt_model::ProcessingOptions;
//!
//! let options = ProcessingOptions::default();
//! let roster = load_roster(Path::new("uploads/EC301.xlsx"), &options)?;
//! let enrollments = roster.enrollments(StudentColumns::Required)?;
//! ```

mod discovery;
mod error;
mod header;
mod roster;
mod sheet;
mod table;
mod timetable;

// === Error Types ===
pub use error::{IngestError, Result};

// === Sheet Reading ===
pub use sheet::{RawSheet, SPREADSHEET_EXTENSIONS, SourceFormat, read_sheet, spreadsheet_cell_text};

// === Header Detection ===
pub use header::{
    IDENTIFIER_ALIASES, detect_header_row, header_key, is_identifier_header, normalize_header,
};
pub use table::{NormalizedTable, canonicalize_identifier, normalize_roster_sheet};

// === Rosters ===
pub use roster::{
    DIVISION_ALIASES, NAME_ALIASES, Roster, SUBJECT_ALIASES, StudentColumns, load_roster,
};

// === Timetables ===
pub use timetable::{load_timetable, timetable_from_sheet};

// === File Discovery ===
pub use discovery::{list_roster_files, subject_from_path};
