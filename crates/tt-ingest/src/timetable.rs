//! Timetable loading and layout detection.
//!
//! A timetable is either *direct* (one row per subject, day, start and end
//! time) or a *grid* (a class-time column plus one column per weekday whose
//! cells list batch codes). The layout is decided from the header.

use std::path::Path;

use tracing::{info, warn};

use tt_model::{DirectSlot, GridRow, GridTimetable, ProcessingOptions, SubjectCode, Timetable, Weekday};

use crate::error::{IngestError, Result};
use crate::header::{detect_header_row, header_key};
use crate::sheet::{RawSheet, read_sheet};
use crate::table::NormalizedTable;

pub const SUBJECT_CODE_COLUMN: &str = "subject code";
pub const DAY_COLUMN: &str = "day";
pub const START_TIME_COLUMN: &str = "start time";
pub const END_TIME_COLUMN: &str = "end time";
pub const CLASS_TIME_COLUMN: &str = "class time";

fn is_timetable_marker(cell: &str) -> bool {
    let key = header_key(cell);
    key == SUBJECT_CODE_COLUMN || key == CLASS_TIME_COLUMN
}

/// Reads a timetable file and detects its layout.
pub fn load_timetable(path: &Path, options: &ProcessingOptions) -> Result<Timetable> {
    let sheet = read_sheet(path)?;
    let timetable = timetable_from_sheet(&sheet, options.header_scan_rows)?;
    info!(
        path = %path.display(),
        mode = timetable.mode().as_str(),
        rows = timetable.len(),
        "loaded timetable"
    );
    Ok(timetable)
}

/// Detects the header row and layout of a raw timetable sheet.
pub fn timetable_from_sheet(sheet: &RawSheet, scan_rows: usize) -> Result<Timetable> {
    let header_row =
        detect_header_row(&sheet.rows, scan_rows, is_timetable_marker).ok_or_else(|| {
            IngestError::HeaderNotFound {
                path: sheet.path.clone(),
                scanned: scan_rows.min(sheet.rows.len()),
            }
        })?;
    let table = NormalizedTable::from_rows(&sheet.path, &sheet.rows, header_row);

    if let Some(label_idx) = find_key(&table, CLASS_TIME_COLUMN) {
        return grid_timetable(&table, label_idx).map(Timetable::Grid);
    }
    direct_timetable(&table).map(Timetable::Direct)
}

fn find_key(table: &NormalizedTable, key: &str) -> Option<usize> {
    table.columns.iter().position(|column| header_key(column) == key)
}

fn unrecognized(table: &NormalizedTable) -> IngestError {
    IngestError::UnrecognizedTimetable {
        path: table.source.clone(),
        columns: table.columns.clone(),
    }
}

fn grid_timetable(table: &NormalizedTable, label_idx: usize) -> Result<GridTimetable> {
    let day_columns: Vec<(usize, Weekday)> = table
        .columns
        .iter()
        .enumerate()
        .filter_map(|(idx, column)| Weekday::parse(column).map(|day| (idx, day)))
        .collect();
    if day_columns.is_empty() {
        return Err(unrecognized(table));
    }

    let mut rows = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        let label = table.cell(row, label_idx);
        if label.is_empty() {
            warn!(
                path = %table.source.display(),
                row = table.line(row),
                "skipping timetable row without a class time"
            );
            continue;
        }
        rows.push(GridRow {
            label: label.to_string(),
            cells: day_columns
                .iter()
                .map(|(idx, _)| table.cell(row, *idx).to_string())
                .collect(),
        });
    }
    Ok(GridTimetable {
        days: day_columns.into_iter().map(|(_, day)| day).collect(),
        rows,
    })
}

fn direct_timetable(table: &NormalizedTable) -> Result<Vec<DirectSlot>> {
    let (Some(subject_idx), Some(day_idx), Some(start_idx), Some(end_idx)) = (
        find_key(table, SUBJECT_CODE_COLUMN),
        find_key(table, DAY_COLUMN),
        find_key(table, START_TIME_COLUMN),
        find_key(table, END_TIME_COLUMN),
    ) else {
        return Err(unrecognized(table));
    };

    let mut slots = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        let Ok(subject) = SubjectCode::new(table.cell(row, subject_idx)) else {
            warn!(
                path = %table.source.display(),
                row = table.line(row),
                "skipping timetable row without a subject code"
            );
            continue;
        };
        slots.push(DirectSlot {
            row: table.line(row),
            subject,
            day: table.cell(row, day_idx).to_string(),
            start: table.cell(row, start_idx).to_string(),
            end: table.cell(row, end_idx).to_string(),
        });
    }
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::SourceFormat;

    fn sheet(data: &[&[&str]]) -> RawSheet {
        let rows = data
            .iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect();
        RawSheet::new("timetable.xlsx", SourceFormat::Spreadsheet, rows)
    }

    #[test]
    fn detects_direct_layout() {
        let timetable = timetable_from_sheet(
            &sheet(&[
                &["Subject Code", "Day", "Start Time", "End Time"],
                &["EC301", "Monday", "09:00", "10:00"],
                &["", "Monday", "10:00", "11:00"],
            ]),
            15,
        )
        .unwrap();
        let Timetable::Direct(slots) = timetable else {
            panic!("expected direct layout");
        };
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].time_label(), "09:00 - 10:00");
    }

    #[test]
    fn direct_slots_keep_sheet_lines() {
        let timetable = timetable_from_sheet(
            &sheet(&[
                &["Odd semester", "", "", ""],
                &["Subject Code", "Day", "Start Time", "End Time"],
                &["EC301", "Monday", "09:00", "10:00"],
                &["", "", "", ""],
                &["EC302", "Tuesday", "9am", "10:00"],
            ]),
            15,
        )
        .unwrap();
        let Timetable::Direct(slots) = timetable else {
            panic!("expected direct layout");
        };
        let lines: Vec<usize> = slots.iter().map(|slot| slot.row).collect();
        assert_eq!(lines, vec![3, 5]);
    }

    #[test]
    fn detects_grid_layout_after_title() {
        let timetable = timetable_from_sheet(
            &sheet(&[
                &["SE ENTC practical timetable", "", ""],
                &["Class time", "Monday", "Tuesday"],
                &["9:00-11:00", "EC3011; EC3021", ""],
                &["", "EC3012", ""],
            ]),
            15,
        )
        .unwrap();
        let Timetable::Grid(grid) = timetable else {
            panic!("expected grid layout");
        };
        assert_eq!(grid.days, vec![Weekday::Monday, Weekday::Tuesday]);
        assert_eq!(grid.rows.len(), 1);
        assert_eq!(grid.rows[0].cell(0), "EC3011; EC3021");
    }

    #[test]
    fn grid_without_day_columns_is_rejected() {
        let err = timetable_from_sheet(&sheet(&[&["Class time", "Room"], &["9-10", "A1"]]), 15)
            .unwrap_err();
        assert!(matches!(err, IngestError::UnrecognizedTimetable { .. }));
    }

    #[test]
    fn direct_without_times_is_rejected() {
        let err = timetable_from_sheet(&sheet(&[&["Subject Code", "Day"], &["EC301", "Monday"]]), 15)
            .unwrap_err();
        assert_eq!(
            err.discovered_columns(),
            Some(&["subject code".to_string(), "day".to_string()][..])
        );
    }
}
