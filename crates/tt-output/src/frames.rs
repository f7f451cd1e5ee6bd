//! Result tables as Polars frames with their export column names.

use anyhow::{Context, Result};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use tt_model::{BatchTable, Conflict, ConflictKind, Resolution, ScheduleMode};

pub const SUBJECT_CODE: &str = "Subject Code";
pub const BATCH_NO: &str = "Batch No";
pub const STUDENT_ROLL_NO: &str = "Student Roll No";
pub const DIVISION: &str = "Division";
pub const STUDENT_NAME: &str = "Student Name";
pub const SUBJECT_1: &str = "Subject 1";
pub const SUBJECT_2: &str = "Subject 2";
pub const DAY: &str = "Day";
pub const TIME_1: &str = "Time 1";
pub const TIME_2: &str = "Time 2";
pub const TIME_SLOT: &str = "Time Slot";
pub const CONFLICTING_BATCHES: &str = "Conflicting Batches";
pub const SUGGESTED_NEW_DAY: &str = "Suggested New Day";
pub const SUGGESTED_NEW_TIME: &str = "Suggested New Time";

pub const BATCH_COLUMNS: [&str; 5] = [SUBJECT_CODE, BATCH_NO, STUDENT_ROLL_NO, DIVISION, STUDENT_NAME];
pub const DIRECT_CONFLICT_COLUMNS: [&str; 6] =
    [STUDENT_ROLL_NO, SUBJECT_1, SUBJECT_2, DAY, TIME_1, TIME_2];
pub const GRID_CONFLICT_COLUMNS: [&str; 5] =
    [STUDENT_ROLL_NO, STUDENT_NAME, DAY, TIME_SLOT, CONFLICTING_BATCHES];

/// Column names of the conflict table for a schedule mode.
pub fn conflict_columns(mode: ScheduleMode) -> &'static [&'static str] {
    match mode {
        ScheduleMode::Direct => &DIRECT_CONFLICT_COLUMNS,
        ScheduleMode::Grid => &GRID_CONFLICT_COLUMNS,
    }
}

/// Builds a string frame from named columns of equal length.
fn string_frame(names: &[&str], columns: Vec<Vec<String>>) -> Result<DataFrame> {
    let cols: Vec<Column> = names
        .iter()
        .zip(columns)
        .map(|(name, values)| Series::new((*name).into(), values).into_column())
        .collect();
    DataFrame::new(cols).context("build result frame")
}

/// `{Subject Code, Batch No, Student Roll No, Division, Student Name}`.
pub fn batch_frame(table: &BatchTable) -> Result<DataFrame> {
    let mut columns = vec![Vec::with_capacity(table.len()); BATCH_COLUMNS.len()];
    for row in &table.rows {
        columns[0].push(row.subject.to_string());
        columns[1].push(row.batch.to_string());
        columns[2].push(row.student.roll_no.clone());
        columns[3].push(row.student.division.clone());
        columns[4].push(row.student.name.clone());
    }
    string_frame(&BATCH_COLUMNS, columns)
}

/// Cell values of one conflict in the column order of [`conflict_columns`].
///
/// A conflict of the other kind renders its identity and day only.
fn conflict_cells(conflict: &Conflict, mode: ScheduleMode) -> Vec<String> {
    let roll_no = conflict.roll_no.clone();
    let day = conflict.day.to_string();
    match (mode, &conflict.kind) {
        (ScheduleMode::Direct, ConflictKind::Overlap { first, second }) => vec![
            roll_no,
            first.label.clone(),
            second.label.clone(),
            day,
            first.time.to_string(),
            second.time.to_string(),
        ],
        (ScheduleMode::Grid, ConflictKind::SharedCell { time_slot, .. }) => vec![
            roll_no,
            conflict.student_name.clone().unwrap_or_default(),
            day,
            time_slot.clone(),
            conflict.batch_list().unwrap_or_default(),
        ],
        (ScheduleMode::Direct, ConflictKind::SharedCell { .. }) => {
            vec![roll_no, String::new(), String::new(), day, String::new(), String::new()]
        }
        (ScheduleMode::Grid, ConflictKind::Overlap { .. }) => vec![
            roll_no,
            conflict.student_name.clone().unwrap_or_default(),
            day,
            String::new(),
            String::new(),
        ],
    }
}

fn push_row(columns: &mut [Vec<String>], cells: Vec<String>) {
    for (column, cell) in columns.iter_mut().zip(cells) {
        column.push(cell);
    }
}

/// The conflict table for a schedule mode.
pub fn conflict_frame(conflicts: &[Conflict], mode: ScheduleMode) -> Result<DataFrame> {
    let names = conflict_columns(mode);
    let mut columns = vec![Vec::with_capacity(conflicts.len()); names.len()];
    for conflict in conflicts {
        push_row(&mut columns, conflict_cells(conflict, mode));
    }
    string_frame(names, columns)
}

/// The conflict table plus `{Suggested New Day, Suggested New Time}`.
pub fn resolution_frame(resolutions: &[Resolution], mode: ScheduleMode) -> Result<DataFrame> {
    let mut names: Vec<&str> = conflict_columns(mode).to_vec();
    names.extend([SUGGESTED_NEW_DAY, SUGGESTED_NEW_TIME]);
    let mut columns = vec![Vec::with_capacity(resolutions.len()); names.len()];
    for resolution in resolutions {
        let mut cells = conflict_cells(&resolution.conflict, mode);
        cells.push(resolution.suggestion.day_label().to_string());
        cells.push(resolution.suggestion.time_label().to_string());
        push_row(&mut columns, cells);
    }
    string_frame(&names, columns)
}
