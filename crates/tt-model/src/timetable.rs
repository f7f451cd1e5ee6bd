//! The two supported timetable shapes.

use serde::{Deserialize, Serialize};

use crate::{SubjectCode, Weekday};

/// One direct-mode row: a subject taught on a day between two times.
///
/// Day and times are kept as read; they are interpreted during detection so
/// that a bad value only affects its own row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectSlot {
    /// 1-based line of the slot in the timetable sheet.
    pub row: usize,
    pub subject: SubjectCode,
    pub day: String,
    pub start: String,
    pub end: String,
}

impl DirectSlot {
    pub fn time_label(&self) -> String {
        format!("{} - {}", self.start, self.end)
    }
}

/// One grid-mode row: a class-time label and one cell per day column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRow {
    pub label: String,
    /// Raw cell text, aligned with [`GridTimetable::days`].
    pub cells: Vec<String>,
}

impl GridRow {
    pub fn cell(&self, day_index: usize) -> &str {
        self.cells.get(day_index).map_or("", String::as_str)
    }
}

/// Grid-mode timetable: rows of class times, columns of weekdays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridTimetable {
    pub days: Vec<Weekday>,
    pub rows: Vec<GridRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleMode {
    Direct,
    Grid,
}

impl ScheduleMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ScheduleMode::Direct => "direct",
            ScheduleMode::Grid => "grid",
        }
    }
}

/// A loaded timetable in either shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "data", rename_all = "lowercase")]
pub enum Timetable {
    Direct(Vec<DirectSlot>),
    Grid(GridTimetable),
}

impl Timetable {
    pub fn mode(&self) -> ScheduleMode {
        match self {
            Timetable::Direct(_) => ScheduleMode::Direct,
            Timetable::Grid(_) => ScheduleMode::Grid,
        }
    }

    /// Number of timetable rows.
    pub fn len(&self) -> usize {
        match self {
            Timetable::Direct(slots) => slots.len(),
            Timetable::Grid(grid) => grid.rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
