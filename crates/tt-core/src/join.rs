//! Schedule joining: enrollments merged with timetable slots into a
//! long-format table of (student, session, day, time) rows.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info, warn};

use tt_model::{
    BatchCode, DirectSlot, Enrollment, GridTimetable, ScheduleMode, SubjectCode, Weekday,
    normalize_batch_token,
};

/// One enrollment left-joined to one direct-mode slot.
///
/// `slot` is `None` when the subject has no timetable entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectRow {
    pub roll_no: String,
    pub student_name: String,
    pub subject: SubjectCode,
    pub slot: Option<DirectSlot>,
}

impl DirectRow {
    pub fn is_scheduled(&self) -> bool {
        self.slot.is_some()
    }
}

/// One student attending one active batch in one grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    pub roll_no: String,
    pub student_name: String,
    pub batch: BatchCode,
    pub day: Weekday,
    /// The class-time label of the timetable row.
    pub time_slot: String,
}

/// Joined schedule in the shape of its timetable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinedSchedule {
    Direct(Vec<DirectRow>),
    Grid(Vec<GridRow>),
}

impl JoinedSchedule {
    pub fn mode(&self) -> ScheduleMode {
        match self {
            JoinedSchedule::Direct(_) => ScheduleMode::Direct,
            JoinedSchedule::Grid(_) => ScheduleMode::Grid,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            JoinedSchedule::Direct(rows) => rows.len(),
            JoinedSchedule::Grid(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Direct rows without a timetable entry. Always zero for grids.
    pub fn unscheduled(&self) -> usize {
        match self {
            JoinedSchedule::Direct(rows) => rows.iter().filter(|row| !row.is_scheduled()).count(),
            JoinedSchedule::Grid(_) => 0,
        }
    }
}

/// Left-joins enrollments to direct-mode slots on the subject code.
///
/// Rows follow enrollment order; a subject taught in several slots yields
/// one row per slot, in timetable order.
pub fn join_direct(enrollments: &[Enrollment], slots: &[DirectSlot]) -> JoinedSchedule {
    let mut by_subject: BTreeMap<&SubjectCode, Vec<&DirectSlot>> = BTreeMap::new();
    for slot in slots {
        by_subject.entry(&slot.subject).or_default().push(slot);
    }

    let mut rows = Vec::with_capacity(enrollments.len());
    for enrollment in enrollments {
        let row = |slot: Option<DirectSlot>| DirectRow {
            roll_no: enrollment.student.roll_no.clone(),
            student_name: enrollment.student.name.clone(),
            subject: enrollment.subject.clone(),
            slot,
        };
        match by_subject.get(&enrollment.subject) {
            Some(matches) => rows.extend(matches.iter().map(|slot| row(Some((*slot).clone())))),
            None => rows.push(row(None)),
        }
    }

    let joined = JoinedSchedule::Direct(rows);
    info!(
        enrollments = enrollments.len(),
        slots = slots.len(),
        rows = joined.len(),
        unscheduled = joined.unscheduled(),
        "joined direct schedule"
    );
    joined
}

/// Expands grid cells into per-student rows using batch membership.
///
/// Each cell is split on `;`, tokens are normalized (whitespace removed,
/// upper-cased) and matched against the batches of `enrollments`. Tokens
/// naming no known batch are dropped. Enrollments without a batch are
/// ignored, so no batches at all yields an empty schedule.
pub fn join_grid(enrollments: &[Enrollment], grid: &GridTimetable) -> JoinedSchedule {
    let mut members: BTreeMap<String, (BatchCode, Vec<&Enrollment>)> = BTreeMap::new();
    for enrollment in enrollments {
        if let Some(batch) = &enrollment.batch {
            members
                .entry(batch.normalized())
                .or_insert_with(|| (batch.clone(), Vec::new()))
                .1
                .push(enrollment);
        }
    }
    if members.is_empty() {
        warn!(
            enrollments = enrollments.len(),
            "no batched students; grid schedule is empty"
        );
        return JoinedSchedule::Grid(Vec::new());
    }

    let mut rows = Vec::new();
    let mut unknown: BTreeSet<String> = BTreeSet::new();
    for timetable_row in &grid.rows {
        for (day_index, day) in grid.days.iter().enumerate() {
            for token in cell_tokens(timetable_row.cell(day_index)) {
                let Some((batch, students)) = members.get(&token) else {
                    unknown.insert(token);
                    continue;
                };
                rows.extend(students.iter().map(|enrollment| GridRow {
                    roll_no: enrollment.student.roll_no.clone(),
                    student_name: enrollment.student.name.clone(),
                    batch: batch.clone(),
                    day: *day,
                    time_slot: timetable_row.label.clone(),
                }));
            }
        }
    }

    if !unknown.is_empty() {
        debug!(
            count = unknown.len(),
            tokens = ?unknown,
            "dropped grid tokens naming no known batch"
        );
    }
    let joined = JoinedSchedule::Grid(rows);
    info!(
        batches = members.len(),
        rows = joined.len(),
        unknown_tokens = unknown.len(),
        "joined grid schedule"
    );
    joined
}

/// Normalized, de-duplicated batch tokens of a grid cell, in cell order.
pub fn cell_tokens(cell: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for token in cell.split(';').map(normalize_batch_token) {
        if !token.is_empty() && !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use tt_model::{GridRow as TimetableRow, Student};

    fn enrollment(roll_no: &str, subject: &str, batch: Option<&str>) -> Enrollment {
        Enrollment {
            student: Student::new(roll_no, "", ""),
            subject: SubjectCode::new(subject).unwrap(),
            batch: batch.map(|code| BatchCode::new(code).unwrap()),
        }
    }

    fn slot(subject: &str, day: &str, start: &str, end: &str) -> DirectSlot {
        DirectSlot {
            row: 0,
            subject: SubjectCode::new(subject).unwrap(),
            day: day.to_string(),
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    #[test]
    fn direct_join_keeps_unmatched_rows() {
        let joined = join_direct(
            &[enrollment("1", "EC301", None), enrollment("1", "EC399", None)],
            &[
                slot("EC301", "Monday", "09:00", "10:00"),
                slot("EC301", "Tuesday", "09:00", "10:00"),
            ],
        );
        assert_eq!(joined.len(), 3);
        assert_eq!(joined.unscheduled(), 1);
        let JoinedSchedule::Direct(rows) = joined else {
            panic!("expected direct rows");
        };
        assert!(rows[2].slot.is_none());
        assert_eq!(rows[1].slot.as_ref().map(|s| s.day.as_str()), Some("Tuesday"));
    }

    #[test]
    fn cell_tokens_normalize_and_dedupe() {
        assert_eq!(cell_tokens(" ec3011 ; EC3021;;ec3011"), vec!["EC3011", "EC3021"]);
        assert!(cell_tokens("").is_empty());
    }

    #[test]
    fn grid_join_drops_unknown_tokens() {
        let grid = GridTimetable {
            days: vec![Weekday::Monday, Weekday::Tuesday],
            rows: vec![TimetableRow {
                label: "09:00-11:00".to_string(),
                cells: vec!["EC3011; LAB9".to_string(), "ec3011".to_string()],
            }],
        };
        let joined = join_grid(
            &[
                enrollment("1", "EC301", Some("EC3011")),
                enrollment("2", "EC301", Some("EC3011")),
            ],
            &grid,
        );
        let JoinedSchedule::Grid(rows) = joined else {
            panic!("expected grid rows");
        };
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].day, Weekday::Monday);
        assert_eq!(rows[3].day, Weekday::Tuesday);
        assert_eq!(rows[3].roll_no, "2");
    }

    #[test]
    fn grid_join_without_batches_is_empty() {
        let grid = GridTimetable {
            days: vec![Weekday::Monday],
            rows: vec![TimetableRow {
                label: "09:00-11:00".to_string(),
                cells: vec!["EC3011".to_string()],
            }],
        };
        let joined = join_grid(&[enrollment("1", "EC301", None)], &grid);
        assert_eq!(joined.mode(), ScheduleMode::Grid);
        assert!(joined.is_empty());
        assert!(join_grid(&[], &grid).is_empty());
    }
}
