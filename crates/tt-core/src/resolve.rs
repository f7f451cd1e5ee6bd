//! Resolution suggestions.
//!
//! For every conflict the second listed session is moved: the timetable is
//! searched, in row order, for the same subject or batch on another day.
//! The first hit is suggested as is; it is not checked against the
//! student's other sessions.

use tracing::info;

use tt_model::{
    Conflict, Detection, DirectSlot, GridTimetable, Resolution, Suggestion, Timetable, Weekday,
    normalize_batch_token,
};

use crate::join::cell_tokens;

/// Pairs each detected conflict with a suggested slot.
pub fn suggest_resolutions(detection: &Detection, timetable: &Timetable) -> Vec<Resolution> {
    let resolutions: Vec<Resolution> = detection
        .conflicts
        .iter()
        .map(|conflict| Resolution {
            conflict: conflict.clone(),
            suggestion: suggest(conflict, timetable),
        })
        .collect();
    info!(
        conflicts = resolutions.len(),
        unresolved = resolutions
            .iter()
            .filter(|r| r.suggestion == Suggestion::NoAlternative)
            .count(),
        "suggested resolutions"
    );
    resolutions
}

/// Suggests a new slot for the conflict's second session.
pub fn suggest(conflict: &Conflict, timetable: &Timetable) -> Suggestion {
    let Some(moved) = conflict.moved_label() else {
        return Suggestion::NoAlternative;
    };
    let found = match timetable {
        Timetable::Direct(slots) => direct_alternative(slots, moved, conflict.day),
        Timetable::Grid(grid) => grid_alternative(grid, moved, conflict.day),
    };
    found.unwrap_or(Suggestion::NoAlternative)
}

fn direct_alternative(slots: &[DirectSlot], subject: &str, day: Weekday) -> Option<Suggestion> {
    slots.iter().find_map(|slot| {
        let slot_day = Weekday::parse(&slot.day)?;
        (slot.subject.as_str() == subject && slot_day != day).then(|| Suggestion::Alternative {
            day: slot_day.to_string(),
            time: slot.time_label(),
        })
    })
}

fn grid_alternative(grid: &GridTimetable, batch: &str, day: Weekday) -> Option<Suggestion> {
    let wanted = normalize_batch_token(batch);
    grid.rows.iter().find_map(|row| {
        grid.days
            .iter()
            .enumerate()
            .filter(|(_, column_day)| **column_day != day)
            .find(|(idx, _)| cell_tokens(row.cell(*idx)).contains(&wanted))
            .map(|(_, column_day)| Suggestion::Alternative {
                day: column_day.to_string(),
                time: row.label.clone(),
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tt_model::{BatchCode, ConflictKind, GridRow, Session, SubjectCode, TimeRange};

    fn overlap(first: &str, second: &str, day: Weekday) -> Conflict {
        let time = TimeRange::parse("09:00", "10:00").unwrap();
        Conflict {
            roll_no: "1".to_string(),
            student_name: None,
            day,
            kind: ConflictKind::Overlap {
                first: Session {
                    label: first.to_string(),
                    time,
                },
                second: Session {
                    label: second.to_string(),
                    time,
                },
            },
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
    fn moves_second_session_to_first_other_day() {
        let timetable = Timetable::Direct(vec![
            slot("EC302", "Monday", "09:30", "10:30"),
            slot("EC302", "Wednesday", "14:00", "15:00"),
            slot("EC302", "Thursday", "09:00", "10:00"),
        ]);
        let suggestion = suggest(&overlap("EC301", "EC302", Weekday::Monday), &timetable);
        assert_eq!(
            suggestion,
            Suggestion::Alternative {
                day: "Wednesday".to_string(),
                time: "14:00 - 15:00".to_string(),
            }
        );
    }

    #[test]
    fn no_alternative_marker() {
        let timetable = Timetable::Direct(vec![
            slot("EC301", "Tuesday", "09:00", "10:00"),
            slot("EC302", "Monday", "09:30", "10:30"),
        ]);
        let suggestion = suggest(&overlap("EC301", "EC302", Weekday::Monday), &timetable);
        assert_eq!(suggestion, Suggestion::NoAlternative);
        assert_eq!(suggestion.day_label(), "None");
        assert_eq!(suggestion.time_label(), "No alternative slot");
    }

    #[test]
    fn grid_alternative_uses_row_label() {
        let grid = GridTimetable {
            days: vec![Weekday::Monday, Weekday::Tuesday],
            rows: vec![
                GridRow {
                    label: "09:00-11:00".to_string(),
                    cells: vec!["A1;A2".to_string(), String::new()],
                },
                GridRow {
                    label: "11:15-13:15".to_string(),
                    cells: vec!["A2".to_string(), " a2 ".to_string()],
                },
            ],
        };
        let conflict = Conflict {
            roll_no: "X".to_string(),
            student_name: Some("Asha".to_string()),
            day: Weekday::Monday,
            kind: ConflictKind::SharedCell {
                time_slot: "09:00-11:00".to_string(),
                batches: vec![BatchCode::new("A1").unwrap(), BatchCode::new("A2").unwrap()],
            },
        };
        let suggestion = suggest(&conflict, &Timetable::Grid(grid));
        assert_eq!(suggestion.day_label(), "Tuesday");
        assert_eq!(suggestion.time_label(), "11:15-13:15");
    }
}
