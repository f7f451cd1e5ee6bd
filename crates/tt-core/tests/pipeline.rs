//! End-to-end checks through the session pipeline.

use tt_core::{SessionContext, detect_conflicts, join_direct, run_check};
use tt_model::{
    ConflictKind, DirectSlot, Enrollment, GridRow, GridTimetable, MalformedTimePolicy,
    ProcessingOptions, ScheduleMode, Student, SubjectCode, Suggestion, Timetable, Weekday,
};

fn enrollment(roll_no: &str, name: &str, subject: &str) -> Enrollment {
    Enrollment::new(
        Student::new(roll_no, name, "A"),
        SubjectCode::new(subject).expect("subject"),
    )
}

fn slot(subject: &str, day: &str, start: &str, end: &str) -> DirectSlot {
    DirectSlot {
        row: 0,
        subject: SubjectCode::new(subject).expect("subject"),
        day: day.to_string(),
        start: start.to_string(),
        end: end.to_string(),
    }
}

#[test]
fn direct_overlap_with_no_alternative() {
    let timetable = Timetable::Direct(vec![
        slot("EC301", "Monday", "09:00", "10:00"),
        slot("EC302", "Monday", "09:30", "10:30"),
        slot("EC303", "Monday", "10:00", "11:00"),
    ]);
    let enrollments = vec![
        enrollment("101", "Asha", "EC301"),
        enrollment("101", "Asha", "EC302"),
        enrollment("101", "Asha", "EC303"),
        enrollment("101", "Asha", "EC999"),
    ];
    let mut context = SessionContext::new(ProcessingOptions::default()).expect("context");
    let outcome = run_check(&mut context, &timetable, &enrollments).expect("check");

    assert_eq!(outcome.mode, ScheduleMode::Direct);
    assert_eq!(outcome.unscheduled, 1);
    assert_eq!(outcome.detection.strategy, "interval-overlap");
    // 09:00-10:00 vs 09:30-10:30 and 09:30-10:30 vs 10:00-11:00.
    assert_eq!(outcome.detection.conflicts.len(), 2);
    let ConflictKind::Overlap { first, second } = &outcome.detection.conflicts[0].kind else {
        panic!("expected an overlap");
    };
    assert_eq!(first.label, "EC301");
    assert_eq!(second.label, "EC302");
    assert_eq!(second.time.to_string(), "09:30:00 - 10:30:00");

    assert!(outcome
        .resolutions
        .iter()
        .all(|r| r.suggestion == Suggestion::NoAlternative));
    assert!(context.batches().is_none());
}

#[test]
fn grid_shared_cell_reports_one_row() {
    let grid = GridTimetable {
        days: vec![Weekday::Monday, Weekday::Wednesday],
        rows: vec![
            GridRow {
                label: "09:00-11:00".to_string(),
                cells: vec!["EC3011; EC3021".to_string(), String::new()],
            },
            GridRow {
                label: "14:00-16:00".to_string(),
                cells: vec![String::new(), "EC3021;LAB".to_string()],
            },
        ],
    };
    let enrollments = vec![
        enrollment("X", "Asha", "EC301"),
        enrollment("X", "Asha", "EC302"),
        enrollment("Y", "Ravi", "EC302"),
    ];
    let mut context = SessionContext::new(ProcessingOptions::default()).expect("context");
    let outcome = run_check(&mut context, &Timetable::Grid(grid), &enrollments).expect("check");

    assert_eq!(outcome.mode, ScheduleMode::Grid);
    assert_eq!(outcome.detection.conflicts.len(), 1);
    let conflict = &outcome.detection.conflicts[0];
    assert_eq!(conflict.roll_no, "X");
    assert_eq!(conflict.batch_list().as_deref(), Some("EC3011, EC3021"));

    let suggestion = &outcome.resolutions[0].suggestion;
    assert_eq!(suggestion.day_label(), "Wednesday");
    assert_eq!(suggestion.time_label(), "14:00-16:00");

    assert_eq!(context.batches().map(|table| table.batch_count()), Some(2));
}

#[test]
fn empty_schedule_has_no_conflicts() {
    let joined = join_direct(&[], &[]);
    let detection = detect_conflicts(&joined, MalformedTimePolicy::Skip).expect("detect");
    assert!(detection.is_clean());
    assert!(detection.skipped.is_empty());
}

#[test]
fn grid_check_with_empty_roster_is_clean() {
    let grid = GridTimetable {
        days: vec![Weekday::Monday],
        rows: vec![GridRow {
            label: "09:00-11:00".to_string(),
            cells: vec!["EC3011".to_string()],
        }],
    };
    let mut context = SessionContext::new(ProcessingOptions::default()).expect("context");
    let outcome = run_check(&mut context, &Timetable::Grid(grid), &[]).expect("check");

    assert_eq!(outcome.mode, ScheduleMode::Grid);
    assert_eq!(outcome.joined_rows, 0);
    assert!(outcome.detection.is_clean());
    assert!(outcome.resolutions.is_empty());
    assert_eq!(context.batches().map(|table| table.is_empty()), Some(true));
}
