use chrono::NaiveTime;
use proptest::prelude::*;

use tt_model::{
    BatchAssignment, BatchCode, BatchCodeStyle, BatchTable, Conflict, ConflictKind,
    MalformedTimePolicy, ProcessingOptions, Session, Student, SubjectCode, TimeRange, Weekday,
};

fn assignment(subject: &str, sequence: usize, roll_no: &str) -> BatchAssignment {
    let subject = SubjectCode::new(subject).unwrap();
    let batch = BatchCode::new(BatchCodeStyle::Concatenated.format(&subject, sequence)).unwrap();
    BatchAssignment {
        subject,
        batch,
        sequence,
        student: Student::new(roll_no, format!("Student {roll_no}"), "A"),
    }
}

#[test]
fn options_deserialize_with_defaults() {
    let options: ProcessingOptions =
        serde_json::from_str(r#"{"batch_size": 20, "batch_code_style": "separated"}"#)
            .expect("deserialize options");
    assert_eq!(options.batch_size, 20);
    assert_eq!(options.batch_code_style, BatchCodeStyle::Separated);
    assert_eq!(options.header_scan_rows, 15);
    assert_eq!(options.malformed_time, MalformedTimePolicy::Skip);
}

#[test]
fn batch_table_summaries() {
    let table = BatchTable {
        rows: vec![
            assignment("EC301", 1, "101"),
            assignment("EC301", 1, "102"),
            assignment("EC301", 2, "103"),
            assignment("EC302", 1, "101"),
        ],
    };
    assert_eq!(table.len(), 4);
    assert_eq!(table.batch_count(), 3);

    let summary = table.subject_summary();
    let ec301 = SubjectCode::new("EC301").unwrap();
    assert_eq!(summary.get(&ec301), Some(&(3, 2)));

    let members = table.members_by_batch();
    let first: Vec<&str> = members["EC3011"]
        .iter()
        .map(|s| s.roll_no.as_str())
        .collect();
    assert_eq!(first, vec!["101", "102"]);
}

#[test]
fn moved_label_is_second_session() {
    let time = TimeRange::parse("09:00", "10:00").unwrap();
    let overlap = Conflict {
        roll_no: "101".to_string(),
        student_name: None,
        day: Weekday::Monday,
        kind: ConflictKind::Overlap {
            first: Session {
                label: "EC301".to_string(),
                time,
            },
            second: Session {
                label: "EC302".to_string(),
                time,
            },
        },
    };
    assert_eq!(overlap.moved_label(), Some("EC302"));
    assert_eq!(overlap.batch_list(), None);

    let shared = Conflict {
        roll_no: "101".to_string(),
        student_name: Some("Asha".to_string()),
        day: Weekday::Tuesday,
        kind: ConflictKind::SharedCell {
            time_slot: "9-10".to_string(),
            batches: vec![BatchCode::new("A1").unwrap(), BatchCode::new("A2").unwrap()],
        },
    };
    assert_eq!(shared.moved_label(), Some("A2"));
    assert_eq!(shared.batch_list().as_deref(), Some("A1, A2"));
}

fn arb_range() -> impl Strategy<Value = TimeRange> {
    (0u32..24 * 60, 1u32..180).prop_map(|(start, length)| {
        let end = (start + length).min(24 * 60 - 1);
        let to_time = |minutes: u32| {
            NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).expect("valid time")
        };
        TimeRange::new(to_time(start), to_time(end))
    })
}

proptest! {
    #[test]
    fn overlap_is_symmetric(a in arb_range(), b in arb_range()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }
}
