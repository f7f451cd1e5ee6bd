//! Property tests for batch formation and overlap detection.

use proptest::prelude::*;

use tt_core::{DirectRow, IntervalOverlap, ConflictStrategy, JoinedSchedule, assign_batches};
use tt_model::{
    DirectSlot, Enrollment, MalformedTimePolicy, ProcessingOptions, Student, SubjectCode,
};

fn enrollments(count: usize) -> Vec<Enrollment> {
    (0..count)
        .map(|i| {
            Enrollment::new(
                Student::new(format!("R{i:04}"), format!("Student {i}"), "A"),
                SubjectCode::new("EC301").expect("subject"),
            )
        })
        .collect()
}

fn session(subject: &str, day: &str, start: u32, end: u32) -> DirectRow {
    let clock = |minutes: u32| format!("{:02}:{:02}", minutes / 60, minutes % 60);
    DirectRow {
        roll_no: "R1".to_string(),
        student_name: String::new(),
        subject: SubjectCode::new(subject).expect("subject"),
        slot: Some(DirectSlot {
            row: 0,
            subject: SubjectCode::new(subject).expect("subject"),
            day: day.to_string(),
            start: clock(start),
            end: clock(end),
        }),
    }
}

proptest! {
    #[test]
    fn batches_partition_roster_in_order(count in 0usize..200, size in 1usize..40) {
        let options = ProcessingOptions::default().with_batch_size(size);
        let table = assign_batches(&enrollments(count), &options).expect("batches");

        prop_assert_eq!(table.len(), count);
        prop_assert_eq!(table.batch_count(), count.div_ceil(size));
        for members in table.batch_sizes().values() {
            prop_assert!(*members <= size);
        }
        for (index, row) in table.rows.iter().enumerate() {
            prop_assert_eq!(row.sequence, index / size + 1);
            prop_assert_eq!(&row.student.roll_no, &format!("R{index:04}"));
            prop_assert_eq!(row.batch.as_str(), format!("EC301{}", row.sequence));
        }
    }

    #[test]
    fn overlap_detection_is_symmetric(
        a_start in 0u32..1380, a_len in 1u32..60,
        b_start in 0u32..1380, b_len in 1u32..60,
    ) {
        let a = session("EC301", "Monday", a_start, a_start + a_len);
        let b = session("EC302", "Monday", b_start, b_start + b_len);
        let forward = IntervalOverlap
            .detect(&JoinedSchedule::Direct(vec![a.clone(), b.clone()]), MalformedTimePolicy::Fail)
            .expect("detect");
        let backward = IntervalOverlap
            .detect(&JoinedSchedule::Direct(vec![b, a]), MalformedTimePolicy::Fail)
            .expect("detect");

        let expected = a_start < b_start + b_len && b_start < a_start + a_len;
        prop_assert_eq!(forward.conflicts.len(), usize::from(expected));
        prop_assert_eq!(forward.conflicts.len(), backward.conflicts.len());
    }

    #[test]
    fn single_session_never_conflicts_with_itself(start in 0u32..1380, len in 1u32..60) {
        let detection = IntervalOverlap
            .detect(
                &JoinedSchedule::Direct(vec![session("EC301", "Friday", start, start + len)]),
                MalformedTimePolicy::Fail,
            )
            .expect("detect");
        prop_assert!(detection.is_clean());
    }
}
