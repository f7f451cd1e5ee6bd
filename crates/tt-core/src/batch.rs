//! Batch formation.
//!
//! Each subject's students are cut into consecutive chunks of at most
//! `batch_size`, in roster order. Student `i` (0-based) of a subject lands in
//! batch `i / batch_size + 1`.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use tt_model::{
    BatchAssignment, BatchCode, BatchTable, Enrollment, ProcessingOptions, Student, SubjectCode,
};

use crate::error::Result;

/// Assigns batches for a single subject's ordered student list.
pub fn assign_subject_batches(
    subject: &SubjectCode,
    students: &[Student],
    options: &ProcessingOptions,
) -> Result<BatchTable> {
    options.validate()?;
    let mut table = BatchTable::new();
    for (index, student) in students.iter().enumerate() {
        let sequence = index / options.batch_size + 1;
        let batch = BatchCode::new(options.batch_code_style.format(subject, sequence))?;
        table.rows.push(BatchAssignment {
            subject: subject.clone(),
            batch,
            sequence,
            student: student.clone(),
        });
    }
    debug!(
        subject = %subject,
        students = students.len(),
        batches = table.batch_count(),
        "assigned subject batches"
    );
    Ok(table)
}

/// Assigns batches across all subjects.
///
/// Enrollments are grouped by subject; subjects are emitted in ascending
/// code order and students keep their enrollment order. An empty input
/// yields an empty table.
pub fn assign_batches(enrollments: &[Enrollment], options: &ProcessingOptions) -> Result<BatchTable> {
    options.validate()?;
    let mut by_subject: BTreeMap<&SubjectCode, Vec<Student>> = BTreeMap::new();
    for enrollment in enrollments {
        by_subject
            .entry(&enrollment.subject)
            .or_default()
            .push(enrollment.student.clone());
    }

    let mut table = BatchTable::new();
    for (subject, students) in &by_subject {
        table.extend(assign_subject_batches(subject, students, options)?);
    }
    for (code, subjects) in colliding_batch_codes(&table) {
        warn!(
            batch = %code,
            subjects = ?subjects,
            "subjects share a batch code; their batches merge in grid matching"
        );
    }
    info!(
        subjects = by_subject.len(),
        students = table.len(),
        batches = table.batch_count(),
        batch_size = options.batch_size,
        "formed batches"
    );
    Ok(table)
}

/// Normalized batch codes produced by more than one subject, with those
/// subjects in table order.
pub fn colliding_batch_codes(table: &BatchTable) -> BTreeMap<String, Vec<&SubjectCode>> {
    let mut owners: BTreeMap<String, Vec<&SubjectCode>> = BTreeMap::new();
    for row in &table.rows {
        let subjects = owners.entry(row.batch.normalized()).or_default();
        if !subjects.contains(&&row.subject) {
            subjects.push(&row.subject);
        }
    }
    owners.retain(|_, subjects| subjects.len() > 1);
    owners
}

/// Enrollments annotated with their assigned batch, in table order.
pub fn batched_enrollments(table: &BatchTable) -> Vec<Enrollment> {
    table
        .rows
        .iter()
        .map(|row| Enrollment {
            student: row.student.clone(),
            subject: row.subject.clone(),
            batch: Some(row.batch.clone()),
        })
        .collect()
}
