//! Batch assignments and the concatenated batch table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{BatchCode, Student, SubjectCode};

/// How a batch code is built from a subject code and a 1-based sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchCodeStyle {
    /// `EC301` + `1` → `EC3011`. Matches batch-grid timetables.
    ///
    /// Codes can collide across subjects: `EC301` + `11` and `EC3011` + `1`
    /// both give `EC30111`.
    #[default]
    Concatenated,
    /// `EC301` + `1` → `EC301_B1`.
    Separated,
}

impl BatchCodeStyle {
    pub fn format(self, subject: &SubjectCode, sequence: usize) -> String {
        match self {
            BatchCodeStyle::Concatenated => format!("{subject}{sequence}"),
            BatchCodeStyle::Separated => format!("{subject}_B{sequence}"),
        }
    }
}

/// One student placed in one batch of one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchAssignment {
    pub subject: SubjectCode,
    pub batch: BatchCode,
    /// 1-based batch number within the subject.
    pub sequence: usize,
    pub student: Student,
}

/// Batch assignments for every subject, concatenated.
///
/// Subjects appear in the order they were assigned; students keep their
/// roster order within a subject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchTable {
    pub rows: Vec<BatchAssignment>,
}

impl BatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn extend(&mut self, other: BatchTable) {
        self.rows.extend(other.rows);
    }

    /// Number of members per batch, keyed by batch code.
    pub fn batch_sizes(&self) -> BTreeMap<&BatchCode, usize> {
        let mut sizes = BTreeMap::new();
        for row in &self.rows {
            *sizes.entry(&row.batch).or_insert(0) += 1;
        }
        sizes
    }

    /// Number of distinct batches.
    pub fn batch_count(&self) -> usize {
        self.batch_sizes().len()
    }

    /// Members of each batch keyed by the normalized batch code, in roster order.
    pub fn members_by_batch(&self) -> BTreeMap<String, Vec<&Student>> {
        let mut members: BTreeMap<String, Vec<&Student>> = BTreeMap::new();
        for row in &self.rows {
            members
                .entry(row.batch.normalized())
                .or_default()
                .push(&row.student);
        }
        members
    }

    /// Per-subject summary: (student count, batch count).
    pub fn subject_summary(&self) -> BTreeMap<&SubjectCode, (usize, usize)> {
        let mut summary: BTreeMap<&SubjectCode, (usize, usize)> = BTreeMap::new();
        for row in &self.rows {
            let entry = summary.entry(&row.subject).or_insert((0, 0));
            entry.0 += 1;
            entry.1 = entry.1.max(row.sequence);
        }
        summary
    }
}
