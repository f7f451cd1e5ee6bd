//! Detected conflicts, skipped rows, and suggested resolutions.

use serde::{Deserialize, Serialize};

use crate::{BatchCode, TimeRange, Weekday};

/// Day shown when no alternative slot exists.
pub const NO_ALTERNATIVE_DAY: &str = "None";
/// Time shown when no alternative slot exists.
pub const NO_ALTERNATIVE_TIME: &str = "No alternative slot";

/// One side of an interval conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Subject code of the session.
    pub label: String,
    pub time: TimeRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConflictKind {
    /// Two same-day sessions whose intervals overlap.
    Overlap { first: Session, second: Session },
    /// Two or more active batches in one grid cell share the student.
    SharedCell {
        time_slot: String,
        batches: Vec<BatchCode>,
    },
}

/// A student required in two places at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub roll_no: String,
    pub student_name: Option<String>,
    pub day: Weekday,
    pub kind: ConflictKind,
}

impl Conflict {
    /// The subject or batch the resolution heuristic tries to move: the
    /// second listed session.
    pub fn moved_label(&self) -> Option<&str> {
        match &self.kind {
            ConflictKind::Overlap { second, .. } => Some(second.label.as_str()),
            ConflictKind::SharedCell { batches, .. } => batches.get(1).map(BatchCode::as_str),
        }
    }

    /// Comma-joined batch codes for grid conflicts.
    pub fn batch_list(&self) -> Option<String> {
        match &self.kind {
            ConflictKind::SharedCell { batches, .. } => Some(
                batches
                    .iter()
                    .map(BatchCode::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            ConflictKind::Overlap { .. } => None,
        }
    }
}

/// A joined row left out of detection, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// Timetable line the bad value came from.
    pub row: usize,
    pub roll_no: String,
    pub subject: String,
    pub reason: String,
}

/// Output of one conflict-detection run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    pub strategy: String,
    pub conflicts: Vec<Conflict>,
    pub skipped: Vec<SkippedRow>,
}

impl Detection {
    pub fn new(strategy: impl Into<String>) -> Self {
        Self {
            strategy: strategy.into(),
            ..Self::default()
        }
    }

    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Suggestion {
    Alternative { day: String, time: String },
    NoAlternative,
}

impl Suggestion {
    pub fn day_label(&self) -> &str {
        match self {
            Suggestion::Alternative { day, .. } => day,
            Suggestion::NoAlternative => NO_ALTERNATIVE_DAY,
        }
    }

    pub fn time_label(&self) -> &str {
        match self {
            Suggestion::Alternative { time, .. } => time,
            Suggestion::NoAlternative => NO_ALTERNATIVE_TIME,
        }
    }
}

/// A conflict paired with a suggested slot for its second session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub conflict: Conflict,
    pub suggestion: Suggestion,
}
