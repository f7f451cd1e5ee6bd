use serde::{Deserialize, Serialize};

use crate::{BatchCode, SubjectCode};

/// Canonical name given to the identifier column once a roster is normalized.
pub const IDENTIFIER_COLUMN: &str = "roll_no";

/// A student as listed on a roster row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Registration / roll number, unique within a roster.
    pub roll_no: String,
    pub name: String,
    /// Free-text group label.
    pub division: String,
}

impl Student {
    pub fn new(
        roll_no: impl Into<String>,
        name: impl Into<String>,
        division: impl Into<String>,
    ) -> Self {
        Self {
            roll_no: roll_no.into(),
            name: name.into(),
            division: division.into(),
        }
    }
}

/// A student's enrollment in one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub student: Student,
    pub subject: SubjectCode,
    pub batch: Option<BatchCode>,
}

impl Enrollment {
    pub fn new(student: Student, subject: SubjectCode) -> Self {
        Self {
            student,
            subject,
            batch: None,
        }
    }
}
