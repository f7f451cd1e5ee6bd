//! Roster loading: normalized tables turned into students and enrollments.

use std::path::Path;

use tracing::{debug, info, warn};

use tt_model::{Enrollment, ProcessingOptions, Student, SubjectCode};

use crate::discovery::subject_from_path;
use crate::error::{IngestError, Result};
use crate::header::normalize_header;
use crate::sheet::read_sheet;
use crate::table::{NormalizedTable, normalize_roster_sheet};

/// Header aliases for the division column.
pub const DIVISION_ALIASES: [&str; 2] = ["division", "div"];
/// Header aliases for the student-name column.
pub const NAME_ALIASES: [&str; 2] = ["student name", "name"];
/// Header aliases for an explicit subject-code column.
pub const SUBJECT_ALIASES: [&str; 2] = ["subject code", "subject"];

/// A normalized roster plus the subject implied by its file name.
#[derive(Debug, Clone)]
pub struct Roster {
    pub table: NormalizedTable,
    pub file_subject: Option<SubjectCode>,
    /// Explicit subject column name, replacing the default aliases.
    pub subject_column: Option<String>,
}

/// Which student columns a caller needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentColumns {
    /// Division and student name must be present (batch formation).
    Required,
    /// Division and name are filled in when present.
    Optional,
}

impl Roster {
    pub fn new(table: NormalizedTable, file_subject: Option<SubjectCode>) -> Self {
        Self {
            table,
            file_subject,
            subject_column: None,
        }
    }

    /// Reads subjects from the named column instead of the default aliases.
    pub fn with_subject_column(mut self, column: Option<&str>) -> Self {
        self.subject_column = column.map(normalize_header);
        self
    }

    /// True when the roster names its subject per row.
    pub fn has_subject_column(&self) -> bool {
        self.subject_index().is_some()
    }

    fn subject_index(&self) -> Option<usize> {
        match &self.subject_column {
            Some(column) => self.table.find_column(&[column.as_str()]),
            None => self.table.find_column(&SUBJECT_ALIASES),
        }
    }

    /// Extracts one enrollment per row, in row order.
    ///
    /// The subject comes from the explicit subject column when the row has
    /// one, otherwise from the file name. Rows with no identifier, or with
    /// no subject from either source, are skipped with a warning.
    pub fn enrollments(&self, columns: StudentColumns) -> Result<Vec<Enrollment>> {
        let table = &self.table;
        let id_idx = table
            .identifier_index()
            .ok_or_else(|| IngestError::MissingIdentifier {
                path: table.source.clone(),
                columns: table.columns.clone(),
            })?;
        let (division_idx, name_idx) = match columns {
            StudentColumns::Required => (
                Some(table.require_column("division", &DIVISION_ALIASES)?),
                Some(table.require_column("student name", &NAME_ALIASES)?),
            ),
            StudentColumns::Optional => (
                table.find_column(&DIVISION_ALIASES),
                table.find_column(&NAME_ALIASES),
            ),
        };
        let subject_idx = self.subject_index();
        if let Some(column) = &self.subject_column
            && subject_idx.is_none()
        {
            return Err(IngestError::MissingColumn {
                column: column.clone(),
                path: table.source.clone(),
                columns: table.columns.clone(),
            });
        }
        if subject_idx.is_none() && self.file_subject.is_none() {
            return Err(IngestError::MissingColumn {
                column: "subject code".to_string(),
                path: table.source.clone(),
                columns: table.columns.clone(),
            });
        }

        let mut enrollments = Vec::with_capacity(table.len());
        for row in 0..table.len() {
            let roll_no = table.cell(row, id_idx);
            if roll_no.is_empty() {
                warn!(
                    path = %table.source.display(),
                    row = table.line(row),
                    "skipping roster row without a roll number"
                );
                continue;
            }
            let subject = subject_idx
                .map(|idx| table.cell(row, idx))
                .filter(|value| !value.is_empty())
                .and_then(|value| SubjectCode::new(value).ok())
                .or_else(|| self.file_subject.clone());
            let Some(subject) = subject else {
                warn!(
                    path = %table.source.display(),
                    row = table.line(row),
                    "skipping roster row without a subject code"
                );
                continue;
            };
            let cell = |idx: Option<usize>| idx.map(|i| table.cell(row, i)).unwrap_or_default();
            let student = Student::new(roll_no, cell(name_idx), cell(division_idx));
            enrollments.push(Enrollment::new(student, subject));
        }
        debug!(
            path = %table.source.display(),
            enrollments = enrollments.len(),
            "extracted enrollments"
        );
        Ok(enrollments)
    }
}

/// Reads and normalizes a roster file.
pub fn load_roster(path: &Path, options: &ProcessingOptions) -> Result<Roster> {
    let sheet = read_sheet(path)?;
    let table = normalize_roster_sheet(&sheet, options.header_scan_rows)?;
    info!(
        path = %path.display(),
        header_row = table.header_row,
        rows = table.len(),
        "loaded roster"
    );
    Ok(Roster::new(table, subject_from_path(path)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{RawSheet, SourceFormat};

    fn roster(data: &[&[&str]], file_subject: Option<&str>) -> Roster {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect();
        let sheet = RawSheet::new("roster.csv", SourceFormat::Csv, rows);
        let table = normalize_roster_sheet(&sheet, 15).unwrap();
        Roster::new(table, file_subject.map(|s| SubjectCode::new(s).unwrap()))
    }

    #[test]
    fn subject_from_file_name() {
        let roster = roster(
            &[&["Division", "Roll No", "Student Name"], &["A", "101", "Asha"], &["A", "", "Nobody"]],
            Some("EC301"),
        );
        let enrollments = roster.enrollments(StudentColumns::Required).unwrap();
        assert_eq!(enrollments.len(), 1);
        assert_eq!(enrollments[0].subject.as_str(), "EC301");
        assert_eq!(enrollments[0].student.name, "Asha");
        assert_eq!(enrollments[0].student.division, "A");
    }

    #[test]
    fn explicit_subject_column_wins() {
        let roster = roster(
            &[&["Student Roll No", "Subject Code"], &["101", "EC302"], &["102", ""]],
            Some("allocation"),
        );
        let enrollments = roster.enrollments(StudentColumns::Optional).unwrap();
        let subjects: Vec<&str> = enrollments.iter().map(|e| e.subject.as_str()).collect();
        assert_eq!(subjects, vec!["EC302", "allocation"]);
        assert_eq!(enrollments[0].student.name, "");
    }

    #[test]
    fn required_columns_are_enforced() {
        let roster = roster(&[&["Roll No", "Subject Code"], &["101", "EC302"]], None);
        let err = roster.enrollments(StudentColumns::Required).unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn { ref column, .. } if column == "division"));
    }

    #[test]
    fn named_subject_column() {
        let roster = roster(
            &[&["Roll No", "Course", "Subject"], &["101", "EC305", "Electronics"]],
            Some("EC301"),
        )
        .with_subject_column(Some(" Course "));
        let enrollments = roster.enrollments(StudentColumns::Optional).unwrap();
        assert_eq!(enrollments[0].subject.as_str(), "EC305");

        let missing = roster.with_subject_column(Some("paper"));
        let err = missing.enrollments(StudentColumns::Optional).unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn { ref column, .. } if column == "paper"));
    }

    #[test]
    fn subject_required_from_somewhere() {
        let roster = roster(&[&["Roll No"], &["101"]], None);
        let err = roster.enrollments(StudentColumns::Optional).unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn { ref column, .. } if column == "subject code"));
    }
}
