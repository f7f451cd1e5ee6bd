//! Error types for the processing engine.

use thiserror::Error;

use tt_model::{ModelError, ScheduleMode};

#[derive(Debug, Error)]
pub enum CoreError {
    /// A joined row carries a day or time that cannot be parsed, under the
    /// `fail` policy.
    #[error("malformed schedule at timetable row {row} for student {roll_no}, {subject}: {source}")]
    MalformedTime {
        row: usize,
        roll_no: String,
        subject: String,
        #[source]
        source: ModelError,
    },

    /// A strategy was handed a schedule of the other mode.
    #[error("{strategy} expects a {expected} schedule, got {found}")]
    ScheduleMismatch {
        strategy: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl CoreError {
    pub(crate) fn mismatch(strategy: &'static str, expected: ScheduleMode, found: ScheduleMode) -> Self {
        CoreError::ScheduleMismatch {
            strategy,
            expected: expected.as_str(),
            found: found.as_str(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
