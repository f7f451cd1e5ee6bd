//! Domain model for timetable batching and conflict detection.
//!
//! Every entity here is derived in memory for a single processing session:
//! students and enrollments come from normalized rosters, batches from the
//! batch assigner, and conflicts and resolutions from the detection stages.

pub mod batch;
pub mod conflict;
pub mod day;
pub mod error;
pub mod ids;
pub mod options;
pub mod roster;
pub mod time;
pub mod timetable;

pub use batch::{BatchAssignment, BatchCodeStyle, BatchTable};
pub use conflict::{
    Conflict, ConflictKind, Detection, NO_ALTERNATIVE_DAY, NO_ALTERNATIVE_TIME, Resolution,
    Session, SkippedRow, Suggestion,
};
pub use day::Weekday;
pub use error::{ModelError, Result};
pub use ids::{BatchCode, SubjectCode, normalize_batch_token};
pub use options::{
    DEFAULT_BATCH_SIZE, DEFAULT_HEADER_SCAN_ROWS, MalformedTimePolicy, ProcessingOptions,
};
pub use roster::{Enrollment, IDENTIFIER_COLUMN, Student};
pub use time::{TimeRange, parse_time_of_day};
pub use timetable::{DirectSlot, GridRow, GridTimetable, ScheduleMode, Timetable};
