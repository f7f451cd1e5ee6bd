//! Conflict-check pipeline with explicit stages.
//!
//! 1. **Batches** (grid timetables only): form batches and store them in the
//!    session context
//! 2. **Join**: merge enrollments with the timetable
//! 3. **Detect**: run the strategy matching the timetable schema
//! 4. **Resolve**: suggest an alternative slot per conflict

use std::time::Instant;

use tracing::{info, info_span};

use tt_model::{BatchTable, Detection, Enrollment, Resolution, ScheduleMode, Timetable};

use crate::batch::batched_enrollments;
use crate::conflict::detect_conflicts;
use crate::context::SessionContext;
use crate::error::{CoreError, Result};
use crate::join::{JoinedSchedule, join_direct, join_grid};
use crate::resolve::suggest_resolutions;

/// Everything a conflict check produces.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub mode: ScheduleMode,
    pub detection: Detection,
    pub resolutions: Vec<Resolution>,
    /// Joined rows in the long-format table.
    pub joined_rows: usize,
    /// Direct-mode enrollments whose subject has no timetable entry.
    pub unscheduled: usize,
}

/// Forms batches for a set of rosters inside a `batches` span.
pub fn run_batches<'a>(
    context: &'a mut SessionContext,
    enrollments: &[Enrollment],
) -> Result<&'a BatchTable> {
    let span = info_span!("batches", enrollments = enrollments.len());
    let _guard = span.enter();
    let start = Instant::now();
    let table = context.form_batches(enrollments)?;
    info!(
        rows = table.len(),
        batches = table.batch_count(),
        duration_ms = start.elapsed().as_millis(),
        "batch stage complete"
    );
    Ok(table)
}

/// Runs join, detection and resolution against a timetable.
///
/// Direct timetables join `enrollments` on subject code. Grid timetables
/// first form batches from `enrollments` and join on batch membership.
pub fn run_check(
    context: &mut SessionContext,
    timetable: &Timetable,
    enrollments: &[Enrollment],
) -> Result<CheckOutcome> {
    let joined = match timetable {
        Timetable::Direct(slots) => {
            info_span!("join", mode = "direct").in_scope(|| join_direct(enrollments, slots))
        }
        Timetable::Grid(grid) => {
            let batches = run_batches(context, enrollments)?;
            let batched = batched_enrollments(batches);
            info_span!("join", mode = "grid").in_scope(|| join_grid(&batched, grid))
        }
    };
    check_joined(context, timetable, &joined)
}

/// Runs detection and resolution on an already joined schedule.
pub fn check_joined(
    context: &SessionContext,
    timetable: &Timetable,
    joined: &JoinedSchedule,
) -> Result<CheckOutcome> {
    if joined.mode() != timetable.mode() {
        return Err(CoreError::mismatch("check", timetable.mode(), joined.mode()));
    }

    let detection = info_span!("detect", mode = joined.mode().as_str()).in_scope(|| {
        let start = Instant::now();
        let detection = detect_conflicts(joined, context.options().malformed_time)?;
        info!(
            conflicts = detection.conflicts.len(),
            skipped = detection.skipped.len(),
            duration_ms = start.elapsed().as_millis(),
            "detect stage complete"
        );
        Ok::<_, CoreError>(detection)
    })?;

    let resolutions = info_span!("resolve").in_scope(|| {
        let start = Instant::now();
        let resolutions = suggest_resolutions(&detection, timetable);
        info!(
            resolutions = resolutions.len(),
            duration_ms = start.elapsed().as_millis(),
            "resolve stage complete"
        );
        resolutions
    });

    Ok(CheckOutcome {
        mode: joined.mode(),
        joined_rows: joined.len(),
        unscheduled: joined.unscheduled(),
        detection,
        resolutions,
    })
}
