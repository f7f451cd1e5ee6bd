use std::collections::BTreeMap;

use tracing::{info, warn};

use tt_model::{
    Conflict, ConflictKind, Detection, DirectSlot, MalformedTimePolicy, ModelError, ScheduleMode,
    Session, SkippedRow, TimeRange, Weekday,
};

use crate::error::{CoreError, Result};
use crate::join::{DirectRow, JoinedSchedule};

use super::ConflictStrategy;

/// Pairwise half-open overlap of a student's same-day sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntervalOverlap;

/// A joined row with its day and times parsed.
struct Timed<'a> {
    row: &'a DirectRow,
    day: Weekday,
    time: TimeRange,
}

fn parse_slot(slot: &DirectSlot) -> std::result::Result<(Weekday, TimeRange), ModelError> {
    let day = slot.day.parse::<Weekday>()?;
    let time = TimeRange::parse(&slot.start, &slot.end)?;
    Ok((day, time))
}

impl ConflictStrategy for IntervalOverlap {
    fn name(&self) -> &'static str {
        "interval-overlap"
    }

    fn mode(&self) -> ScheduleMode {
        ScheduleMode::Direct
    }

    fn detect(&self, schedule: &JoinedSchedule, policy: MalformedTimePolicy) -> Result<Detection> {
        let JoinedSchedule::Direct(rows) = schedule else {
            return Err(CoreError::mismatch(self.name(), self.mode(), schedule.mode()));
        };
        let mut detection = Detection::new(self.name());

        let mut by_student: BTreeMap<&str, Vec<Timed<'_>>> = BTreeMap::new();
        for row in rows {
            // Unscheduled rows never take part.
            let Some(slot) = &row.slot else {
                continue;
            };
            match parse_slot(slot) {
                Ok((day, time)) => by_student
                    .entry(row.roll_no.as_str())
                    .or_default()
                    .push(Timed { row, day, time }),
                Err(source) => match policy {
                    MalformedTimePolicy::Fail => {
                        return Err(CoreError::MalformedTime {
                            row: slot.row,
                            roll_no: row.roll_no.clone(),
                            subject: row.subject.to_string(),
                            source,
                        });
                    }
                    MalformedTimePolicy::Skip => {
                        warn!(
                            row = slot.row,
                            subject = %row.subject,
                            error = %source,
                            "skipping malformed schedule row"
                        );
                        detection.skipped.push(SkippedRow {
                            row: slot.row,
                            roll_no: row.roll_no.clone(),
                            subject: row.subject.to_string(),
                            reason: source.to_string(),
                        });
                    }
                },
            }
        }

        for (roll_no, mut sessions) in by_student {
            sessions.sort_by_key(|session| (session.day, session.time.start));
            for (i, first) in sessions.iter().enumerate() {
                for second in &sessions[i + 1..] {
                    if first.day != second.day || !first.time.overlaps(&second.time) {
                        continue;
                    }
                    detection.conflicts.push(Conflict {
                        roll_no: roll_no.to_string(),
                        student_name: Some(first.row.student_name.clone())
                            .filter(|name| !name.is_empty()),
                        day: first.day,
                        kind: ConflictKind::Overlap {
                            first: Session {
                                label: first.row.subject.to_string(),
                                time: first.time,
                            },
                            second: Session {
                                label: second.row.subject.to_string(),
                                time: second.time,
                            },
                        },
                    });
                }
            }
        }

        info!(
            strategy = self.name(),
            rows = rows.len(),
            conflicts = detection.conflicts.len(),
            skipped = detection.skipped.len(),
            "interval detection complete"
        );
        Ok(detection)
    }
}
