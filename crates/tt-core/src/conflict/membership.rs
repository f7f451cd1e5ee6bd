use std::collections::{BTreeMap, HashMap};

use tracing::info;

use tt_model::{
    BatchCode, Conflict, ConflictKind, Detection, MalformedTimePolicy, ScheduleMode, Weekday,
};

use crate::error::{CoreError, Result};
use crate::join::JoinedSchedule;

use super::ConflictStrategy;

/// One student in two or more batches active in the same grid cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchMembership;

/// A student's batches within one cell.
struct CellMember<'a> {
    name: &'a str,
    batches: Vec<&'a BatchCode>,
}

impl ConflictStrategy for BatchMembership {
    fn name(&self) -> &'static str {
        "batch-membership"
    }

    fn mode(&self) -> ScheduleMode {
        ScheduleMode::Grid
    }

    /// Grid rows carry no free-form times, so the policy is unused.
    fn detect(&self, schedule: &JoinedSchedule, _policy: MalformedTimePolicy) -> Result<Detection> {
        let JoinedSchedule::Grid(rows) = schedule else {
            return Err(CoreError::mismatch(self.name(), self.mode(), schedule.mode()));
        };

        // Cells in first-seen order; students within a cell by roll number.
        let mut cells: Vec<((Weekday, &str), BTreeMap<&str, CellMember<'_>>)> = Vec::new();
        let mut cell_index: HashMap<(Weekday, &str), usize> = HashMap::new();
        for row in rows {
            let key = (row.day, row.time_slot.as_str());
            let idx = *cell_index.entry(key).or_insert_with(|| {
                cells.push((key, BTreeMap::new()));
                cells.len() - 1
            });
            let member = cells[idx]
                .1
                .entry(row.roll_no.as_str())
                .or_insert_with(|| CellMember {
                    name: row.student_name.as_str(),
                    batches: Vec::new(),
                });
            if !member.batches.contains(&&row.batch) {
                member.batches.push(&row.batch);
            }
        }

        let mut detection = Detection::new(self.name());
        for ((day, time_slot), members) in &cells {
            for (roll_no, member) in members {
                if member.batches.len() < 2 {
                    continue;
                }
                detection.conflicts.push(Conflict {
                    roll_no: (*roll_no).to_string(),
                    student_name: Some(member.name.to_string()),
                    day: *day,
                    kind: ConflictKind::SharedCell {
                        time_slot: (*time_slot).to_string(),
                        batches: member.batches.iter().map(|batch| (*batch).clone()).collect(),
                    },
                });
            }
        }

        info!(
            strategy = self.name(),
            rows = rows.len(),
            cells = cells.len(),
            conflicts = detection.conflicts.len(),
            "membership detection complete"
        );
        Ok(detection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::join::GridRow;

    fn row(roll_no: &str, batch: &str, day: Weekday, slot: &str) -> GridRow {
        GridRow {
            roll_no: roll_no.to_string(),
            student_name: format!("Student {roll_no}"),
            batch: BatchCode::new(batch).unwrap(),
            day,
            time_slot: slot.to_string(),
        }
    }

    #[test]
    fn one_row_per_student_per_cell() {
        let schedule = JoinedSchedule::Grid(vec![
            row("X", "A1", Weekday::Monday, "9-11"),
            row("Y", "A1", Weekday::Monday, "9-11"),
            row("X", "A2", Weekday::Monday, "9-11"),
            row("X", "A1", Weekday::Tuesday, "9-11"),
        ]);
        let detection = BatchMembership
            .detect(&schedule, MalformedTimePolicy::Skip)
            .unwrap();
        assert_eq!(detection.conflicts.len(), 1);
        let conflict = &detection.conflicts[0];
        assert_eq!(conflict.roll_no, "X");
        assert_eq!(conflict.day, Weekday::Monday);
        assert_eq!(conflict.batch_list().as_deref(), Some("A1, A2"));
        assert_eq!(conflict.student_name.as_deref(), Some("Student X"));
    }

    #[test]
    fn empty_schedule_is_clean() {
        let detection = BatchMembership
            .detect(&JoinedSchedule::Grid(Vec::new()), MalformedTimePolicy::Skip)
            .unwrap();
        assert!(detection.is_clean());
        assert_eq!(detection.strategy, "batch-membership");
    }
}
