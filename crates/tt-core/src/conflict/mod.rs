//! Conflict detection.
//!
//! Two strategies share the [`ConflictStrategy`] interface:
//!
//! - [`IntervalOverlap`] for direct schedules: same-day sessions of one
//!   student whose half-open time ranges intersect
//! - [`BatchMembership`] for grid schedules: one student in two or more
//!   batches active in the same cell
//!
//! [`detect_conflicts`] picks the strategy from the schedule's mode.

mod interval;
mod membership;
mod strategy;

pub use interval::IntervalOverlap;
pub use membership::BatchMembership;
pub use strategy::{ConflictStrategy, strategy_for};

use tt_model::{Detection, MalformedTimePolicy};

use crate::error::Result;
use crate::join::JoinedSchedule;

/// Runs the strategy matching the schedule's mode.
pub fn detect_conflicts(schedule: &JoinedSchedule, policy: MalformedTimePolicy) -> Result<Detection> {
    strategy_for(schedule.mode()).detect(schedule, policy)
}
