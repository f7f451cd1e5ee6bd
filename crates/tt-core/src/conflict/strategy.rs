//! The conflict strategy trait.

use tt_model::{Detection, MalformedTimePolicy, ScheduleMode};

use crate::error::Result;
use crate::join::JoinedSchedule;

use super::{BatchMembership, IntervalOverlap};

/// A conflict-detection algorithm for one schedule mode.
///
/// # Example
///
/// ```ignore
/// use tt_core::{ConflictStrategy, IntervalOverlap};
///
/// let detection = IntervalOverlap.detect(&joined, MalformedTimePolicy::Skip)?;
/// assert_eq!(detection.strategy, "interval-overlap");
/// ```
pub trait ConflictStrategy: Send + Sync {
    /// Short name recorded on each [`Detection`].
    fn name(&self) -> &'static str;

    /// The schedule mode this strategy understands.
    fn mode(&self) -> ScheduleMode;

    /// Finds conflicts in a joined schedule.
    ///
    /// # Errors
    ///
    /// Fails when the schedule has the other mode, or when a row is
    /// malformed under [`MalformedTimePolicy::Fail`].
    fn detect(&self, schedule: &JoinedSchedule, policy: MalformedTimePolicy) -> Result<Detection>;
}

/// The strategy for a timetable schema.
pub fn strategy_for(mode: ScheduleMode) -> &'static dyn ConflictStrategy {
    match mode {
        ScheduleMode::Direct => &IntervalOverlap,
        ScheduleMode::Grid => &BatchMembership,
    }
}
