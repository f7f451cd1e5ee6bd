//! Processing engine: batch formation, schedule joining, conflict detection
//! and resolution suggestions.
//!
//! Data flows through the stages in order:
//!
//! ```text
//! enrollments ─► assign_batches ─► join_direct / join_grid ─► detect_conflicts ─► suggest_resolutions
//! ```
//!
//! Stage state that outlives a single call (the last batch table) lives in
//! an explicit [`SessionContext`].

pub mod batch;
pub mod conflict;
pub mod context;
pub mod error;
pub mod join;
pub mod pipeline;
pub mod resolve;

pub use batch::{
    assign_batches, assign_subject_batches, batched_enrollments, colliding_batch_codes,
};
pub use conflict::{BatchMembership, ConflictStrategy, IntervalOverlap, detect_conflicts, strategy_for};
pub use context::SessionContext;
pub use error::{CoreError, Result};
pub use join::{DirectRow, GridRow, JoinedSchedule, cell_tokens, join_direct, join_grid};
pub use pipeline::{CheckOutcome, check_joined, run_batches, run_check};
pub use resolve::{suggest, suggest_resolutions};
