//! Export of result tables.
//!
//! Batch, conflict and resolution tables are built as Polars frames with
//! their user-facing column names, then written as CSV or JSON records.

pub mod frames;
pub mod writer;

pub use frames::{
    BATCH_COLUMNS, DIRECT_CONFLICT_COLUMNS, GRID_CONFLICT_COLUMNS, SUGGESTED_NEW_DAY,
    SUGGESTED_NEW_TIME, batch_frame, conflict_columns, conflict_frame, resolution_frame,
};
pub use writer::{
    OutputFormat, ensure_parent_dir, frame_rows, write_csv, write_frame, write_json, write_named,
};

/// File stem of the batch table.
pub const BATCH_ALLOCATION_STEM: &str = "batch_allocation";
/// File stem of the conflict table.
pub const CONFLICTS_STEM: &str = "conflicts";
/// File stem of the resolution table.
pub const RESOLUTIONS_STEM: &str = "conflict_resolutions";
