//! Shared utilities for the timetable crates.
//!
//! Cell text normalization used by both spreadsheet ingestion and export,
//! plus Polars `AnyValue` conversions for writing frames.

pub mod polars;
pub mod text;

pub use crate::polars::any_to_string;
pub use text::{collapse_whitespace, format_numeric, normalize_cell};
