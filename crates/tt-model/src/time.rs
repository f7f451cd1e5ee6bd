//! Time-of-day parsing and half-open session intervals.

use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::ModelError;

const SHORT_FORMAT: &str = "%H:%M";
const LONG_FORMAT: &str = "%H:%M:%S";

/// Parses a time-of-day value.
///
/// `HH:MM` is tried first, then `HH:MM:SS`.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, ModelError> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, SHORT_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(trimmed, LONG_FORMAT))
        .map_err(|_| ModelError::InvalidTime(value.to_string()))
}

/// A session interval `[start, end)` on a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Parses both ends with [`parse_time_of_day`].
    pub fn parse(start: &str, end: &str) -> Result<Self, ModelError> {
        Ok(Self {
            start: parse_time_of_day(start)?,
            end: parse_time_of_day(end)?,
        })
    }

    /// Half-open overlap: touching boundaries do not overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format(LONG_FORMAT),
            self.end.format(LONG_FORMAT)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: &str, end: &str) -> TimeRange {
        TimeRange::parse(start, end).expect("valid range")
    }

    #[test]
    fn parses_both_formats() {
        let short = parse_time_of_day("09:30").unwrap();
        let long = parse_time_of_day("09:30:00").unwrap();
        assert_eq!(short, long);
        assert!(parse_time_of_day("half past nine").is_err());
        assert!(parse_time_of_day("").is_err());
    }

    #[test]
    fn overlapping_sessions_conflict() {
        assert!(range("09:00", "10:00").overlaps(&range("09:30", "10:30")));
        assert!(range("09:30", "10:30").overlaps(&range("09:00", "10:00")));
    }

    #[test]
    fn touching_sessions_do_not_overlap() {
        assert!(!range("09:00", "10:00").overlaps(&range("10:00", "11:00")));
        assert!(!range("10:00", "11:00").overlaps(&range("09:00", "10:00")));
    }

    #[test]
    fn displays_with_seconds() {
        assert_eq!(range("09:00", "10:15").to_string(), "09:00:00 - 10:15:00");
    }
}
