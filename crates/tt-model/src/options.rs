//! Configuration options for batching and conflict detection.

use serde::{Deserialize, Serialize};

use crate::{BatchCodeStyle, ModelError};

/// Default number of students per batch.
pub const DEFAULT_BATCH_SIZE: usize = 30;

/// Default number of leading spreadsheet rows searched for the header.
pub const DEFAULT_HEADER_SCAN_ROWS: usize = 15;

/// What to do with a joined row whose day or time cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedTimePolicy {
    /// Drop the row, record a warning, keep going.
    #[default]
    Skip,
    /// Abort detection with an error.
    Fail,
}

/// Options controlling batch formation and detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingOptions {
    /// Maximum students per batch.
    pub batch_size: usize,
    /// Batch code format. Must agree with the codes used in grid timetables.
    pub batch_code_style: BatchCodeStyle,
    /// Spreadsheet rows searched for the header row.
    pub header_scan_rows: usize,
    pub malformed_time: MalformedTimePolicy,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            batch_code_style: BatchCodeStyle::default(),
            header_scan_rows: DEFAULT_HEADER_SCAN_ROWS,
            malformed_time: MalformedTimePolicy::default(),
        }
    }
}

impl ProcessingOptions {
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_batch_code_style(mut self, style: BatchCodeStyle) -> Self {
        self.batch_code_style = style;
        self
    }

    pub fn with_malformed_time(mut self, policy: MalformedTimePolicy) -> Self {
        self.malformed_time = policy;
        self
    }

    /// Rejects a zero batch size.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.batch_size == 0 {
            return Err(ModelError::InvalidBatchSize);
        }
        Ok(())
    }
}
