//! Session context shared between pipeline stages.
//!
//! A session holds the processing options and the most recently formed
//! batch table so later stages (grid joining, export) reuse it instead of
//! re-forming batches.

use tt_model::{BatchTable, Enrollment, ProcessingOptions};

use crate::batch::assign_batches;
use crate::error::Result;

#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    options: ProcessingOptions,
    batches: Option<BatchTable>,
}

impl SessionContext {
    /// Creates a session, rejecting invalid options.
    pub fn new(options: ProcessingOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            batches: None,
        })
    }

    pub fn options(&self) -> &ProcessingOptions {
        &self.options
    }

    /// The last batch table formed in this session.
    pub fn batches(&self) -> Option<&BatchTable> {
        self.batches.as_ref()
    }

    /// Forms batches from enrollments and keeps them for later stages.
    pub fn form_batches(&mut self, enrollments: &[Enrollment]) -> Result<&BatchTable> {
        let table = assign_batches(enrollments, &self.options)?;
        Ok(self.batches.insert(table))
    }

    /// Drops the stored batch table.
    pub fn clear(&mut self) {
        self.batches = None;
    }
}
