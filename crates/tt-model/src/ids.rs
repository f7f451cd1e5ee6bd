#![deny(unsafe_code)]

use std::fmt;

use crate::ModelError;

/// Subject code as it appears in rosters and direct-mode timetables.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct SubjectCode(String);

impl SubjectCode {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidSubjectCode(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Batch identifier, e.g. `EC3011` or `EC301_B1`.
///
/// The display form keeps the subject's casing; grid matching goes through
/// [`BatchCode::normalized`], which upper-cases the code.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct BatchCode(String);

impl BatchCode {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidBatchCode(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key used to match grid tokens against known batches.
    pub fn normalized(&self) -> String {
        normalize_batch_token(&self.0)
    }
}

impl fmt::Display for BatchCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strips all whitespace and upper-cases a batch token from a grid cell.
pub fn normalize_batch_token(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_code_rejects_blank() {
        assert!(SubjectCode::new("   ").is_err());
        assert_eq!(SubjectCode::new(" EC301 ").unwrap().as_str(), "EC301");
    }

    #[test]
    fn batch_token_normalization_strips_inner_whitespace() {
        assert_eq!(normalize_batch_token(" ec 3011 "), "EC3011");
        assert_eq!(
            BatchCode::new("ec301_b2").unwrap().normalized(),
            "EC301_B2"
        );
    }
}
