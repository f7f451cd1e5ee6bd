use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid day: {0:?}")]
    InvalidDay(String),
    #[error("invalid time {0:?}: expected HH:MM or HH:MM:SS")]
    InvalidTime(String),
    #[error("batch size must be at least 1")]
    InvalidBatchSize,
    #[error("invalid subject code: {0:?}")]
    InvalidSubjectCode(String),
    #[error("invalid batch code: {0:?}")]
    InvalidBatchCode(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
