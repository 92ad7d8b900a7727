//! Error types for slot-engine operations.

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid exception: {0}")]
    InvalidException(String),

    #[error("Invalid time of day: {0}")]
    InvalidTimeOfDay(String),

    #[error("Availability pattern not found: {0}")]
    PatternNotFound(Uuid),

    #[error("Exception not found: {0}")]
    ExceptionNotFound(Uuid),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SlotError>;
