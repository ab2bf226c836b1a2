//! Error types for day-layout operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Invalid interval for event {id}: start={start}, end={end} (end must be greater than start)")]
    InvalidInterval { id: usize, start: f64, end: f64 },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
}

impl From<serde_json::Error> for LayoutError {
    fn from(err: serde_json::Error) -> Self {
        LayoutError::InvalidJson(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LayoutError>;
