use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoachError {
    #[error("LLM provider failed: {0}")]
    LlmProvider(String),
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),
    #[error("Storage operation failed: {0}")]
    Storage(String),
    #[error("Cache operation failed: {0}")]
    Cache(String),
    #[error("Circuit open after {failures} consecutive failures")]
    CircuitOpen { failures: u32 },
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Serialization/deserialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{0}")]
    Custom(String),
}

impl CoachError {
    /// True for errors caused by the caller rather than by a backend.
    pub fn is_client_error(&self) -> bool {
        matches!(self, CoachError::InvalidInput(_))
    }
}
