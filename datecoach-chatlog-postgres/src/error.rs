use thiserror::Error;

use datecoach_core::CoachError;

#[derive(Debug, Error)]
pub enum ChatLogError {
    #[error("failed to connect to postgres: {0}")]
    Connection(#[source] sqlx::Error),
    #[error("failed to create chat log tables: {0}")]
    Schema(#[source] sqlx::Error),
    #[error("chat log query failed: {0}")]
    Query(#[source] sqlx::Error),
    #[error("failed to encode message metadata: {0}")]
    Metadata(#[from] serde_json::Error),
}

impl From<ChatLogError> for CoachError {
    fn from(error: ChatLogError) -> Self {
        CoachError::Storage(error.to_string())
    }
}
