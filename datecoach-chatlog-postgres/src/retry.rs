use std::future::Future;
use std::io::ErrorKind;

use datecoach_core::{retry_with, RetryPolicy};

/// SQLSTATEs for lost connections, admin shutdown and too many connections.
const RETRYABLE_SQLSTATES: &[&str] = &["08000", "08003", "08006", "57P01", "53300"];

/// True for errors where the same statement may succeed on a fresh connection.
pub fn is_retryable(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Io(io) => matches!(
            io.kind(),
            ErrorKind::ConnectionReset
                | ErrorKind::ConnectionRefused
                | ErrorKind::TimedOut
                | ErrorKind::ConnectionAborted
        ),
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => true,
        sqlx::Error::Database(database) => database
            .code()
            .is_some_and(|code| RETRYABLE_SQLSTATES.contains(&code.as_ref())),
        _ => false,
    }
}

/// Runs `operation`, retrying per `policy` when the error is connection-class.
pub async fn execute_with_retry<T, F, Fut>(
    policy: RetryPolicy,
    operation: F,
) -> Result<T, sqlx::Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    retry_with(policy, is_retryable, operation).await
}
