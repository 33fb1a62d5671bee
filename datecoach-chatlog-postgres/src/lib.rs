//! Append-only Postgres log of chatbot sessions and messages.

mod error;
mod logger;
mod retry;
pub mod schema;

pub use error::ChatLogError;
pub use logger::{PostgresChatLogger, PostgresChatLoggerBuilder};
pub use retry::{execute_with_retry, is_retryable};
