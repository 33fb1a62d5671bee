mod clock;
mod error;
pub mod health;
mod llm;
pub mod retry;

pub use clock::{now_ms, remaining_secs};
pub use error::CoachError;
pub use health::{HealthCheck, StaticHealth};
pub use llm::{ChatModel, ChatRequest, ChatResponse, Message, Role, TokenUsage};
pub use retry::{retry_with, RetryPolicy};
