//! Dutch dating-coach chatbot.
//!
//! Messages are first matched against a static knowledge base (keyword
//! intents, whole-word tags, question word overlap). Unmatched messages go to
//! an injected [`ChatModel`](datecoach_core::ChatModel). Every reply is handed
//! to a [`ChatLogger`] on a detached task.

mod engine;
mod intent;
pub mod knowledge_base;
mod logger;
mod matcher;

pub use engine::{
    ChatInput, ChatReply, ChatbotEngine, ChatbotEngineBuilder, AI_CONFIDENCE, KB_CONFIDENCE,
    MAX_MESSAGE_CHARS,
};
pub use intent::{keyword_intent, Intent};
pub use knowledge_base::{entries, find_entry, KnowledgeBaseEntry, QuickReply};
pub use logger::{ChatLogRecord, ChatLogger, NoopChatLogger, TracingChatLogger};
pub use matcher::{match_intent, IntentMatch, MatchSource};
