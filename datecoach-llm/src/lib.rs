//! Chat-completion clients.
//!
//! `OpenAiCompatibleClient` speaks the OpenAI `/chat/completions` format and
//! works with any provider exposing it. `OpenRouterClient` preconfigures it
//! for OpenRouter, including its attribution headers.

pub mod openai_compatible;
mod openrouter;

pub use datecoach_core::{ChatModel, ChatRequest, ChatResponse, Message, Role, TokenUsage};
pub use openai_compatible::{
    ChatCompletionRequest, ChatCompletionResponse, OpenAiCompatibleBuilder, OpenAiCompatibleClient,
};
pub use openrouter::{OpenRouterBuilder, OpenRouterClient, DEFAULT_MODEL, OPENROUTER_BASE_URL};
