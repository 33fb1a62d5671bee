//! Deterministic cache keys.

use serde::Serialize;

use datecoach_core::{ChatRequest, Message};

pub const AI_CACHE_PREFIX: &str = "ai-cache:";

#[derive(Serialize)]
struct KeyInput<'a> {
    messages: &'a [Message],
    model: &'a str,
    temperature: Option<f32>,
    #[serde(rename = "maxTokens")]
    max_tokens: Option<u32>,
}

/// 32-bit rolling string hash (`h = h * 31 + unit`) over UTF-16 code units,
/// wrapping on overflow.
pub fn string_hash(input: &str) -> i32 {
    input.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}

pub fn cache_key(request: &ChatRequest) -> String {
    let input = KeyInput {
        messages: &request.messages,
        model: &request.model,
        temperature: request.temperature,
        max_tokens: request.max_tokens,
    };
    // Serializing plain structs of strings and numbers cannot fail.
    let serialized = serde_json::to_string(&input).unwrap_or_default();
    format!("{AI_CACHE_PREFIX}{:08x}", string_hash(&serialized) as u32)
}
