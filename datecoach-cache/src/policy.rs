use std::time::Duration;

use datecoach_core::ChatRequest;

/// Which requests are worth caching. Creative (high temperature), long
/// conversations and long messages are effectively unique and always bypass.
#[derive(Clone, Debug, PartialEq)]
pub struct CachePolicy {
    pub max_temperature: f32,
    pub max_messages: usize,
    pub max_message_chars: usize,
    pub default_ttl: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            max_temperature: 0.7,
            max_messages: 10,
            max_message_chars: 2000,
            default_ttl: Duration::from_secs(60 * 60),
        }
    }
}

impl CachePolicy {
    pub fn should_cache(&self, request: &ChatRequest) -> bool {
        if request.temperature.unwrap_or(0.0) > self.max_temperature {
            return false;
        }
        if request.messages.len() > self.max_messages {
            return false;
        }
        request
            .messages
            .iter()
            .all(|message| message.content.chars().count() <= self.max_message_chars)
    }
}
