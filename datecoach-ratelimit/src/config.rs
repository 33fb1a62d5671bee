use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Preset name, also the first segment of the limiter identifier.
    pub name: &'static str,
    pub limit: u32,
    pub window: Duration,
}

impl RateLimitConfig {
    pub const fn new(name: &'static str, limit: u32, window: Duration) -> Self {
        Self {
            name,
            limit,
            window,
        }
    }

    /// Chatbot widget: 20 requests per minute.
    pub const fn chatbot() -> Self {
        Self::new("chatbot", 20, Duration::from_secs(60))
    }

    /// AI endpoints: 10 requests per minute.
    pub const fn ai() -> Self {
        Self::new("ai", 10, Duration::from_secs(60))
    }

    /// Authentication: 5 attempts per 15 minutes.
    pub const fn auth() -> Self {
        Self::new("auth", 5, Duration::from_secs(15 * 60))
    }

    /// Everything else under `/api`: 100 requests per minute.
    pub const fn api() -> Self {
        Self::new("api", 100, Duration::from_secs(60))
    }

    /// The knowledge-base listing only feeds suggestion chips, so it is
    /// counted against the general budget rather than the chat budget.
    pub fn for_path(path: &str) -> Self {
        if path.starts_with("/api/chatbot/knowledge-base") {
            Self::api()
        } else if path.starts_with("/api/chatbot") {
            Self::chatbot()
        } else if path.starts_with("/api/auth") {
            Self::auth()
        } else if path.starts_with("/api/ai") {
            Self::ai()
        } else {
            Self::api()
        }
    }

    pub fn window_ms(&self) -> i64 {
        i64::try_from(self.window.as_millis()).unwrap_or(i64::MAX)
    }

    pub fn identifier(&self, client: &str) -> String {
        format!("{}:{client}", self.name)
    }
}
