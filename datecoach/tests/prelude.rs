use std::sync::Arc;

use async_trait::async_trait;
use datecoach::prelude::*;

struct Echo;

#[async_trait]
impl ChatModel for Echo {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, CoachError> {
        let last = request
            .messages
            .last()
            .map(|message| message.content.clone())
            .unwrap_or_default();
        Ok(ChatResponse::text(format!("echo: {last}")))
    }
}

#[tokio::test]
async fn cached_model_behind_engine_serves_repeat_questions_from_cache() {
    let cache = Arc::new(AiResponseCache::memory_only());
    let model = CachedChatModel::new(Echo, cache.clone());
    let engine = ChatbotEngine::builder(Arc::new(model)).build();

    let first = engine
        .respond(ChatInput::message("Bliep bloep blaap"))
        .await
        .unwrap();
    let second = engine
        .respond(ChatInput::message("Bliep bloep blaap"))
        .await
        .unwrap();

    assert_eq!(first.intent, Intent::Ai);
    assert_eq!(first.reply, second.reply);
    let stats = cache.stats();
    assert_eq!(stats.writes, 1);
    assert_eq!(stats.hits, 1);
}

#[tokio::test]
async fn limiter_presets_are_reachable() {
    let limiter = RateLimiter::memory_only();
    let config = RateLimitConfig::for_path("/api/chatbot");
    let result = limiter.check(&config.identifier("203.0.113.1"), &config).await;
    assert!(result.success);
    assert_eq!(result.limit, 20);
}
