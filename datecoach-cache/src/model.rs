use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use datecoach_core::{ChatModel, ChatRequest, ChatResponse, CoachError};

use crate::cache::AiResponseCache;

/// Serves completions from [`AiResponseCache`] and records fresh ones.
pub struct CachedChatModel<M> {
    inner: M,
    cache: Arc<AiResponseCache>,
    ttl: Option<Duration>,
}

impl<M> CachedChatModel<M> {
    pub fn new(inner: M, cache: Arc<AiResponseCache>) -> Self {
        Self {
            inner,
            cache,
            ttl: None,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn cache(&self) -> &Arc<AiResponseCache> {
        &self.cache
    }
}

#[async_trait]
impl<M: ChatModel> ChatModel for CachedChatModel<M> {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, CoachError> {
        if let Some(content) = self.cache.get(&request).await {
            return Ok(ChatResponse::text(content));
        }

        let response = self.inner.complete(request.clone()).await?;
        if !response.content.trim().is_empty() {
            self.cache.set(&request, &response.content, self.ttl).await;
        }
        Ok(response)
    }
}
