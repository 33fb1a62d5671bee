//! OpenRouter LLM client

use std::time::Duration;

use datecoach_core::{ChatModel, ChatRequest, ChatResponse, CoachError};

use crate::openai_compatible::OpenAiCompatibleClient;

pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "anthropic/claude-3.5-haiku";

/// OpenRouter LLM client
#[derive(Clone, Debug)]
pub struct OpenRouterClient(OpenAiCompatibleClient);

#[derive(Clone, Debug)]
pub struct OpenRouterBuilder {
    api_key: Option<String>,
    base_url: String,
    model: String,
    timeout: Duration,
    referer: Option<String>,
    title: Option<String>,
}

impl OpenRouterClient {
    pub fn builder() -> OpenRouterBuilder {
        OpenRouterBuilder {
            api_key: None,
            base_url: OPENROUTER_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(60),
            referer: None,
            title: Some("DatingAssistent".to_string()),
        }
    }

    pub fn model(&self) -> &str {
        self.0.default_model()
    }

    /// Set the model to use
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.0.set_default_model(model);
        self
    }
}

impl OpenRouterBuilder {
    pub fn api_key(mut self, value: impl Into<String>) -> Self {
        self.api_key = Some(value.into());
        self
    }

    pub fn api_key_from_env(mut self, var_name: &str) -> Self {
        if let Ok(value) = std::env::var(var_name) {
            self.api_key = Some(value);
        }
        self
    }

    pub fn base_url(mut self, value: impl Into<String>) -> Self {
        self.base_url = value.into();
        self
    }

    pub fn model(mut self, value: impl Into<String>) -> Self {
        self.model = value.into();
        self
    }

    pub fn timeout(mut self, value: Duration) -> Self {
        self.timeout = value;
        self
    }

    /// Sent as `HTTP-Referer`, OpenRouter's app attribution header.
    pub fn referer(mut self, value: impl Into<String>) -> Self {
        self.referer = Some(value.into());
        self
    }

    /// Sent as `X-Title`.
    pub fn title(mut self, value: impl Into<String>) -> Self {
        self.title = Some(value.into());
        self
    }

    pub fn build(self) -> Result<OpenRouterClient, CoachError> {
        let api_key = self
            .api_key
            .ok_or_else(|| CoachError::InvalidConfig("api_key is required".to_string()))?;

        let mut builder = OpenAiCompatibleClient::builder()
            .base_url(&self.base_url)?
            .api_key(api_key)
            .default_model(self.model)
            .timeout(self.timeout);
        if let Some(referer) = self.referer {
            builder = builder.header("HTTP-Referer", referer);
        }
        if let Some(title) = self.title {
            builder = builder.header("X-Title", title);
        }

        Ok(OpenRouterClient(builder.build()?))
    }
}

#[async_trait::async_trait]
impl ChatModel for OpenRouterClient {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, CoachError> {
        self.0.complete(request).await
    }
}
