//! Generic OpenAI-compatible LLM client
//!
//! Supports any provider using OpenAI's API format (OpenAI, OpenRouter, Together, etc.)

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use url::Url;

use datecoach_core::{ChatModel, ChatRequest, ChatResponse, CoachError, Message, TokenUsage};

/// Request body for chat completions endpoint
#[derive(Serialize, Debug, Clone)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    pub stream: bool,
}

/// Non-streaming response from chat completions
#[derive(Deserialize, Debug, Clone)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ResponseMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// OpenAI-style error response
#[derive(Deserialize, Debug, Clone)]
pub struct OpenAiError {
    pub error: ErrorDetail,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
}

#[derive(Clone)]
pub struct OpenAiCompatibleClient {
    http: Client,
    base_url: String,
    api_key: SecretString,
    default_model: String,
    timeout: Duration,
    headers: Vec<(String, String)>,
}

impl fmt::Debug for OpenAiCompatibleClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiCompatibleClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("default_model", &self.default_model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Default)]
pub struct OpenAiCompatibleBuilder {
    base_url: Option<Url>,
    api_key: Option<SecretString>,
    default_model: Option<String>,
    timeout: Option<Duration>,
    headers: Vec<(String, String)>,
}

impl OpenAiCompatibleBuilder {
    pub fn base_url(mut self, value: &str) -> Result<Self, CoachError> {
        let url = Url::parse(value)
            .map_err(|err| CoachError::InvalidConfig(format!("invalid base_url: {err}")))?;
        self.base_url = Some(url);
        Ok(self)
    }

    pub fn api_key(mut self, value: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(value.into()));
        self
    }

    pub fn default_model(mut self, value: impl Into<String>) -> Self {
        self.default_model = Some(value.into());
        self
    }

    pub fn timeout(mut self, value: Duration) -> Self {
        self.timeout = Some(value);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn build(self) -> Result<OpenAiCompatibleClient, CoachError> {
        let base_url = self
            .base_url
            .ok_or_else(|| CoachError::InvalidConfig("base_url is required".to_string()))?;
        let api_key = self
            .api_key
            .ok_or_else(|| CoachError::InvalidConfig("api_key is required".to_string()))?;
        if api_key.expose_secret().trim().is_empty() {
            return Err(CoachError::InvalidConfig(
                "api_key cannot be empty".to_string(),
            ));
        }
        let default_model = self
            .default_model
            .ok_or_else(|| CoachError::InvalidConfig("default_model is required".to_string()))?;
        let timeout = self.timeout.unwrap_or(Duration::from_secs(60));

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| CoachError::LlmProvider(err.to_string()))?;

        Ok(OpenAiCompatibleClient {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            api_key,
            default_model,
            timeout,
            headers: self.headers,
        })
    }
}

impl OpenAiCompatibleClient {
    pub fn builder() -> OpenAiCompatibleBuilder {
        OpenAiCompatibleBuilder::default()
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub fn set_default_model(&mut self, model: impl Into<String>) {
        self.default_model = model.into();
    }

    fn map_transport_error(&self, err: reqwest::Error) -> CoachError {
        if err.is_timeout() {
            CoachError::Timeout(self.timeout)
        } else {
            CoachError::LlmProvider(err.to_string())
        }
    }
}

#[async_trait::async_trait]
impl ChatModel for OpenAiCompatibleClient {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, CoachError> {
        let ChatRequest {
            model,
            messages,
            temperature,
            max_tokens,
        } = request;
        let model = if model.is_empty() {
            self.default_model.clone()
        } else {
            model
        };
        let body = ChatCompletionRequest {
            model,
            messages,
            temperature,
            max_tokens,
            stream: false,
        };

        let url = format!("{}/chat/completions", self.base_url);
        let mut builder = self
            .http
            .post(url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body);
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|err| self.map_transport_error(err))?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OpenAiError>(&raw)
                .map(|parsed| parsed.error.message)
                .unwrap_or(raw);
            tracing::warn!(
                status = status.as_u16(),
                model = %body.model,
                "chat completion request rejected"
            );
            return Err(CoachError::LlmProvider(format!(
                "status {}: {message}",
                status.as_u16()
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| CoachError::LlmProvider(format!("malformed response: {err}")))?;

        let choice = completion.choices.into_iter().next().ok_or_else(|| {
            CoachError::LlmProvider("response contained no choices".to_string())
        })?;

        Ok(ChatResponse {
            content: choice.message.content.unwrap_or_default(),
            model: completion.model,
            usage: completion.usage.map(|usage| TokenUsage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
                total_tokens: usage.total_tokens,
            }),
        })
    }
}
