use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use datecoach_core::{ChatModel, ChatRequest, CoachError, Message};

use crate::intent::Intent;
use crate::knowledge_base::{categories, find_entry, QuickReply};
use crate::logger::{ChatLogRecord, ChatLogger, NoopChatLogger};
use crate::matcher::{match_intent, IntentMatch, MatchSource};

pub const MAX_MESSAGE_CHARS: usize = 1000;
pub const KB_CONFIDENCE: f32 = 0.95;
pub const AI_CONFIDENCE: f32 = 0.6;

const LLM_MAX_TOKENS: u32 = 250;
const LLM_TEMPERATURE: f32 = 0.3;
const DEFAULT_CHANNEL: &str = "web";

#[derive(Clone, Debug, Default)]
pub struct ChatInput {
    pub message: String,
    pub payload: Option<String>,
    pub session_token: Option<String>,
    pub channel: Option<String>,
    pub user_identifier: Option<String>,
}

impl ChatInput {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub message_id: Uuid,
    pub session_token: String,
    pub intent: Intent,
    pub confidence: f32,
    pub reply: String,
    pub quick_replies: Vec<QuickReply>,
    /// How the knowledge-base entry was found; `None` for model answers.
    pub source: Option<MatchSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<&'static str>,
}

pub struct ChatbotEngine {
    model: Arc<dyn ChatModel>,
    model_name: String,
    logger: Arc<dyn ChatLogger>,
    system_prompt: String,
}

pub struct ChatbotEngineBuilder {
    model: Arc<dyn ChatModel>,
    model_name: String,
    logger: Arc<dyn ChatLogger>,
}

impl ChatbotEngineBuilder {
    /// Model id sent with each request. Empty means the client's default.
    pub fn model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = name.into();
        self
    }

    pub fn logger(mut self, logger: Arc<dyn ChatLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn build(self) -> ChatbotEngine {
        ChatbotEngine {
            model: self.model,
            model_name: self.model_name,
            logger: self.logger,
            system_prompt: system_prompt(),
        }
    }
}

fn system_prompt() -> String {
    format!(
        "Je bent de DatingAssistent, een vriendelijke Nederlandstalige datingcoach. \
         Geef korte, concrete en respectvolle adviezen in eenvoudige taal. \
         Je helpt met onderwerpen als: {}. \
         Verwijs bij vragen over account, betalingen of privacy naar support@datingassistent.nl. \
         Geef geen medisch of juridisch advies en moedig nooit onveilig gedrag aan.",
        categories().join(", ")
    )
}

impl ChatbotEngine {
    pub fn builder(model: Arc<dyn ChatModel>) -> ChatbotEngineBuilder {
        ChatbotEngineBuilder {
            model,
            model_name: String::new(),
            logger: Arc::new(NoopChatLogger),
        }
    }

    fn validate(input: &ChatInput) -> Result<(), CoachError> {
        let message = input.message.trim();
        let has_payload = input
            .payload
            .as_deref()
            .is_some_and(|payload| !payload.trim().is_empty());
        if message.is_empty() && !has_payload {
            return Err(CoachError::InvalidInput("message must not be empty".to_string()));
        }
        if input.message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(CoachError::InvalidInput(format!(
                "message exceeds {MAX_MESSAGE_CHARS} characters"
            )));
        }
        Ok(())
    }

    pub async fn respond(&self, input: ChatInput) -> Result<ChatReply, CoachError> {
        Self::validate(&input)?;

        let message = input.message.trim();
        let session_token = input
            .session_token
            .clone()
            .filter(|token| !token.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let message_id = Uuid::new_v4();

        let matched = match_intent(message, input.payload.as_deref());
        let reply = match matched {
            Some(found) => Self::knowledge_base_reply(found, message_id, session_token),
            None if message.is_empty() => {
                return Err(CoachError::InvalidInput(
                    "unknown quick reply payload".to_string(),
                ));
            }
            None => self.model_reply(message, message_id, session_token).await?,
        };

        tracing::info!(
            message_id = %reply.message_id,
            intent = %reply.intent,
            source = ?reply.source,
            "chatbot replied"
        );
        self.spawn_log(&input, &reply);
        Ok(reply)
    }

    fn knowledge_base_reply(
        found: IntentMatch,
        message_id: Uuid,
        session_token: String,
    ) -> ChatReply {
        ChatReply {
            message_id,
            session_token,
            intent: found.intent,
            confidence: KB_CONFIDENCE,
            reply: found.entry.answer.to_string(),
            quick_replies: found.entry.quick_replies.to_vec(),
            source: Some(found.source),
            entry_id: Some(found.entry.id),
        }
    }

    async fn model_reply(
        &self,
        message: &str,
        message_id: Uuid,
        session_token: String,
    ) -> Result<ChatReply, CoachError> {
        let request = ChatRequest::new(
            self.model_name.clone(),
            vec![
                Message::system(self.system_prompt.clone()),
                Message::user(message),
            ],
        )
        .with_max_tokens(LLM_MAX_TOKENS)
        .with_temperature(LLM_TEMPERATURE);

        let response = self.model.complete(request).await?;
        let content = response.content.trim();
        if content.is_empty() {
            return Err(CoachError::LlmProvider("model returned an empty answer".to_string()));
        }

        Ok(ChatReply {
            message_id,
            session_token,
            intent: Intent::Ai,
            confidence: AI_CONFIDENCE,
            reply: content.to_string(),
            quick_replies: Vec::new(),
            source: None,
            entry_id: None,
        })
    }

    fn spawn_log(&self, input: &ChatInput, reply: &ChatReply) {
        let question = if input.message.trim().is_empty() {
            reply
                .entry_id
                .and_then(find_entry)
                .map(|entry| entry.question.to_string())
                .unwrap_or_default()
        } else {
            input.message.trim().to_string()
        };
        let record = ChatLogRecord {
            session_token: reply.session_token.clone(),
            channel: input
                .channel
                .clone()
                .unwrap_or_else(|| DEFAULT_CHANNEL.to_string()),
            user_identifier: input.user_identifier.clone(),
            message_id: reply.message_id,
            intent: reply.intent,
            confidence: reply.confidence,
            question,
            answer: reply.reply.clone(),
            metadata: serde_json::json!({
                "source": reply.source,
                "entryId": reply.entry_id,
                "payload": input.payload,
            }),
        };

        let logger = Arc::clone(&self.logger);
        tokio::spawn(async move {
            if let Err(error) = logger.log(&record).await {
                tracing::warn!(
                    message_id = %record.message_id,
                    error = %error,
                    "failed to log chatbot exchange"
                );
            }
        });
    }
}
