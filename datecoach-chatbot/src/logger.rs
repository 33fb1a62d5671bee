use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use datecoach_core::CoachError;

use crate::intent::Intent;

/// One question/answer exchange as written to the audit log.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatLogRecord {
    pub session_token: String,
    pub channel: String,
    pub user_identifier: Option<String>,
    pub message_id: Uuid,
    pub intent: Intent,
    pub confidence: f32,
    pub question: String,
    pub answer: String,
    pub metadata: serde_json::Value,
}

#[async_trait]
pub trait ChatLogger: Send + Sync + 'static {
    async fn log(&self, record: &ChatLogRecord) -> Result<(), CoachError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopChatLogger;

#[async_trait]
impl ChatLogger for NoopChatLogger {
    async fn log(&self, _record: &ChatLogRecord) -> Result<(), CoachError> {
        Ok(())
    }
}

/// Writes records to the `tracing` subscriber at debug level. Used when no
/// database is configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingChatLogger;

#[async_trait]
impl ChatLogger for TracingChatLogger {
    async fn log(&self, record: &ChatLogRecord) -> Result<(), CoachError> {
        tracing::debug!(
            session_token = %record.session_token,
            message_id = %record.message_id,
            channel = %record.channel,
            intent = %record.intent,
            confidence = record.confidence,
            question_chars = record.question.chars().count(),
            "chatbot exchange"
        );
        Ok(())
    }
}
