use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use datecoach_cache::CacheStats;
use datecoach_chatbot::{entries, ChatInput, ChatReply, Intent, QuickReply};
use datecoach_core::HealthCheck;
use datecoach_redis::{ConnectionHealth, RedisMetrics};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatbotRequest {
    #[serde(default)]
    pub message: String,
    pub payload: Option<String>,
    pub session_token: Option<String>,
    pub channel: Option<String>,
    pub user_identifier: Option<String>,
}

impl From<ChatbotRequest> for ChatInput {
    fn from(request: ChatbotRequest) -> Self {
        ChatInput {
            message: request.message,
            payload: request.payload,
            session_token: request.session_token,
            channel: request.channel,
            user_identifier: request.user_identifier,
        }
    }
}

pub async fn chatbot(
    State(state): State<AppState>,
    body: Result<Json<ChatbotRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let Json(request) = body?;
    let reply = state.engine.respond(request.into()).await?;
    Ok(Json(reply))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeBaseItem {
    pub id: &'static str,
    pub category: &'static str,
    pub intent: Intent,
    pub question: &'static str,
    pub quick_replies: &'static [QuickReply],
}

pub async fn knowledge_base() -> Json<Vec<KnowledgeBaseItem>> {
    let items = entries()
        .iter()
        .map(|entry| KnowledgeBaseItem {
            id: entry.id,
            category: entry.category,
            intent: entry.intent,
            question: entry.question,
            quick_replies: entry.quick_replies,
        })
        .collect();
    Json(items)
}

#[derive(Debug, Serialize)]
pub struct RedisStatus {
    pub configured: bool,
    pub health: ConnectionHealth,
    pub metrics: RedisMetrics,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub redis: RedisStatus,
    pub cache: CacheStats,
}

/// `degraded` only when Redis is configured but unusable; a deployment
/// without Redis runs on its memory tiers and reports `ok`.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let configured = state.redis.is_configured();
    let status = if !configured || state.redis.is_healthy() {
        "ok"
    } else {
        "degraded"
    };
    Json(HealthResponse {
        status,
        redis: RedisStatus {
            configured,
            health: state.redis.health(),
            metrics: state.redis.metrics(),
        },
        cache: state.cache.stats(),
    })
}
