//! HTTP surface for the datecoach chatbot.
//!
//! [`build_router`] assembles the routes, rate-limit middleware and body
//! limit around an [`AppState`]. [`run`] wires the Redis manager, cache,
//! limiter, chat logger and OpenRouter client from a [`ServerConfig`] and
//! serves until Ctrl+C or SIGTERM.

mod client_ip;
pub mod config;
mod error;
mod middleware;
mod routes;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use secrecy::ExposeSecret;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use datecoach_cache::{AiResponseCache, CachedChatModel};
use datecoach_chatbot::{ChatLogger, ChatbotEngine, TracingChatLogger};
use datecoach_chatlog_postgres::PostgresChatLogger;
use datecoach_llm::OpenRouterClient;
use datecoach_ratelimit::{MemoryRateLimiter, RateLimiter};
use datecoach_redis::{
    RedisCacheBackend, RedisConnectionManager, RedisManagerConfig, RedisRateLimitBackend,
};

pub use client_ip::client_ip;
pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ServerError, GENERIC_ERROR_MESSAGE};
pub use routes::{ChatbotRequest, HealthResponse, KnowledgeBaseItem};
pub use state::AppState;

pub const BODY_LIMIT_BYTES: usize = 64 * 1024;
const MEMORY_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/chatbot", post(routes::chatbot))
        .route("/api/chatbot/knowledge-base", get(routes::knowledge_base))
        .route("/api/health", get(routes::health))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit,
        ))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn connect_redis(config: &ServerConfig) -> Arc<RedisConnectionManager> {
    let Some(url) = config.redis_url.as_deref() else {
        return RedisConnectionManager::disconnected();
    };
    match RedisConnectionManager::connect(url, RedisManagerConfig::default()).await {
        Ok(manager) => {
            info!("redis connected");
            manager
        }
        Err(err) => {
            warn!(error = %err, "redis unavailable, using memory fallbacks");
            RedisConnectionManager::disconnected()
        }
    }
}

async fn chat_logger(config: &ServerConfig) -> Arc<dyn ChatLogger> {
    let Some(url) = config.database_url.as_deref() else {
        return Arc::new(TracingChatLogger);
    };
    match PostgresChatLogger::builder(url).build().await {
        Ok(logger) => Arc::new(logger),
        Err(err) => {
            warn!(error = %err, "chat log database unavailable, logging to tracing only");
            Arc::new(TracingChatLogger)
        }
    }
}

/// Builds the application state from configuration and starts background
/// tasks (memory limiter sweep, Redis health pings in production).
pub async fn build_state(config: &ServerConfig) -> Result<AppState, ServerError> {
    let redis = connect_redis(config).await;
    if config.is_production() && redis.is_configured() {
        redis.spawn_health_monitor();
    }

    let cache = Arc::new(
        AiResponseCache::builder()
            .redis(Arc::new(RedisCacheBackend::new(redis.clone())), redis.clone())
            .build(),
    );

    let memory = Arc::new(MemoryRateLimiter::new());
    memory.spawn_cleanup(MEMORY_SWEEP_INTERVAL);
    let limiter = Arc::new(
        RateLimiter::builder()
            .shared(Arc::new(RedisRateLimitBackend::new(redis.clone())), redis.clone())
            .memory(memory)
            .build(),
    );

    let mut client = OpenRouterClient::builder()
        .api_key(config.openrouter_api_key.expose_secret().as_str())
        .base_url(&config.openrouter_base_url)
        .model(&config.openrouter_model);
    if let Some(referer) = config.public_base_url.as_deref() {
        client = client.referer(referer);
    }
    let model = CachedChatModel::new(client.build()?, cache.clone());

    let engine = ChatbotEngine::builder(Arc::new(model))
        .model_name(&config.openrouter_model)
        .logger(chat_logger(config).await)
        .build();

    Ok(AppState::new(Arc::new(engine), limiter, cache, redis))
}

pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let state = build_state(&config).await?;
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, env = %config.app_env, "datecoach server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
