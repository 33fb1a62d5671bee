use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use datecoach_chatbot::{ChatLogRecord, ChatLogger};
use datecoach_core::{CoachError, RetryPolicy};

use crate::error::ChatLogError;
use crate::retry::execute_with_retry;
use crate::schema::{INSERT_MESSAGE_SQL, SCHEMA_STATEMENTS_SQL, UPSERT_SESSION_SQL};

#[derive(Debug, Clone)]
pub struct PostgresChatLogger {
    pool: PgPool,
    retry: RetryPolicy,
}

#[derive(Debug, Clone)]
pub struct PostgresChatLoggerBuilder {
    database_url: String,
    max_connections: u32,
    min_connections: u32,
    acquire_timeout: Duration,
    retry: RetryPolicy,
}

impl PostgresChatLogger {
    pub fn builder(database_url: impl Into<String>) -> PostgresChatLoggerBuilder {
        PostgresChatLoggerBuilder {
            database_url: database_url.into(),
            max_connections: 5,
            min_connections: 0,
            acquire_timeout: Duration::from_secs(5),
            retry: RetryPolicy::default(),
        }
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            pool,
            retry: RetryPolicy::default(),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates both tables if they do not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), ChatLogError> {
        let pool = &self.pool;
        for statement in SCHEMA_STATEMENTS_SQL {
            execute_with_retry(self.retry, move || async move {
                sqlx::query(statement).execute(pool).await
            })
            .await
            .map_err(ChatLogError::Schema)?;
        }
        Ok(())
    }

    /// Upserts the session by token and appends one message row. Returns the
    /// session's row id.
    pub async fn write(&self, record: &ChatLogRecord) -> Result<i32, ChatLogError> {
        self.ensure_schema().await?;

        let pool = &self.pool;
        let session_id: i32 = execute_with_retry(self.retry, move || async move {
            sqlx::query_scalar::<_, i32>(UPSERT_SESSION_SQL)
                .bind(record.session_token.as_str())
                .bind(record.channel.as_str())
                .bind(record.user_identifier.as_deref())
                .fetch_one(pool)
                .await
        })
        .await
        .map_err(ChatLogError::Query)?;

        let message_id = record.message_id.to_string();
        let intent = record.intent.as_str();
        let metadata = serde_json::to_string(&record.metadata)?;
        let (message_id, metadata) = (message_id.as_str(), metadata.as_str());
        execute_with_retry(self.retry, move || async move {
            sqlx::query(INSERT_MESSAGE_SQL)
                .bind(session_id)
                .bind(message_id)
                .bind(intent)
                .bind(record.confidence)
                .bind(record.question.as_str())
                .bind(record.answer.as_str())
                .bind(metadata)
                .execute(pool)
                .await
        })
        .await
        .map_err(ChatLogError::Query)?;

        tracing::debug!(
            session_id,
            message_id = %record.message_id,
            intent,
            "chatbot message logged"
        );
        Ok(session_id)
    }
}

impl PostgresChatLoggerBuilder {
    pub fn max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn min_connections(mut self, min_connections: u32) -> Self {
        self.min_connections = min_connections;
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub async fn build(self) -> Result<PostgresChatLogger, ChatLogError> {
        let pool = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.acquire_timeout)
            .connect(&self.database_url)
            .await
            .map_err(ChatLogError::Connection)?;

        let logger = PostgresChatLogger {
            pool,
            retry: self.retry,
        };
        logger.ensure_schema().await?;
        Ok(logger)
    }
}

#[async_trait]
impl ChatLogger for PostgresChatLogger {
    async fn log(&self, record: &ChatLogRecord) -> Result<(), CoachError> {
        self.write(record).await?;
        Ok(())
    }
}
