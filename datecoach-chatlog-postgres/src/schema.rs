pub const SESSIONS_TABLE: &str = "chatbot_sessions";
pub const MESSAGES_TABLE: &str = "chatbot_messages";

pub const CREATE_SESSIONS_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS chatbot_sessions (\
    id SERIAL PRIMARY KEY,\
    session_token TEXT NOT NULL UNIQUE,\
    channel TEXT NOT NULL DEFAULT 'web',\
    user_identifier TEXT,\
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()\
)";

pub const CREATE_MESSAGES_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS chatbot_messages (\
    id SERIAL PRIMARY KEY,\
    session_id INTEGER NOT NULL REFERENCES chatbot_sessions(id),\
    message_id TEXT NOT NULL,\
    intent TEXT NOT NULL,\
    confidence REAL NOT NULL,\
    question TEXT NOT NULL,\
    answer TEXT NOT NULL,\
    metadata JSONB,\
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()\
)";

pub const SCHEMA_STATEMENTS_SQL: &[&str] = &[CREATE_SESSIONS_TABLE_SQL, CREATE_MESSAGES_TABLE_SQL];

pub const UPSERT_SESSION_SQL: &str = "INSERT INTO chatbot_sessions (session_token, channel, user_identifier) \
    VALUES ($1, $2, $3) \
    ON CONFLICT (session_token) DO UPDATE SET \
    user_identifier = COALESCE(EXCLUDED.user_identifier, chatbot_sessions.user_identifier) \
    RETURNING id";

pub const INSERT_MESSAGE_SQL: &str = "INSERT INTO chatbot_messages \
    (session_id, message_id, intent, confidence, question, answer, metadata) \
    VALUES ($1, $2, $3, $4, $5, $6, $7::jsonb)";
