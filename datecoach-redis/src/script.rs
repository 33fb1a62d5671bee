use fred::interfaces::LuaInterface;
use fred::prelude::*;
use fred::types::FromRedis;
use tokio::sync::RwLock;

pub const LUA_SLIDING_WINDOW: &str = r#"
-- KEYS[1] = ratelimit:{identifier}
-- ARGV[1] = now (ms)
-- ARGV[2] = window (ms)
-- ARGV[3] = unique member for this request
local now = tonumber(ARGV[1])
local window = tonumber(ARGV[2])
redis.call('ZREMRANGEBYSCORE', KEYS[1], 0, now - window)
local count = redis.call('ZCARD', KEYS[1])
redis.call('ZADD', KEYS[1], now, ARGV[3])
redis.call('PEXPIRE', KEYS[1], window * 2)
local oldest = redis.call('ZRANGE', KEYS[1], 0, 0, 'WITHSCORES')
local oldest_score = now
if oldest[2] then
  oldest_score = tonumber(oldest[2])
end
return {count, oldest_score}
"#;

/// A Lua script addressed by SHA, loaded on first use and reloaded when the
/// server answers `NOSCRIPT` (after a restart or `SCRIPT FLUSH`).
#[derive(Debug)]
pub(crate) struct LoadedScript {
    source: &'static str,
    sha: RwLock<Option<String>>,
}

impl LoadedScript {
    pub(crate) fn new(source: &'static str) -> Self {
        Self {
            source,
            sha: RwLock::new(None),
        }
    }

    async fn load(&self, client: &RedisClient) -> Result<String, RedisError> {
        let sha = client.script_load::<String, _>(self.source).await?;
        *self.sha.write().await = Some(sha.clone());
        Ok(sha)
    }

    pub(crate) async fn eval<R>(
        &self,
        client: &RedisClient,
        keys: Vec<String>,
        args: Vec<String>,
    ) -> Result<R, RedisError>
    where
        R: FromRedis,
    {
        let existing = self.sha.read().await.clone();
        let sha = match existing {
            Some(sha) => sha,
            None => self.load(client).await?,
        };

        match client
            .evalsha::<R, _, _, _>(sha, keys.clone(), args.clone())
            .await
        {
            Ok(value) => Ok(value),
            Err(error) if error.to_string().to_ascii_uppercase().contains("NOSCRIPT") => {
                tracing::debug!("lua script missing on server, reloading");
                let sha = self.load(client).await?;
                client.evalsha::<R, _, _, _>(sha, keys, args).await
            }
            Err(error) => Err(error),
        }
    }
}
