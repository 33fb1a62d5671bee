use std::fmt;

use secrecy::SecretString;
use thiserror::Error;
use tracing::{info, warn};

use datecoach_llm::{DEFAULT_MODEL, OPENROUTER_BASE_URL};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub app_env: String,
    pub redis_url: Option<String>,
    pub database_url: Option<String>,
    pub openrouter_api_key: SecretString,
    pub openrouter_base_url: String,
    pub openrouter_model: String,
    pub public_base_url: Option<String>,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("port", &self.port)
            .field("app_env", &self.app_env)
            .field("redis_url", &self.redis_url.as_ref().map(|_| "<set>"))
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("openrouter_api_key", &"<redacted>")
            .field("openrouter_base_url", &self.openrouter_base_url)
            .field("openrouter_model", &self.openrouter_model)
            .field("public_base_url", &self.public_base_url)
            .finish()
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw.trim().parse().map_err(|err: std::num::ParseIntError| {
                ConfigError::Invalid {
                    key: "PORT",
                    value: raw.clone(),
                    reason: err.to_string(),
                }
            })?,
            None => {
                info!("PORT not set, using default: 3000");
                3000
            }
        };

        let openrouter_api_key = var("OPENROUTER_API_KEY")
            .map(SecretString::new)
            .ok_or(ConfigError::Missing("OPENROUTER_API_KEY"))?;

        let redis_url = var("REDIS_URL");
        if redis_url.is_none() {
            warn!("REDIS_URL not set, cache and rate limits stay in process memory");
        }
        let database_url = var("DATABASE_URL");
        if database_url.is_none() {
            warn!("DATABASE_URL not set, chat exchanges are only traced");
        }

        Ok(Self {
            port,
            app_env: var("APP_ENV").unwrap_or_else(|| "development".to_string()),
            redis_url,
            database_url,
            openrouter_api_key,
            openrouter_base_url: var("OPENROUTER_BASE_URL")
                .unwrap_or_else(|| OPENROUTER_BASE_URL.to_string()),
            openrouter_model: var("OPENROUTER_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            public_base_url: var("PUBLIC_BASE_URL"),
        })
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_api_key_is_set() {
        let config =
            ServerConfig::from_lookup(lookup(&[("OPENROUTER_API_KEY", "sk-test")])).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.app_env, "development");
        assert!(!config.is_production());
        assert_eq!(config.openrouter_model, DEFAULT_MODEL);
        assert_eq!(config.openrouter_base_url, OPENROUTER_BASE_URL);
        assert_eq!(config.openrouter_api_key.expose_secret(), "sk-test");
        assert!(config.redis_url.is_none());
        assert!(config.database_url.is_none());
    }

    #[test]
    fn api_key_is_required() {
        let err = ServerConfig::from_lookup(lookup(&[("OPENROUTER_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("OPENROUTER_API_KEY")));
    }

    #[test]
    fn invalid_port_is_reported() {
        let err = ServerConfig::from_lookup(lookup(&[
            ("OPENROUTER_API_KEY", "sk"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("OPENROUTER_API_KEY", "sk-very-secret"),
            ("DATABASE_URL", "postgres://user:pw@db/app"),
            ("APP_ENV", "production"),
        ]))
        .unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-very-secret"));
        assert!(!rendered.contains("pw@db"));
        assert!(config.is_production());
    }
}
