use anyhow::{Context, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,

    // Storage (in-memory when unset)
    pub database_url: Option<String>,
    pub redis_url: Option<String>,

    // OpenAI
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_api_url: String,

    // Translation targets, e.g. ["hi", "bn"]
    pub languages: Vec<String>,

    // View cache
    pub cache_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup (the environment in production,
    /// a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            // Server
            port: match non_empty("PORT") {
                Some(v) => v.parse().with_context(|| format!("PORT is not a valid port: {}", v))?,
                None => 8080,
            },

            // Storage
            database_url: non_empty("DATABASE_URL"),
            redis_url: non_empty("REDIS_URL"),

            // OpenAI
            openai_api_key: non_empty("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?,
            openai_model: non_empty("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string()),
            openai_api_url: non_empty("OPENAI_API_URL")
                .unwrap_or_else(|| "https://api.openai.com/v1/chat/completions".to_string()),

            // Translation targets
            languages: non_empty("FAQ_LANGUAGES")
                .unwrap_or_else(|| "hi,bn".to_string())
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),

            // View cache
            cache_ttl_secs: match non_empty("CACHE_TTL_SECS") {
                Some(v) => v
                    .parse()
                    .with_context(|| format!("CACHE_TTL_SECS is not a number of seconds: {}", v))?,
                None => 3600,
            },
        })
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
