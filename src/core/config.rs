//! Environment-driven bot configuration
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::{anyhow, Context, Result};
use std::fmt;

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_DATABASE_PATH: &str = "reminders.db";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct Config {
    pub telegram_token: String,
    pub telegram_api_url: String,
    pub database_path: String,
    pub log_level: String,
    pub poll_timeout_secs: u64,
}

impl Config {
    /// Build config from the process environment (call `dotenvy::dotenv()` first)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let telegram_token = non_empty("TELEGRAM_BOT_TOKEN")
            .ok_or_else(|| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        let telegram_api_url = non_empty("TELEGRAM_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let database_path =
            non_empty("DATABASE_PATH").unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string());
        let log_level = non_empty("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let poll_timeout_secs = match non_empty("POLL_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("POLL_TIMEOUT_SECS is not a number: {raw}"))?,
            None => DEFAULT_POLL_TIMEOUT_SECS,
        };

        Ok(Config {
            telegram_token,
            telegram_api_url,
            database_path,
            log_level,
            poll_timeout_secs,
        })
    }
}

// Keep the token out of logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("telegram_token", &"<redacted>")
            .field("telegram_api_url", &self.telegram_api_url)
            .field("database_path", &self.database_path)
            .field("log_level", &self.log_level)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .finish()
    }
}
