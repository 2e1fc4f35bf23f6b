//! Telegram Bot API client
//!
//! Long-polls `getUpdates` and posts `sendMessage` as JSON over `reqwest`.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use super::types::{ApiResponse, GetUpdatesRequest, SendMessageRequest};
use super::{ParseMode, Transport, Update};
use crate::core::chunk_for_message;
use crate::core::Config;

/// Only plain messages are routed to the bot
const ALLOWED_UPDATES: &[&str] = &["message"];

/// Extra time on top of the long-poll timeout before the HTTP request gives up
const REQUEST_GRACE_SECS: u64 = 10;

pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
    poll_timeout_secs: u64,
}

impl TelegramClient {
    pub fn new(api_url: &str, token: &str, poll_timeout_secs: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(poll_timeout_secs + REQUEST_GRACE_SECS))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(TelegramClient {
            http,
            base_url: format!("{}/bot{}", api_url.trim_end_matches('/'), token),
            poll_timeout_secs,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.telegram_api_url,
            &config.telegram_token,
            config.poll_timeout_secs,
        )
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }

    async fn call<B, T>(&self, method: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            .with_context(|| format!("Telegram {method} request failed"))?;

        let envelope: ApiResponse<T> = response
            .json()
            .await
            .with_context(|| format!("Failed to decode Telegram {method} response"))?;

        unwrap_response(method, envelope)
    }
}

/// Turn an API envelope into its result or an error carrying the API description
fn unwrap_response<T>(method: &str, envelope: ApiResponse<T>) -> Result<T> {
    if !envelope.ok {
        return Err(anyhow!(
            "Telegram {} failed ({}): {}",
            method,
            envelope
                .error_code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "no code".to_string()),
            envelope
                .description
                .unwrap_or_else(|| "no description".to_string())
        ));
    }
    envelope
        .result
        .ok_or_else(|| anyhow!("Telegram {method} returned ok without a result"))
}

#[async_trait]
impl Transport for TelegramClient {
    async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>> {
        let request = GetUpdatesRequest {
            offset,
            timeout: self.poll_timeout_secs,
            allowed_updates: ALLOWED_UPDATES,
        };
        let updates: Vec<Update> = self.call("getUpdates", &request).await?;
        if !updates.is_empty() {
            debug!("Received {} update(s) (offset {offset:?})", updates.len());
        }
        Ok(updates)
    }

    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        parse_mode: Option<ParseMode>,
    ) -> Result<()> {
        // Markup replies are short fixed texts; only plain text can be split safely
        let parts = match parse_mode {
            Some(_) => vec![text.to_string()],
            None => chunk_for_message(text),
        };

        for part in &parts {
            let request = SendMessageRequest {
                chat_id,
                text: part.as_str(),
                parse_mode,
            };
            let _: serde_json::Value = self.call("sendMessage", &request).await?;
        }
        debug!("Sent {} message part(s) to chat {chat_id}", parts.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_url() {
        let client = TelegramClient::new("https://api.telegram.org/", "123:abc", 30).unwrap();
        assert_eq!(
            client.method_url("sendMessage"),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn test_unwrap_ok_response() {
        let envelope = ApiResponse {
            ok: true,
            result: Some(vec![1, 2]),
            description: None,
            error_code: None,
        };
        assert_eq!(unwrap_response("getUpdates", envelope).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_unwrap_error_response() {
        let envelope: ApiResponse<serde_json::Value> = ApiResponse {
            ok: false,
            result: None,
            description: Some("Forbidden: bot was blocked by the user".to_string()),
            error_code: Some(403),
        };
        let err = unwrap_response("sendMessage", envelope).unwrap_err().to_string();
        assert!(err.contains("sendMessage"));
        assert!(err.contains("403"));
        assert!(err.contains("blocked"));
    }

    #[test]
    fn test_ok_without_result_is_error() {
        let envelope: ApiResponse<bool> = ApiResponse {
            ok: true,
            result: None,
            description: None,
            error_code: None,
        };
        assert!(unwrap_response("sendMessage", envelope).is_err());
    }
}
