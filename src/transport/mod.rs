//! # Transport Module
//!
//! Chat gateway used to receive updates and send replies. The bot talks to the
//! Telegram Bot API; everything above this module only sees the [`Transport`]
//! trait.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod telegram;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;

use anyhow::Result;
use async_trait::async_trait;

pub use telegram::TelegramClient;
pub use types::{Chat, Message, ParseMode, Update};

/// Send/receive interface of the messaging gateway
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch pending updates. Passing `last_update_id + 1` as `offset`
    /// acknowledges every earlier update.
    async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>>;

    /// Send `text` to `chat_id`, optionally interpreted as rich text
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        parse_mode: Option<ParseMode>,
    ) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn Transport) {}
}
