//! Recording transport for tests

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use super::{ParseMode, Transport, Update};

#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    pub chat_id: i64,
    pub text: String,
    pub parse_mode: Option<ParseMode>,
}

/// Records every send; fails sends to chats listed in `failing_chats`
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<SentMessage>>,
    attempts: Mutex<Vec<i64>>,
    failing_chats: Mutex<HashSet<i64>>,
    batches: Mutex<VecDeque<Result<Vec<Update>>>>,
    offsets: Mutex<Vec<Option<i64>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_for(&self, chat_id: i64) {
        self.failing_chats.lock().unwrap().insert(chat_id);
    }

    pub fn push_batch(&self, batch: Vec<Update>) {
        self.batches.lock().unwrap().push_back(Ok(batch));
    }

    pub fn push_poll_error(&self, message: &str) {
        self.batches
            .lock()
            .unwrap()
            .push_back(Err(anyhow!(message.to_string())));
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// Chat ids of every send attempt, including failed ones
    pub fn attempts(&self) -> Vec<i64> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn offsets(&self) -> Vec<Option<i64>> {
        self.offsets.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>> {
        self.offsets.lock().unwrap().push(offset);
        let next = self.batches.lock().unwrap().pop_front();
        match next {
            Some(batch) => batch,
            None => {
                // Behave like an idle long poll
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                Ok(vec![])
            }
        }
    }

    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        parse_mode: Option<ParseMode>,
    ) -> Result<()> {
        self.attempts.lock().unwrap().push(chat_id);
        if self.failing_chats.lock().unwrap().contains(&chat_id) {
            return Err(anyhow!("Bad Request: chat not found"));
        }
        self.sent.lock().unwrap().push(SentMessage {
            chat_id,
            text: text.to_string(),
            parse_mode,
        });
        Ok(())
    }
}
