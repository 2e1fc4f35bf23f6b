//! Long-poll loop feeding inbound updates to the service

use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;

use super::service::ReminderService;
use crate::transport::Transport;

/// Back-off after a failed poll
pub const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

pub struct UpdateListener {
    transport: Arc<dyn Transport>,
    service: Arc<ReminderService>,
    offset: Option<i64>,
    retry_delay: Duration,
}

impl UpdateListener {
    pub fn new(transport: Arc<dyn Transport>, service: Arc<ReminderService>) -> Self {
        Self {
            transport,
            service,
            offset: None,
            retry_delay: POLL_RETRY_DELAY,
        }
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Offset sent with the next poll (acknowledges everything before it)
    pub fn offset(&self) -> Option<i64> {
        self.offset
    }

    /// Fetch one batch, process it, and advance the offset past it
    pub async fn poll_once(&mut self) -> Result<usize> {
        let updates = self.transport.get_updates(self.offset).await?;
        if let Some(next) = self.service.handle_updates(&updates).await {
            self.offset = Some(next);
        }
        Ok(updates.len())
    }

    pub async fn run(mut self) {
        info!("Listening for updates");

        loop {
            if let Err(e) = self.poll_once().await {
                warn!(
                    "Polling for updates failed: {e:#}; retrying in {}s",
                    self.retry_delay.as_secs()
                );
                tokio::time::sleep(self.retry_delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use crate::features::reminders::replies;
    use crate::transport::mock::RecordingTransport;
    use crate::transport::Update;

    async fn setup() -> (UpdateListener, Arc<RecordingTransport>) {
        let db = Database::new(":memory:").await.unwrap();
        let transport = Arc::new(RecordingTransport::new());
        let service = ReminderService::new(Arc::new(db), transport.clone()).unwrap();
        let listener = UpdateListener::new(transport.clone(), Arc::new(service))
            .with_retry_delay(Duration::from_millis(1));
        (listener, transport)
    }

    #[tokio::test]
    async fn test_offset_advances_past_each_batch() {
        let (mut listener, transport) = setup().await;
        transport.push_batch(vec![Update::text(40, 1, "/start"), Update::text(41, 1, "hi")]);
        transport.push_batch(vec![Update::text(42, 2, "/start")]);

        assert_eq!(listener.poll_once().await.unwrap(), 2);
        assert_eq!(listener.offset(), Some(42));
        assert_eq!(listener.poll_once().await.unwrap(), 1);
        assert_eq!(listener.offset(), Some(43));

        assert_eq!(transport.offsets(), vec![None, Some(42)]);
        let texts: Vec<String> = transport.sent().into_iter().map(|m| m.text).collect();
        assert_eq!(
            texts,
            vec![replies::GREETING, replies::UNRECOGNIZED, replies::GREETING]
        );
    }

    #[tokio::test]
    async fn test_empty_poll_keeps_offset() {
        let (mut listener, transport) = setup().await;
        transport.push_batch(vec![Update::text(7, 1, "/start")]);
        transport.push_batch(vec![]);

        listener.poll_once().await.unwrap();
        assert_eq!(listener.poll_once().await.unwrap(), 0);
        assert_eq!(listener.offset(), Some(8));
    }

    #[tokio::test]
    async fn test_poll_error_keeps_offset() {
        let (mut listener, transport) = setup().await;
        transport.push_batch(vec![Update::text(3, 1, "/start")]);
        transport.push_poll_error("Bad Gateway");

        listener.poll_once().await.unwrap();
        assert!(listener.poll_once().await.is_err());
        assert_eq!(listener.offset(), Some(4));
    }
}
