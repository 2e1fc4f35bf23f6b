//! Storage contract for reminders

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::model::Reminder;

/// Durable reminder table: append and exact-minute lookup only
#[async_trait]
pub trait ReminderRepository: Send + Sync {
    /// Persist a reminder, returning it with its assigned id
    async fn save(&self, reminder: &Reminder) -> Result<Reminder>;

    /// All reminders whose notification time equals `time` exactly, ordered by id
    async fn find_by_notification_time(&self, time: NaiveDateTime) -> Result<Vec<Reminder>>;
}
