//! Reminder lifecycle: inbound routing and the due sweep
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use log::{debug, error, info, warn};
use std::sync::Arc;

use super::model::{truncate_to_minute, Reminder};
use super::parser::ReminderParser;
use super::replies;
use super::repository::ReminderRepository;
use crate::transport::{ParseMode, Transport, Update};

/// Literal command that triggers the greeting
pub const START_COMMAND: &str = "/start";

/// Which reply class an inbound message was routed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Saved; carries the persisted reminder
    Scheduled(Reminder),
    /// Well-formed but not in the future; not saved
    PastDue,
    Greeting,
    Unrecognized,
}

/// Outcome of one due sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepReport {
    pub minute: NaiveDateTime,
    pub due: usize,
    pub delivered: usize,
    pub failed: usize,
}

pub struct ReminderService {
    parser: ReminderParser,
    repository: Arc<dyn ReminderRepository>,
    transport: Arc<dyn Transport>,
}

impl ReminderService {
    pub fn new(
        repository: Arc<dyn ReminderRepository>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        Ok(ReminderService {
            parser: ReminderParser::new()?,
            repository,
            transport,
        })
    }

    /// Process a batch of updates in order and return the offset acknowledging all of them
    ///
    /// A failing update is logged and does not stop the rest of the batch.
    pub async fn handle_updates(&self, updates: &[Update]) -> Option<i64> {
        for update in updates {
            debug!("Processing update {}", update.update_id);

            let Some(message) = &update.message else {
                debug!("Update {} has no message, skipping", update.update_id);
                continue;
            };

            let text = message.text.as_deref().unwrap_or_default();
            let now = Local::now().naive_local();
            if let Err(e) = self.handle_message_at(message.chat.id, text, now).await {
                error!(
                    "Failed to handle update {} from chat {}: {e:#}",
                    update.update_id, message.chat.id
                );
            }
        }

        updates.iter().map(|u| u.update_id).max().map(|id| id + 1)
    }

    /// Route one message as of `now` and send the matching reply
    pub async fn handle_message_at(
        &self,
        chat_id: i64,
        text: &str,
        now: NaiveDateTime,
    ) -> Result<Response> {
        if let Some(reminder) = self.parser.parse(chat_id, text) {
            if reminder.is_in_future(now) {
                let saved = self.repository.save(&reminder).await?;
                info!(
                    "Reminder {:?} saved for chat {} at {}",
                    saved.id, saved.chat_id, saved.notification_time
                );
                self.transport
                    .send_message(chat_id, &replies::setup_confirmation(&saved), None)
                    .await?;
                return Ok(Response::Scheduled(saved));
            }

            info!(
                "Reminder for chat {chat_id} at {} is not in the future, not saving",
                reminder.notification_time
            );
            self.transport
                .send_message(chat_id, replies::PAST_DUE, Some(ParseMode::Html))
                .await?;
            return Ok(Response::PastDue);
        }

        if text == START_COMMAND {
            self.transport
                .send_message(chat_id, replies::GREETING, Some(ParseMode::Html))
                .await?;
            return Ok(Response::Greeting);
        }

        self.transport
            .send_message(chat_id, replies::UNRECOGNIZED, Some(ParseMode::Html))
            .await?;
        Ok(Response::Unrecognized)
    }

    /// Deliver reminders due in the current wall-clock minute
    pub async fn run_due_sweep(&self) -> Result<SweepReport> {
        self.run_due_sweep_at(Local::now().naive_local()).await
    }

    /// Deliver every reminder whose time equals `now` truncated to the minute
    ///
    /// Each delivery is attempted independently and never retried. Storage
    /// errors abort the sweep.
    pub async fn run_due_sweep_at(&self, now: NaiveDateTime) -> Result<SweepReport> {
        let minute = truncate_to_minute(now);
        let due = self.repository.find_by_notification_time(minute).await?;
        debug!("Due sweep for {minute}: {} reminder(s)", due.len());

        let mut report = SweepReport {
            minute,
            due: due.len(),
            delivered: 0,
            failed: 0,
        };

        for reminder in &due {
            match self
                .transport
                .send_message(reminder.chat_id, &reminder.message, None)
                .await
            {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    report.failed += 1;
                    warn!(
                        "Failed to deliver reminder {:?} to chat {}: {e:#}",
                        reminder.id, reminder.chat_id
                    );
                }
            }
        }

        if report.due > 0 {
            info!(
                "Delivered {}/{} reminder(s) for {minute}",
                report.delivered, report.due
            );
        }
        Ok(report)
    }
}
