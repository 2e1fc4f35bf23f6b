//! # SQLite Storage
//!
//! Reminder persistence on a single SQLite connection shared behind an async
//! mutex. Timestamps are stored as `%Y-%m-%d %H:%M:%S` text so the due sweep
//! can match on string equality through the `notification_time` index.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use log::info;
use sqlite::{Connection, State};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::features::reminders::model::{truncate_to_minute, Reminder, STORAGE_TIME_FORMAT};
use crate::features::reminders::repository::ReminderRepository;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS reminders (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        chat_id INTEGER NOT NULL,
        message TEXT NOT NULL,
        notification_time TEXT NOT NULL,
        created_at TEXT DEFAULT CURRENT_TIMESTAMP
    );
    CREATE INDEX IF NOT EXISTS idx_reminders_notification_time
        ON reminders(notification_time);
";

#[derive(Clone)]
pub struct Database {
    connection: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the database at `path`; `:memory:` gives a private in-memory store
    pub async fn new(path: &str) -> Result<Self> {
        let connection =
            sqlite::open(path).with_context(|| format!("Failed to open database at {path}"))?;
        connection
            .execute(SCHEMA)
            .context("Failed to initialize reminders schema")?;

        info!("Database ready at {path}");

        Ok(Database {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    pub async fn count_reminders(&self) -> Result<i64> {
        let connection = self.connection.lock().await;
        let mut statement = connection.prepare("SELECT COUNT(*) AS total FROM reminders")?;
        statement.next()?;
        Ok(statement.read::<i64, _>("total")?)
    }
}

fn insert_reminder(connection: &Connection, reminder: &Reminder) -> Result<i64> {
    let time = truncate_to_minute(reminder.notification_time)
        .format(STORAGE_TIME_FORMAT)
        .to_string();

    let mut statement = connection
        .prepare(
            "INSERT INTO reminders (chat_id, message, notification_time)
             VALUES (:chat_id, :message, :notification_time)",
        )?;
    statement.bind((":chat_id", reminder.chat_id))?;
    statement.bind((":message", reminder.message.as_str()))?;
    statement.bind((":notification_time", time.as_str()))?;
    statement.next()?;

    let mut last_id = connection.prepare("SELECT last_insert_rowid() AS id")?;
    match last_id.next()? {
        State::Row => Ok(last_id.read::<i64, _>("id")?),
        State::Done => Err(anyhow!("SQLite returned no row id for inserted reminder")),
    }
}

fn select_by_time(connection: &Connection, time: NaiveDateTime) -> Result<Vec<Reminder>> {
    let key = time.format(STORAGE_TIME_FORMAT).to_string();

    let mut statement = connection.prepare(
        "SELECT id, chat_id, message, notification_time FROM reminders
         WHERE notification_time = :notification_time ORDER BY id",
    )?;
    statement.bind((":notification_time", key.as_str()))?;

    let mut reminders = Vec::new();
    while let State::Row = statement.next()? {
        let id = statement.read::<i64, _>("id")?;
        let chat_id = statement.read::<i64, _>("chat_id")?;
        let message = statement.read::<String, _>("message")?;
        let raw_time = statement.read::<String, _>("notification_time")?;
        let notification_time = NaiveDateTime::parse_from_str(&raw_time, STORAGE_TIME_FORMAT)
            .with_context(|| format!("Reminder {id} has malformed time {raw_time:?}"))?;

        reminders.push(Reminder::new(chat_id, message, notification_time).with_id(id));
    }
    Ok(reminders)
}

#[async_trait]
impl ReminderRepository for Database {
    async fn save(&self, reminder: &Reminder) -> Result<Reminder> {
        let connection = self.connection.lock().await;
        let id = insert_reminder(&connection, reminder)?;
        Ok(Reminder {
            id: Some(id),
            notification_time: truncate_to_minute(reminder.notification_time),
            ..reminder.clone()
        })
    }

    async fn find_by_notification_time(&self, time: NaiveDateTime) -> Result<Vec<Reminder>> {
        let connection = self.connection.lock().await;
        select_by_time(&connection, truncate_to_minute(time))
    }
}
