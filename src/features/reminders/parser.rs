//! Reminder extraction from raw chat text
//!
//! Recognises messages shaped like `DD.MM.YYYY HH:MM Message`. Anything else,
//! including well-shaped text with an impossible calendar value, is not a
//! reminder.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use regex::Regex;

use super::model::Reminder;

/// 16 date/time characters, one space, then the body (single line)
const REMINDER_PATTERN: &str = r"^([0-9.:\s]{16}) (.+)$";

/// Exact `DD.MM.YYYY HH:MM` layout of the date-time token
const DATE_TIME_PATTERN: &str = r"^([0-9]{2})\.([0-9]{2})\.([0-9]{4}) ([0-9]{2}):([0-9]{2})$";

/// Stateless parser holding its compiled patterns
#[derive(Debug, Clone)]
pub struct ReminderParser {
    reminder_re: Regex,
    date_time_re: Regex,
}

impl ReminderParser {
    pub fn new() -> Result<Self> {
        Ok(ReminderParser {
            reminder_re: Regex::new(REMINDER_PATTERN)?,
            date_time_re: Regex::new(DATE_TIME_PATTERN)?,
        })
    }

    /// Extract a reminder for `chat_id` from `text`, or `None` if the text is not one
    pub fn parse(&self, chat_id: i64, text: &str) -> Option<Reminder> {
        let caps = self.reminder_re.captures(text)?;
        let date_time = caps.get(1)?.as_str();
        let body = caps.get(2)?.as_str();

        if body.trim().is_empty() {
            debug!("Rejected reminder with blank message");
            return None;
        }

        match self.parse_date_time(date_time) {
            Some(notification_time) => Some(Reminder::new(chat_id, body, notification_time)),
            None => {
                debug!("Rejected reminder date-time token {date_time:?}");
                None
            }
        }
    }

    /// Parse a `DD.MM.YYYY HH:MM` token into a calendar date-time
    pub fn parse_date_time(&self, token: &str) -> Option<NaiveDateTime> {
        let caps = self.date_time_re.captures(token)?;
        let field = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

        let day = field(1)?;
        let month = field(2)?;
        let year = i32::try_from(field(3)?).ok()?;
        let hour = field(4)?;
        let minute = field(5)?;

        NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)
    }
}
