//! Reminder entity and minute-resolution time helpers

use chrono::{NaiveDateTime, Timelike};

/// Storage format for notification timestamps
pub const STORAGE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// User-facing format used in confirmations
pub const DISPLAY_TIME_FORMAT: &str = "%H:%M %d.%m.%Y";

/// A scheduled notification for a chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    /// Assigned by storage on insert; `None` until persisted
    pub id: Option<i64>,

    /// Chat that created the reminder and receives the delivery
    pub chat_id: i64,

    /// Text delivered back to the chat
    pub message: String,

    /// Delivery minute (seconds always zero)
    pub notification_time: NaiveDateTime,
}

impl Reminder {
    pub fn new(chat_id: i64, message: impl Into<String>, notification_time: NaiveDateTime) -> Self {
        Reminder {
            id: None,
            chat_id,
            message: message.into(),
            notification_time: truncate_to_minute(notification_time),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// True when the delivery minute is strictly after `now`
    pub fn is_in_future(&self, now: NaiveDateTime) -> bool {
        self.notification_time > now
    }

    pub fn formatted_time(&self) -> String {
        self.notification_time.format(DISPLAY_TIME_FORMAT).to_string()
    }
}

/// Drop seconds and sub-second precision
pub fn truncate_to_minute(time: NaiveDateTime) -> NaiveDateTime {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_milli_opt(h, m, s, 250)
            .unwrap()
    }

    #[test]
    fn test_truncate_to_minute() {
        let truncated = truncate_to_minute(at(20, 0, 42));
        assert_eq!(truncated.second(), 0);
        assert_eq!(truncated.nanosecond(), 0);
        assert_eq!(truncated.minute(), 0);
        assert_eq!(truncated.hour(), 20);
    }

    #[test]
    fn test_new_truncates_time() {
        let reminder = Reminder::new(1, "tea", at(9, 30, 59));
        assert_eq!(reminder.notification_time, truncate_to_minute(at(9, 30, 0)));
        assert_eq!(reminder.id, None);
    }

    #[test]
    fn test_is_in_future_is_strict() {
        let reminder = Reminder::new(1, "tea", at(20, 0, 0));
        assert!(reminder.is_in_future(at(19, 59, 59)));
        assert!(!reminder.is_in_future(reminder.notification_time));
        assert!(!reminder.is_in_future(at(20, 0, 1)));
    }

    #[test]
    fn test_formatted_time() {
        let reminder = Reminder::new(1, "tea", at(8, 5, 0));
        assert_eq!(reminder.formatted_time(), "08:05 15.01.2024");
    }
}
