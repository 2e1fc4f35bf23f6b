//! Fixed reply texts sent back to chats

use super::model::Reminder;

pub const FORMAT_HINT: &str = "DD.MM.YYYY HH:MM Message";
pub const FORMAT_EXAMPLE: &str = "15.01.2024 20:00 Submit homework";

/// Reply to `/start` (HTML)
pub const GREETING: &str = "<b>Notification setup</b>\n\
Send message in the following format:\n\
DD.MM.YYYY HH:MM Message\n\
<i>Example:</i> <code>15.01.2024 20:00 Submit homework</code>";

/// Reply to text that is neither a reminder nor `/start` (HTML)
pub const UNRECOGNIZED: &str = "<b>Message has not been recognized.</b>\n\
Please check the format:\n\
DD.MM.YYYY HH:MM Message\n\
<i>Example:</i> <code>15.01.2024 20:00 Submit homework</code>";

/// Reply to a reminder whose time is not in the future (HTML)
pub const PAST_DUE: &str = "<b>Notification time is in the past.</b>\n\
Notification will not be sent.";

/// Plain-text confirmation for a saved reminder
pub fn setup_confirmation(reminder: &Reminder) -> String {
    format!(
        "Notification with text \"{}\" will be sent at {}",
        reminder.message,
        reminder.formatted_time()
    )
}
