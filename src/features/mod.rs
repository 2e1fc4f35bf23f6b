//! Feature modules

pub mod reminders;

pub use reminders::{ReminderScheduler, ReminderService, UpdateListener};
