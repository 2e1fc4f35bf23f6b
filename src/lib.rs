// Core layer - configuration and text utilities
pub mod core;

// Features layer - reminder parsing, scheduling and delivery
pub mod features;

// Infrastructure
pub mod database;
pub mod transport;

pub use crate::core::Config;
pub use database::Database;
pub use features::reminders::{Reminder, ReminderRepository};
pub use features::{ReminderScheduler, ReminderService, UpdateListener};
pub use transport::{TelegramClient, Transport};
