//! # Feature: Reminders
//!
//! Parses `DD.MM.YYYY HH:MM Message` chat messages into reminders, stores the
//! ones set in the future, and delivers each back to its chat during the
//! minute it was set for.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod listener;
pub mod model;
pub mod parser;
pub mod replies;
pub mod repository;
pub mod scheduler;
pub mod service;

pub use listener::UpdateListener;
pub use model::{truncate_to_minute, Reminder};
pub use parser::ReminderParser;
pub use repository::ReminderRepository;
pub use scheduler::{duration_until_next_minute, ReminderScheduler};
pub use service::{ReminderService, Response, SweepReport};
