//! Minute-aligned timer driving the due sweep

use chrono::{Local, NaiveDateTime, Timelike};
use log::{error, info, warn};
use std::sync::Arc;
use std::time::Duration;

use super::model::truncate_to_minute;
use super::service::{ReminderService, SweepReport};

const NANOS_PER_MINUTE: u64 = 60_000_000_000;

pub struct ReminderScheduler {
    service: Arc<ReminderService>,
    last_swept: Option<NaiveDateTime>,
}

impl ReminderScheduler {
    pub fn new(service: Arc<ReminderService>) -> Self {
        Self {
            service,
            last_swept: None,
        }
    }

    /// Run forever, sweeping once at the start of every wall-clock minute
    pub async fn run(mut self) {
        info!("Reminder scheduler started (sweeps at each minute boundary)");

        loop {
            let wait = duration_until_next_minute(Local::now().naive_local());
            tokio::time::sleep(wait).await;
            self.tick().await;
        }
    }

    /// One sweep at the current wall-clock time
    pub async fn tick(&mut self) -> Option<SweepReport> {
        self.tick_at(Local::now().naive_local()).await
    }

    /// Sweep the minute containing `now` unless it is not after the last swept one
    ///
    /// Errors are logged so the timer keeps running. A failed sweep still
    /// counts as swept; deliveries are never retried.
    pub async fn tick_at(&mut self, now: NaiveDateTime) -> Option<SweepReport> {
        let minute = truncate_to_minute(now);
        if let Some(last) = self.last_swept {
            if minute <= last {
                warn!("Clock is at {minute}, already swept {last}; skipping sweep");
                return None;
            }
        }
        self.last_swept = Some(minute);

        match self.service.run_due_sweep_at(minute).await {
            Ok(report) => Some(report),
            Err(e) => {
                error!("Due sweep failed: {e:#}");
                None
            }
        }
    }
}

/// Time left until the next `HH:MM:00` after `now`
pub fn duration_until_next_minute(now: NaiveDateTime) -> Duration {
    // Leap seconds report nanoseconds past 1e9
    let nanos = u64::from(now.nanosecond().min(999_999_999));
    let elapsed = u64::from(now.second()) * 1_000_000_000 + nanos;
    Duration::from_nanos(NANOS_PER_MINUTE - elapsed.min(NANOS_PER_MINUTE - 1))
}
