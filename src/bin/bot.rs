use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};
use std::sync::Arc;

use reminder_bot::core::Config;
use reminder_bot::database::Database;
use reminder_bot::features::reminders::{ReminderScheduler, ReminderService, UpdateListener};
use reminder_bot::transport::TelegramClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting reminder bot...");
    info!("Configuration: {config:?}");

    let database = Database::new(&config.database_path).await?;
    let telegram = Arc::new(TelegramClient::from_config(&config)?);
    let service = Arc::new(ReminderService::new(
        Arc::new(database),
        telegram.clone(),
    )?);

    // Start the due-reminder sweep
    let scheduler = ReminderScheduler::new(service.clone());
    tokio::spawn(async move {
        scheduler.run().await;
    });

    let listener = UpdateListener::new(telegram, service);

    tokio::select! {
        _ = listener.run() => {
            error!("Update listener stopped unexpectedly");
        }
        result = tokio::signal::ctrl_c() => {
            match result {
                Ok(()) => info!("Shutdown signal received, stopping"),
                Err(e) => error!("Failed to listen for shutdown signal: {e}"),
            }
        }
    }

    Ok(())
}
