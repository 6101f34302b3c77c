use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use teloxide::prelude::*;

use vidrelay::core::{config, init_logger};
use vidrelay::extract::ExtractionClient;
use vidrelay::relay::RelayPipeline;
use vidrelay::session::SessionStore;
use vidrelay::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};

/// Main entry point for the Telegram bot
///
/// # Errors
/// Returns an error if initialization fails (logging or bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    // Catch panics from handler tasks so they get logged instead of
    // silently killing a worker
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    // Load environment variables from .env if present
    let _ = dotenv();

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    let bot = create_bot()?;

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to register bot commands: {}", e);
    }

    let deps = HandlerDeps::new(
        Arc::new(ExtractionClient::from_env()?),
        Arc::new(SessionStore::new()),
        Arc::new(RelayPipeline::new()?),
    );

    log::info!("Bot started polling, extraction API: {}", *config::EXTRACT_API_URL);

    Dispatcher::builder(bot, schema(deps))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}
