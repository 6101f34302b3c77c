//! Telegram bot integration and handlers

pub mod bot;
pub mod handlers;
pub mod status;

// Re-exports for convenience
pub use bot::{create_bot, setup_bot_commands, Bot, Command};
pub use handlers::{schema, HandlerDeps, TelegramVideoSink};
pub use status::StatusMessage;
