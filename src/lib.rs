//! Vidrelay - Telegram bot that relays videos from arbitrary links into the chat
//!
//! The user sends a video URL, the bot asks a remote extraction service for
//! the available renditions, offers the mp4 ones as inline buttons and, once
//! a resolution is picked, downloads the file and re-uploads it to the chat.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors and logging
//! - `extract`: extraction-service client, job polling and format selection
//! - `relay`: download-then-upload pipeline with scoped temp files
//! - `session`: per-chat choice-set storage
//! - `telegram`: bot integration and handlers

pub mod core;
pub mod extract;
pub mod relay;
pub mod session;
pub mod telegram;

// Re-export commonly used types for convenience
pub use core::{config, AppError, AppResult};
pub use extract::{ExtractionClient, StatusPoller};
pub use relay::RelayPipeline;
pub use session::SessionStore;
pub use telegram::{create_bot, schema, HandlerDeps};
