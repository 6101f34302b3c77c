//! Dispatcher schema and handlers
//!
//! Three branches: the /start command, plain-text messages treated as video
//! links, and callback queries carrying a resolution choice. Every chat
//! update is its own unit of work; per-chat state lives in the session store
//! only. Errors never escape to the dispatcher — each one becomes a single
//! status-message edit plus a log line with enough context to diagnose later.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, InputFile};
use url::Url;

use crate::core::config;
use crate::core::error::{AppError, AppResult, ExtractError};
use crate::extract::client::ExtractionClient;
use crate::extract::formats::{select_formats, ChoiceSet};
use crate::extract::poll;
use crate::relay::pipeline::{RelayPipeline, VideoSink};
use crate::session::SessionStore;
use crate::telegram::bot::{Bot, Command, START_TEXT};
use crate::telegram::status::StatusMessage;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub extraction: Arc<ExtractionClient>,
    pub sessions: Arc<SessionStore>,
    pub pipeline: Arc<RelayPipeline>,
}

impl HandlerDeps {
    pub fn new(extraction: Arc<ExtractionClient>, sessions: Arc<SessionStore>, pipeline: Arc<RelayPipeline>) -> Self {
        Self {
            extraction,
            sessions,
            pipeline,
        }
    }
}

/// Creates the main dispatcher schema for the bot.
///
/// The same tree is used in production and in integration tests.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_messages = deps.clone();
    let deps_callback = deps;

    dptree::entry()
        .branch(command_handler())
        .branch(message_handler(deps_messages))
        .branch(callback_handler(deps_callback))
}

/// Handler for the /start command
fn command_handler() -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter_command::<Command>()
        .endpoint(|bot: Bot, msg: Message, cmd: Command| async move {
            match cmd {
                Command::Start => {
                    bot.send_message(msg.chat.id, START_TEXT).await?;
                }
            }
            Ok(())
        })
}

/// Handler for plain-text messages: every non-command text is treated as a
/// video link.
fn message_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| {
            msg.text()
                .map(|t| !t.trim().is_empty() && !t.trim_start().starts_with('/'))
                .unwrap_or(false)
        })
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move {
                handle_video_link(bot, msg, deps).await;
                Ok(())
            }
        })
}

/// Handler for resolution-choice button presses
fn callback_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
        let deps = deps.clone();
        async move {
            handle_choice_callback(bot, q, deps).await;
            Ok(())
        }
    })
}

async fn handle_video_link(bot: Bot, msg: Message, deps: HandlerDeps) {
    let Some(text) = msg.text() else { return };
    let url = text.trim().to_string();
    let chat_id = msg.chat.id;

    let mut status = match StatusMessage::reply(&bot, chat_id, "🔍 Processing video...").await {
        Ok(status) => status,
        Err(e) => {
            log::error!("Failed to send status message to chat {}: {}", chat_id, e);
            return;
        }
    };

    if url.len() > config::validation::MAX_URL_LENGTH {
        log::warn!("Rejected overlong link from chat {} (len {})", chat_id, url.len());
        let _ = status.update("❌ Failed to process video. Invalid URL or service error.").await;
        return;
    }

    if let Err(err) = process_video_link(&mut status, &deps, chat_id, &url).await {
        log::error!("Processing failed: chat={}, url={}, error={}", chat_id, url, err);
        let _ = status.update(&user_message(&err)).await;
    }
}

/// Validate, submit, poll, select, present: the whole flow for one link.
async fn process_video_link(
    status: &mut StatusMessage,
    deps: &HandlerDeps,
    chat_id: ChatId,
    url: &str,
) -> AppResult<()> {
    Url::parse(url)?;

    let handle = deps.extraction.submit(url).await?;
    let job = poll::resolve(
        deps.extraction.as_ref(),
        &handle,
        config::poll::MAX_ATTEMPTS,
        config::poll::interval(),
    )
    .await?;
    let set = select_formats(&job)?;

    let keyboard = choice_keyboard(&set);
    // New submission replaces the chat's previous choices wholesale
    deps.sessions.put_choices(chat_id, set);
    status
        .update_with_keyboard("✅ Choose a resolution to download:", keyboard)
        .await?;
    Ok(())
}

async fn handle_choice_callback(bot: Bot, q: CallbackQuery, deps: HandlerDeps) {
    // Acknowledge the press right away so the button stops spinning
    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        log::warn!("Failed to answer callback query: {}", e);
    }

    let Some(data) = q.data else { return };
    let (Some(chat_id), Some(message_id)) = (
        q.message.as_ref().map(|m| m.chat().id),
        q.message.as_ref().map(|m| m.id()),
    ) else {
        log::warn!("Callback query without an attached message, data={}", data);
        return;
    };

    let mut status = StatusMessage::attached(bot.clone(), chat_id, message_id);

    let Ok(index) = data.parse::<usize>() else {
        log::warn!("Malformed callback data for chat {}: {:?}", chat_id, data);
        let _ = status.update("❌ Invalid format selection.").await;
        return;
    };

    match process_choice(&mut status, &bot, &deps, chat_id, index).await {
        Ok(size) => {
            log::info!("Relay finished: chat={}, bytes={}", chat_id, size);
        }
        Err(err) => {
            log::error!("Selection failed: chat={}, index={}, error={}", chat_id, index, err);
            let _ = status.update(&user_message(&err)).await;
        }
    }
}

/// Resolves the pressed button against the session store and relays the
/// chosen rendition.
async fn process_choice(
    status: &mut StatusMessage,
    bot: &Bot,
    deps: &HandlerDeps,
    chat_id: ChatId,
    index: usize,
) -> AppResult<u64> {
    let choice = deps.sessions.choice(chat_id, index)?;
    let sink = TelegramVideoSink::new(bot.clone());
    let size = deps.pipeline.relay(&choice.descriptor, &sink, chat_id, status).await?;
    Ok(size)
}

/// One inline button per eligible format; callback data is the choice index.
fn choice_keyboard(set: &ChoiceSet) -> InlineKeyboardMarkup {
    let rows: Vec<Vec<InlineKeyboardButton>> = set
        .iter()
        .enumerate()
        .map(|(index, choice)| vec![InlineKeyboardButton::callback(choice.label.clone(), index.to_string())])
        .collect();
    InlineKeyboardMarkup::new(rows)
}

/// Maps a failed handler flow onto the single user-visible status line.
fn user_message(err: &AppError) -> String {
    match err {
        AppError::Extract(e) => extract_error_text(e),
        AppError::Session(_) => "❌ Invalid format selection.".to_string(),
        AppError::Relay(_) => "❌ Download or upload failed.".to_string(),
        AppError::Url(_) => "❌ Failed to process video. Invalid URL or service error.".to_string(),
        AppError::Telegram(_) => "❌ Internal error occurred. Please try again later.".to_string(),
    }
}

fn extract_error_text(err: &ExtractError) -> String {
    match err {
        ExtractError::RemoteRejected => "❌ Failed to process video. Invalid URL or service error.".to_string(),
        ExtractError::Http(_) => "❌ Error while checking video status.".to_string(),
        ExtractError::Network(_) => "❌ Internal error occurred. Please try again later.".to_string(),
        ExtractError::RemoteFailed(reason) => format!("❌ Video processing failed: {}", reason),
        ExtractError::Timeout => "❌ Video processing timed out. Try again later.".to_string(),
        ExtractError::NoResult => "❌ No downloadable formats found.".to_string(),
        ExtractError::NoEligibleFormats => "❌ No supported video formats found.".to_string(),
    }
}

/// Production video sink: uploads through the bot's send_video.
pub struct TelegramVideoSink {
    bot: Bot,
}

impl TelegramVideoSink {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl VideoSink for TelegramVideoSink {
    async fn send_video(&self, chat_id: ChatId, path: &Path, caption: &str) -> anyhow::Result<()> {
        self.bot
            .send_video(chat_id, InputFile::file(path.to_path_buf()))
            .caption(caption.to_string())
            .supports_streaming(true)
            .await?;
        Ok(())
    }
}
