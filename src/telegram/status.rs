//! In-place status message management
//!
//! One status message per operation, edited through its stages. If an edit
//! fails (message deleted, too old) a fresh message is sent and tracked
//! instead, so the user never loses the status line.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, MessageId};

use crate::relay::pipeline::RelayProgress;
use crate::telegram::Bot;

/// Tracks the progress message shown to the user for one operation.
pub struct StatusMessage {
    bot: Bot,
    pub chat_id: ChatId,
    pub message_id: Option<MessageId>,
}

impl StatusMessage {
    /// Sends the initial status text as a reply and tracks the message.
    pub async fn reply(bot: &Bot, chat_id: ChatId, text: &str) -> ResponseResult<Self> {
        let msg = bot.send_message(chat_id, text).await?;
        Ok(Self {
            bot: bot.clone(),
            chat_id,
            message_id: Some(msg.id),
        })
    }

    /// Attaches to an already-sent message, e.g. the one carrying the
    /// inline keyboard a callback came from.
    pub fn attached(bot: Bot, chat_id: ChatId, message_id: MessageId) -> Self {
        Self {
            bot,
            chat_id,
            message_id: Some(message_id),
        }
    }

    /// Replaces the status text in place.
    pub async fn update(&mut self, text: &str) -> ResponseResult<()> {
        self.edit(text, None).await
    }

    /// Replaces the status text in place and attaches choice buttons.
    pub async fn update_with_keyboard(&mut self, text: &str, keyboard: InlineKeyboardMarkup) -> ResponseResult<()> {
        self.edit(text, Some(keyboard)).await
    }

    async fn edit(&mut self, text: &str, keyboard: Option<InlineKeyboardMarkup>) -> ResponseResult<()> {
        if let Some(msg_id) = self.message_id {
            let mut edit = self.bot.edit_message_text(self.chat_id, msg_id, text);
            if let Some(ref kb) = keyboard {
                edit = edit.reply_markup(kb.clone());
            }
            match edit.await {
                Ok(_) => return Ok(()),
                Err(e) => {
                    log::warn!("Failed to edit status message: {}. Sending a new one.", e);
                }
            }
        }

        let mut send = self.bot.send_message(self.chat_id, text);
        if let Some(kb) = keyboard {
            send = send.reply_markup(kb);
        }
        let msg = send.await?;
        self.message_id = Some(msg.id);
        Ok(())
    }
}

#[async_trait]
impl RelayProgress for StatusMessage {
    async fn downloading(&mut self, resolution: &str) {
        let _ = self.update(&format!("⬇️ Downloading {}...", resolution)).await;
    }

    async fn uploading(&mut self, resolution: &str) {
        let _ = self.update(&format!("📤 Uploading {}...", resolution)).await;
    }

    async fn done(&mut self, resolution: &str) {
        let _ = self
            .update(&format!("✅ Done! Your {} video is ready.", resolution))
            .await;
    }
}
