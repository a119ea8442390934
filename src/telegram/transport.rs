//! Outbound chat operations used by the request coordinator.
//!
//! `ChatTransport` is the seam between the coordinator and Telegram; the
//! production implementation wraps a teloxide `Bot`, tests record calls.

use async_trait::async_trait;
use std::path::Path;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, InputFile, MessageId};

use crate::core::config;
use crate::core::error::{AppError, AppResult};
use crate::download::request::FormatChoice;
use crate::telegram::callback::CallbackCodec;
use crate::telegram::Bot;

/// Where a request's status updates and result go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyTarget {
    pub chat_id: ChatId,
    /// Message to edit with progress (the format prompt), if any
    pub status_message: Option<MessageId>,
}

impl ReplyTarget {
    pub fn new(chat_id: ChatId, status_message: Option<MessageId>) -> Self {
        Self {
            chat_id,
            status_message,
        }
    }
}

/// Outbound chat operations. All of them are fallible and may suspend.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> AppResult<MessageId>;

    /// Sends `text` with one button per choice.
    async fn send_choice_prompt(&self, chat_id: ChatId, text: &str, choices: &[FormatChoice]) -> AppResult<MessageId>;

    async fn edit_message(&self, chat_id: ChatId, message_id: MessageId, text: &str) -> AppResult<()>;

    /// Uploads a local file as a document; the file name is its base name.
    async fn send_file_attachment(&self, chat_id: ChatId, path: &Path) -> AppResult<()>;
}

/// `ChatTransport` over the Telegram Bot API.
#[derive(Clone)]
pub struct TeloxideTransport {
    bot: Bot,
    codec: CallbackCodec,
    max_upload_bytes: u64,
}

impl TeloxideTransport {
    pub fn new(bot: Bot, codec: CallbackCodec) -> Self {
        Self {
            bot,
            codec,
            max_upload_bytes: config::upload::max_bytes(),
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: u64) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}

#[async_trait]
impl ChatTransport for TeloxideTransport {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> AppResult<MessageId> {
        let msg = self.bot.send_message(chat_id, text).await?;
        Ok(msg.id)
    }

    async fn send_choice_prompt(&self, chat_id: ChatId, text: &str, choices: &[FormatChoice]) -> AppResult<MessageId> {
        let data = self.codec.encode_choices(choices).await;
        let keyboard = InlineKeyboardMarkup::new(
            choices
                .iter()
                .zip(data)
                .map(|(choice, data)| vec![InlineKeyboardButton::callback(choice.intent.label(), data)]),
        );

        let msg = self.bot.send_message(chat_id, text).reply_markup(keyboard).await?;
        Ok(msg.id)
    }

    async fn edit_message(&self, chat_id: ChatId, message_id: MessageId, text: &str) -> AppResult<()> {
        self.bot.edit_message_text(chat_id, message_id, text).await?;
        Ok(())
    }

    async fn send_file_attachment(&self, chat_id: ChatId, path: &Path) -> AppResult<()> {
        let size = fs_err::tokio::metadata(path).await?.len();
        if size > self.max_upload_bytes {
            return Err(AppError::Validation(format!(
                "File is too large for Telegram ({:.1} MB, limit {} MB)",
                size as f64 / (1024.0 * 1024.0),
                self.max_upload_bytes / (1024 * 1024)
            )));
        }

        log::info!("Uploading {} ({} bytes) to chat {}", path.display(), size, chat_id);
        self.bot
            .send_document(chat_id, InputFile::file(path.to_path_buf()))
            .await?;
        Ok(())
    }
}
