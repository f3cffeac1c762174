//! Wraps teloxide::Bot and implements [`dbot_core::Bot`]. Production code sends messages via Telegram; tests can substitute another Bot impl.

use async_trait::async_trait;
use dbot_core::{Bot as CoreBot, Chat, DbotError, OutgoingMessage, ReplyMarkup, Result, TextFormat};
use teloxide::prelude::*;
use teloxide::types::{
    ChatId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, KeyboardButton, KeyboardMarkup,
    ParseMode,
};
use tracing::debug;

/// Thin wrapper around teloxide::Bot that implements dbot-core's Bot trait.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

/// Maps a core keyboard to the teloxide markup type.
pub fn to_teloxide_markup(markup: &ReplyMarkup) -> teloxide::types::ReplyMarkup {
    match markup {
        ReplyMarkup::Inline(rows) => {
            let rows = rows.iter().map(|row| {
                row.iter()
                    .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.data.clone()))
                    .collect::<Vec<_>>()
            });
            teloxide::types::ReplyMarkup::InlineKeyboard(InlineKeyboardMarkup::new(rows))
        }
        ReplyMarkup::Keyboard(rows) => {
            let rows = rows.iter().map(|row| {
                row.iter()
                    .map(|label| KeyboardButton::new(label.clone()))
                    .collect::<Vec<_>>()
            });
            teloxide::types::ReplyMarkup::Keyboard(KeyboardMarkup::new(rows).resize_keyboard())
        }
    }
}

fn parse_mode(format: TextFormat) -> Option<ParseMode> {
    match format {
        TextFormat::Plain => None,
        TextFormat::Html => Some(ParseMode::Html),
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn send(&self, chat: &Chat, message: &OutgoingMessage) -> Result<()> {
        let chat_id = ChatId(chat.id);
        match message {
            OutgoingMessage::Text {
                text,
                format,
                markup,
            } => {
                let mut request = self.bot.send_message(chat_id, text.clone());
                if let Some(mode) = parse_mode(*format) {
                    request = request.parse_mode(mode);
                }
                if let Some(markup) = markup {
                    request = request.reply_markup(to_teloxide_markup(markup));
                }
                request.await.map_err(|e| DbotError::Bot(e.to_string()))?;
            }
            OutgoingMessage::Photo {
                url,
                caption,
                format,
            } => {
                let parsed = reqwest::Url::parse(url)
                    .map_err(|e| DbotError::Bot(format!("Invalid photo url {}: {}", url, e)))?;
                let mut request = self
                    .bot
                    .send_photo(chat_id, InputFile::url(parsed))
                    .caption(caption.clone());
                if let Some(mode) = parse_mode(*format) {
                    request = request.parse_mode(mode);
                }
                request.await.map_err(|e| DbotError::Bot(e.to_string()))?;
            }
        }
        debug!(chat_id = chat.id, "Message sent");
        Ok(())
    }
}
