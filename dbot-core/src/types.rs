//! Core types: user, chat, inbound updates, outbound messages, and the Handler trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identity (id, username, names).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Chat (channel, group or private) identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

impl Chat {
    /// Chat known only by id (e.g. the configured target of the daily job).
    pub fn with_id(id: i64) -> Self {
        Self {
            id,
            chat_type: "unknown".to_string(),
        }
    }
}

/// An inbound text message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// An inbound tap on an inline button. `data` is the payload the button was rendered with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub data: String,
    /// Id of the message carrying the tapped keyboard, when the transport still has it.
    pub message_id: Option<String>,
}

/// Everything the chain can be asked to handle.
#[derive(Debug, Clone)]
pub enum Update {
    Message(Message),
    Callback(CallbackQuery),
}

impl Update {
    pub fn chat(&self) -> &Chat {
        match self {
            Update::Message(m) => &m.chat,
            Update::Callback(q) => &q.chat,
        }
    }

    pub fn user(&self) -> &User {
        match self {
            Update::Message(m) => &m.user,
            Update::Callback(q) => &q.user,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Update::Message(m) => &m.id,
            Update::Callback(q) => &q.id,
        }
    }

    /// Text of a message, or payload of a callback.
    pub fn payload(&self) -> &str {
        match self {
            Update::Message(m) => &m.content,
            Update::Callback(q) => &q.data,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Update::Message(_) => "message",
            Update::Callback(_) => "callback",
        }
    }
}

/// A button of an inline keyboard; `data` comes back as [`CallbackQuery::data`] when tapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineButton {
    pub label: String,
    pub data: String,
}

impl InlineButton {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// Keyboard attached to an outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyMarkup {
    /// Rows of buttons under the message.
    Inline(Vec<Vec<InlineButton>>),
    /// Rows of plain-text buttons shown under the input field.
    Keyboard(Vec<Vec<String>>),
}

/// How the transport should interpret message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFormat {
    #[default]
    Plain,
    Html,
}

/// Transport-agnostic description of one message to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutgoingMessage {
    Text {
        text: String,
        format: TextFormat,
        markup: Option<ReplyMarkup>,
    },
    Photo {
        url: String,
        caption: String,
        format: TextFormat,
    },
}

impl OutgoingMessage {
    pub fn text(text: impl Into<String>) -> Self {
        OutgoingMessage::Text {
            text: text.into(),
            format: TextFormat::Plain,
            markup: None,
        }
    }

    pub fn html(text: impl Into<String>) -> Self {
        OutgoingMessage::Text {
            text: text.into(),
            format: TextFormat::Html,
            markup: None,
        }
    }

    pub fn with_markup(self, markup: ReplyMarkup) -> Self {
        match self {
            OutgoingMessage::Text { text, format, .. } => OutgoingMessage::Text {
                text,
                format,
                markup: Some(markup),
            },
            photo => photo,
        }
    }

    /// Text of a text message, or caption of a photo.
    pub fn body(&self) -> &str {
        match self {
            OutgoingMessage::Text { text, .. } => text,
            OutgoingMessage::Photo { caption, .. } => caption,
        }
    }

    /// The same content as a text message, for a photo that could not be delivered.
    /// `None` for text messages.
    pub fn caption_fallback(&self) -> Option<OutgoingMessage> {
        match self {
            OutgoingMessage::Photo {
                caption, format, ..
            } => Some(OutgoingMessage::Text {
                text: caption.clone(),
                format: *format,
                markup: None,
            }),
            OutgoingMessage::Text { .. } => None,
        }
    }

    /// Inline keyboard rows, if any.
    pub fn inline_keyboard(&self) -> Option<&[Vec<InlineButton>]> {
        match self {
            OutgoingMessage::Text {
                markup: Some(ReplyMarkup::Inline(rows)),
                ..
            } => Some(rows),
            _ => None,
        }
    }
}

/// Handler result for the chain. `Reply` carries the messages to deliver so later handlers can see them in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; nothing to send.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and deliver these messages to the update's chat.
    Reply(Vec<OutgoingMessage>),
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific update type to core [`Update`]. `None` when the update carries nothing the chain handles.
pub trait ToCoreUpdate: Send + Sync {
    fn to_core(&self) -> Option<Update>;
}

/// Single handler concept: optional before / handle / after. Chain runs all before → handle until Stop/Reply → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _update: &Update) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the update. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _update: &Update) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _update: &Update,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}
