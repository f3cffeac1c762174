//! Bot abstraction for sending messages.
//!
//! [`Bot`] is transport-agnostic; dbot-telegram implements it with teloxide.

use crate::error::Result;
use crate::types::{Chat, OutgoingMessage};
use async_trait::async_trait;

/// Abstraction for sending messages. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a plain text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a rendered message (text with keyboard, HTML text, photo with caption).
    async fn send(&self, chat: &Chat, message: &OutgoingMessage) -> Result<()>;
}
