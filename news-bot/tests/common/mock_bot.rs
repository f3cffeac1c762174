//! Mock implementation of [`dbot_core::Bot`] for integration tests.
//!
//! Records every sent message with its chat id so tests can assert on what would have reached
//! Telegram. `failing()` builds a bot whose sends all fail; `rejecting_photos()` fails only photo
//! sends, like Telegram does when it cannot fetch the image URL.

use async_trait::async_trait;
use dbot_core::{Bot, Chat, DbotError, OutgoingMessage, Result};
use std::sync::Mutex;

/// One recorded send.
#[derive(Debug, Clone)]
pub struct SentRecord {
    pub chat_id: i64,
    pub message: OutgoingMessage,
}

#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<SentRecord>>,
    fail: bool,
    reject_photos: bool,
}

#[allow(dead_code)]
impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn rejecting_photos() -> Self {
        Self {
            reject_photos: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<SentRecord> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.send(chat, &OutgoingMessage::text(text)).await
    }

    async fn send(&self, chat: &Chat, message: &OutgoingMessage) -> Result<()> {
        if self.fail {
            return Err(DbotError::Bot("mock send failure".to_string()));
        }
        if self.reject_photos && matches!(message, OutgoingMessage::Photo { .. }) {
            return Err(DbotError::Bot(
                "Bad Request: wrong file identifier/HTTP URL specified".to_string(),
            ));
        }
        self.sent.lock().unwrap().push(SentRecord {
            chat_id: chat.id,
            message: message.clone(),
        });
        Ok(())
    }
}
