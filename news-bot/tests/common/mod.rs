//! Shared test helpers: mock bot, stub sources, update builders.

#![allow(dead_code)]

pub mod mock_bot;
pub mod stub_sources;

use chrono::Utc;
use dbot_core::{CallbackQuery, Chat, Message, Update, User};

pub const CHAT_ID: i64 = 4242;

pub fn user() -> User {
    User {
        id: 7,
        username: Some("reader".to_string()),
        first_name: Some("Test".to_string()),
        last_name: None,
    }
}

pub fn text_update(text: &str) -> Update {
    Update::Message(Message {
        id: "m1".to_string(),
        user: user(),
        chat: Chat {
            id: CHAT_ID,
            chat_type: "private".to_string(),
        },
        content: text.to_string(),
        created_at: Utc::now(),
    })
}

pub fn callback_update(data: &str) -> Update {
    Update::Callback(CallbackQuery {
        id: "cb1".to_string(),
        user: user(),
        chat: Chat {
            id: CHAT_ID,
            chat_type: "private".to_string(),
        },
        data: data.to_string(),
        message_id: Some("100".to_string()),
    })
}
