//! Adapters from Telegram (teloxide) types to dbot_core types.
//! Depends only on teloxide and dbot_core type definitions.

use dbot_core::{CallbackQuery, Chat, Message, ToCoreUpdate, ToCoreUser, Update, User};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

fn unknown_user() -> User {
    User {
        id: 0,
        username: None,
        first_name: None,
        last_name: None,
    }
}

/// Wraps a teloxide Message. Only text messages become core updates.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreUpdate for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Option<Update> {
        let text = self.0.text()?;
        Some(Update::Message(Message {
            id: self.0.id.to_string(),
            user: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(unknown_user),
            chat: Chat {
                id: self.0.chat.id.0,
                chat_type: format!("{:?}", self.0.chat.kind),
            },
            content: text.to_string(),
            created_at: chrono::Utc::now(),
        }))
    }
}

/// Wraps a teloxide CallbackQuery. Queries without data (game buttons) are skipped.
pub struct TelegramCallbackWrapper<'a>(pub &'a teloxide::types::CallbackQuery);

impl<'a> ToCoreUpdate for TelegramCallbackWrapper<'a> {
    fn to_core(&self) -> Option<Update> {
        let query = self.0;
        let data = query.data.clone()?;
        let user = TelegramUserWrapper(&query.from).to_core();
        // Inaccessible (too old) messages still carry their chat; fall back to the private chat with the user.
        let chat = query
            .message
            .as_ref()
            .map(|m| Chat {
                id: m.chat().id.0,
                chat_type: format!("{:?}", m.chat().kind),
            })
            .unwrap_or_else(|| Chat {
                id: user.id,
                chat_type: "private".to_string(),
            });
        Some(Update::Callback(CallbackQuery {
            id: query.id.to_string(),
            message_id: query.message.as_ref().map(|m| m.id().to_string()),
            user,
            chat,
            data,
        }))
    }
}
