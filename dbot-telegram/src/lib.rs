//! # dbot-telegram
//!
//! Telegram bot framework layer: adapters, [`dbot_core::Bot`] implementation, minimal config, dispatcher runner.
//! Handles only Telegram connectivity and handler-chain execution; no application logic.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{TelegramCallbackWrapper, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{to_teloxide_markup, TelegramBotAdapter};
pub use config::TelegramConfig;
pub use runner::{deliver_update, run_dispatcher};
