//! # dbot-core
//!
//! Core types and traits for the Telegram bot: [`Bot`], [`Handler`], inbound [`Update`]s,
//! outbound [`OutgoingMessage`]s, and tracing initialization. Transport-agnostic; used by
//! dbot-telegram, handler-chain and the application crates.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{DbotError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{
    CallbackQuery, Chat, Handler, HandlerResponse, InlineButton, Message, OutgoingMessage,
    ReplyMarkup, TextFormat, ToCoreUpdate, ToCoreUser, Update, User,
};
