//! # news-bot
//!
//! Telegram news bot. Users pick a country and page through its headlines with inline buttons;
//! a daily digest with headlines, weather and a quote goes to one configured chat.
//!
//! - [`catalog`]: the shared, wholesale-replaced list of news items and its paging.
//! - [`router`]: [`NewsRouter`], the handler mapping commands and button taps to replies.
//! - [`job`]: [`DailyJob`] and its scheduler.
//! - [`runner`]: wiring for the `news-bot` binary.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod countries;
pub mod handlers;
pub mod job;
pub mod render;
pub mod router;
pub mod runner;
pub mod service;
pub mod token;

pub use catalog::{CatalogError, NewsCatalog, NewsItem, NewsPage, PageRequest, PageResult};
pub use cli::{load_config, Cli, Commands};
pub use config::BotConfig;
pub use countries::{Country, CountrySelection};
pub use handlers::LoggingHandler;
pub use job::{next_occurrence, DailyJob, DailyScheduler, JobOutcome};
pub use router::{NewsRouter, TextCommand};
pub use runner::{build_daily_job, build_handler_chain, run_bot, run_daily_once, BotComponents};
pub use service::{NewsQuery, NewsService};
pub use token::{CallbackToken, TokenError};
