//! Bot configuration, loaded from env (and `.env` via dotenvy in main).

mod bot_config;


pub use bot_config::{BotConfig, NewsConfig, WeatherConfig};
