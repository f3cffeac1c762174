//! Application config: Telegram connection, provider endpoints, daily schedule, logging.

use anyhow::{Context, Result};
use dbot_telegram::TelegramConfig;
use news_providers::{DEFAULT_TIMEOUT, NEWSAPI_BASE_URL, OPENWEATHER_BASE_URL};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// NewsAPI settings.
#[derive(Debug, Clone)]
pub struct NewsConfig {
    /// NEWS_API_KEY
    pub api_key: String,
    /// NEWS_API_BASE_URL
    pub base_url: String,
    /// NEWS_DEFAULT_COUNTRY, used by the News button and the daily job
    pub default_country: String,
}

/// OpenWeatherMap settings. Weather is disabled when `api_key` is `None`.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// WEATHER_API_KEY
    pub api_key: Option<String>,
    /// WEATHER_API_BASE_URL
    pub base_url: String,
    /// WEATHER_CITY
    pub city: String,
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram: TelegramConfig,
    /// CHAT_ID: target of the daily digest
    pub chat_id: i64,
    pub news: NewsConfig,
    pub weather: WeatherConfig,
    /// QUOTES_API_URL
    pub quotes_url: String,
    /// DAILY_HOUR, local time
    pub daily_hour: u32,
    /// DAILY_MINUTE
    pub daily_minute: u32,
    /// NEWS_PAGE_SIZE, shared by interactive paging and the daily digest
    pub page_size: usize,
    /// HTTP_TIMEOUT_SECS, per provider request
    pub http_timeout_secs: u64,
    /// LOG_FILE
    pub log_file: String,
}

impl BotConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let telegram = TelegramConfig::from_env(token)?;

        let chat_id = required("CHAT_ID")?
            .trim()
            .parse::<i64>()
            .context("CHAT_ID must be an integer chat id")?;

        let news = NewsConfig {
            api_key: required("NEWS_API_KEY")?,
            base_url: optional("NEWS_API_BASE_URL").unwrap_or_else(|| NEWSAPI_BASE_URL.to_string()),
            default_country: optional("NEWS_DEFAULT_COUNTRY").unwrap_or_else(|| "us".to_string()),
        };

        let weather = WeatherConfig {
            api_key: optional("WEATHER_API_KEY"),
            base_url: optional("WEATHER_API_BASE_URL")
                .unwrap_or_else(|| OPENWEATHER_BASE_URL.to_string()),
            city: optional("WEATHER_CITY").unwrap_or_else(|| "Chisinau".to_string()),
        };

        let quotes_url = required("QUOTES_API_URL")?;

        Ok(Self {
            telegram,
            chat_id,
            news,
            weather,
            quotes_url,
            daily_hour: parsed("DAILY_HOUR", 21)?,
            daily_minute: parsed("DAILY_MINUTE", 38)?,
            page_size: parsed("NEWS_PAGE_SIZE", 7)?,
            http_timeout_secs: parsed("HTTP_TIMEOUT_SECS", DEFAULT_TIMEOUT.as_secs())?,
            log_file: optional("LOG_FILE").unwrap_or_else(|| "logs/news-bot.log".to_string()),
        })
    }

    /// Fails fast on values the bot cannot run with.
    pub fn validate(&self) -> Result<()> {
        self.telegram.validate()?;

        for (name, url) in [
            ("NEWS_API_BASE_URL", self.news.base_url.as_str()),
            ("WEATHER_API_BASE_URL", self.weather.base_url.as_str()),
            ("QUOTES_API_URL", self.quotes_url.as_str()),
        ] {
            if reqwest::Url::parse(url).is_err() {
                anyhow::bail!("{} is not a valid URL: {}", name, url);
            }
        }

        if self.daily_hour >= 24 {
            anyhow::bail!("DAILY_HOUR must be in 0..24, got {}", self.daily_hour);
        }
        if self.daily_minute >= 60 {
            anyhow::bail!("DAILY_MINUTE must be in 0..60, got {}", self.daily_minute);
        }
        if self.page_size == 0 {
            anyhow::bail!("NEWS_PAGE_SIZE must be greater than 0");
        }
        if self.http_timeout_secs == 0 {
            anyhow::bail!("HTTP_TIMEOUT_SECS must be greater than 0");
        }
        Ok(())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn weather_enabled(&self) -> bool {
        self.weather.api_key.is_some()
    }
}

// Unset and blank are the same.
fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn required(key: &str) -> Result<String> {
    optional(key).with_context(|| format!("{} not set", key))
}

fn parsed<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", key, raw)),
        None => Ok(default),
    }
}
