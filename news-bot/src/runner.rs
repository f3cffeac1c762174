//! Wiring: providers, catalog, router, daily job, Telegram dispatcher.

use anyhow::Result;
use dbot_core::{init_tracing, Bot as CoreBot, Chat};
use dbot_telegram::{run_dispatcher, TelegramBotAdapter};
use handler_chain::HandlerChain;
use news_providers::{
    NewsApiClient, NewsSource, OpenWeatherClient, QuoteSource, QuotesClient, WeatherSource,
};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::catalog::NewsCatalog;
use crate::config::BotConfig;
use crate::handlers::LoggingHandler;
use crate::job::{DailyJob, DailyScheduler, JobOutcome};
use crate::router::NewsRouter;
use crate::service::NewsService;

/// Provider clients and the shared catalog, built once per process.
#[derive(Clone)]
pub struct BotComponents {
    pub catalog: Arc<NewsCatalog>,
    pub news: NewsService,
    pub weather: Option<Arc<dyn WeatherSource>>,
    pub quotes: Arc<dyn QuoteSource>,
}

impl BotComponents {
    /// Components over arbitrary sources (tests pass stubs here).
    pub fn new(
        news_source: Arc<dyn NewsSource>,
        weather: Option<Arc<dyn WeatherSource>>,
        quotes: Arc<dyn QuoteSource>,
        page_size: usize,
    ) -> Self {
        let catalog = Arc::new(NewsCatalog::new());
        let news = NewsService::new(Arc::clone(&catalog), news_source, page_size);
        Self {
            catalog,
            news,
            weather,
            quotes,
        }
    }

    /// Real HTTP clients from config. Weather is left out when no key is configured.
    pub fn from_config(config: &BotConfig) -> Result<Self> {
        let timeout = config.http_timeout();

        let news_source: Arc<dyn NewsSource> = Arc::new(NewsApiClient::with_base_url(
            config.news.api_key.clone(),
            config.news.base_url.clone(),
            timeout,
        )?);

        let weather: Option<Arc<dyn WeatherSource>> = match &config.weather.api_key {
            Some(key) => Some(Arc::new(OpenWeatherClient::with_base_url(
                key.clone(),
                config.weather.base_url.clone(),
                timeout,
            )?)),
            None => None,
        };

        let quotes: Arc<dyn QuoteSource> = Arc::new(QuotesClient::new(&config.quotes_url, timeout)?);

        Ok(Self::new(news_source, weather, quotes, config.page_size))
    }
}

/// Logging first, router last.
pub fn build_handler_chain(config: &BotConfig, components: &BotComponents) -> HandlerChain {
    let router = NewsRouter::new(
        components.news.clone(),
        components.weather.clone(),
        Arc::clone(&components.quotes),
        config.news.default_country.clone(),
        config.weather.city.clone(),
    );
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler::new()))
        .add_handler(Arc::new(router))
}

pub fn build_daily_job(
    config: &BotConfig,
    components: &BotComponents,
    bot: Arc<dyn CoreBot>,
) -> DailyJob {
    DailyJob::new(
        components.news.clone(),
        components.weather.clone(),
        Arc::clone(&components.quotes),
        bot,
        Chat::with_id(config.chat_id),
        config.news.default_country.clone(),
        config.weather.city.clone(),
    )
}

/// Main entry: init logging, build components, start the daily scheduler, then poll until Ctrl-C.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    init_tracing(&config.log_file)?;

    info!(
        chat_id = config.chat_id,
        default_country = %config.news.default_country,
        weather_enabled = config.weather_enabled(),
        daily_at = %format!("{:02}:{:02}", config.daily_hour, config.daily_minute),
        page_size = config.page_size,
        "Initializing news bot"
    );

    let bot: teloxide::Bot = config.telegram.build_bot()?;
    let core_bot: Arc<dyn CoreBot> = Arc::new(TelegramBotAdapter::new(bot.clone()));

    let components = BotComponents::from_config(&config)?;
    let handler_chain = build_handler_chain(&config, &components);
    let job = Arc::new(build_daily_job(&config, &components, Arc::clone(&core_bot)));

    let scheduler =
        DailyScheduler::new(job, config.daily_hour, config.daily_minute).spawn();

    let result = run_dispatcher(bot, handler_chain, core_bot).await;

    scheduler.abort();
    info!("News bot stopped");
    result
}

/// Runs the daily digest once and returns.
#[instrument(skip(config))]
pub async fn run_daily_once(config: BotConfig) -> Result<JobOutcome> {
    init_tracing(&config.log_file)?;

    let bot: teloxide::Bot = config.telegram.build_bot()?;
    let core_bot: Arc<dyn CoreBot> = Arc::new(TelegramBotAdapter::new(bot));
    let components = BotComponents::from_config(&config)?;

    let outcome = build_daily_job(&config, &components, core_bot).run().await;
    info!(?outcome, "Daily digest run finished");
    Ok(outcome)
}
