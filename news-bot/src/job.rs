//! Daily digest: one composed message to the configured chat, once a day.

use chrono::{DateTime, Days, TimeZone};
use dbot_core::{Bot, Chat};
use news_providers::{QuoteSource, WeatherSource};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

use crate::render;
use crate::service::{NewsQuery, NewsService};

/// What one run of the job did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    Sent,
    /// Every fetch failed and the catalog was empty.
    NothingToSend,
    SendFailed,
}

/// Fetches headlines (replacing the catalog on success), weather and a quote, then sends the
/// digest. Sections whose fetch failed are left out.
pub struct DailyJob {
    news: NewsService,
    weather: Option<Arc<dyn WeatherSource>>,
    quotes: Arc<dyn QuoteSource>,
    bot: Arc<dyn Bot>,
    chat: Chat,
    country: String,
    city: String,
}

impl DailyJob {
    pub fn new(
        news: NewsService,
        weather: Option<Arc<dyn WeatherSource>>,
        quotes: Arc<dyn QuoteSource>,
        bot: Arc<dyn Bot>,
        chat: Chat,
        country: String,
        city: String,
    ) -> Self {
        Self {
            news,
            weather,
            quotes,
            bot,
            chat,
            country,
            city,
        }
    }

    /// Never fails; every error is logged. Safe to run more than once a day.
    #[instrument(skip(self), fields(chat_id = self.chat.id))]
    pub async fn run(&self) -> JobOutcome {
        info!("step: daily job started");

        // A failed refresh keeps the previous catalog, which is still worth sending.
        if let Err(e) = self.news.refresh(NewsQuery::Headlines(&self.country)).await {
            warn!(error = %e, "Daily headlines fetch failed, using current catalog");
        }

        let weather = match &self.weather {
            Some(source) => match source.current(&self.city).await {
                Ok(report) => Some(report),
                Err(e) => {
                    warn!(error = %e, city = %self.city, "Daily weather fetch failed");
                    None
                }
            },
            None => None,
        };

        let quote = match self.quotes.random().await {
            Ok(quote) => Some(quote),
            Err(e) => {
                warn!(error = %e, "Daily quote fetch failed");
                None
            }
        };

        let page = self.news.first_page().await;
        let Some(message) = render::compose_daily(weather.as_ref(), quote.as_ref(), &page) else {
            warn!("Daily job has nothing to send");
            return JobOutcome::NothingToSend;
        };

        match self.bot.send(&self.chat, &message).await {
            Ok(()) => {
                info!("step: daily digest sent");
                JobOutcome::Sent
            }
            Err(e) => {
                error!(error = %e, "Failed to send daily digest");
                JobOutcome::SendFailed
            }
        }
    }
}

/// Next local occurrence of `hour:minute` strictly after `now`.
///
/// Days where that wall-clock time does not exist (DST gap) are skipped; when it exists twice,
/// the earlier instant is used.
pub fn next_occurrence<Tz: TimeZone>(now: &DateTime<Tz>, hour: u32, minute: u32) -> DateTime<Tz> {
    let tz = now.timezone();
    let today = now.date_naive();

    for days in 0..=2 {
        let candidate = today
            .checked_add_days(Days::new(days))
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .and_then(|naive| tz.from_local_datetime(&naive).earliest());
        if let Some(at) = candidate {
            if at > *now {
                return at;
            }
        }
    }
    now.clone() + chrono::Duration::days(1)
}

/// Runs a [`DailyJob`] at a fixed local time, every day, on its own tokio task.
pub struct DailyScheduler {
    job: Arc<DailyJob>,
    hour: u32,
    minute: u32,
}

impl DailyScheduler {
    pub fn new(job: Arc<DailyJob>, hour: u32, minute: u32) -> Self {
        Self { job, hour, minute }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move { self.run_forever().await })
    }

    async fn run_forever(self) {
        loop {
            let now = chrono::Local::now();
            let next = next_occurrence(&now, self.hour, self.minute);
            let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
            info!(next_run = %next, wait_secs = wait.as_secs(), "step: daily job scheduled");

            tokio::time::sleep(wait).await;

            let outcome = self.job.run().await;
            info!(?outcome, "Daily job finished");
        }
    }
}
