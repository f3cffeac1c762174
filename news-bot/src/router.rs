//! Dispatch router: maps commands, menu texts and button taps to replies.
//!
//! The router keeps no per-chat state; everything it needs between calls lives in the catalog
//! and in the callback token of the tapped button.

use async_trait::async_trait;
use dbot_core::{CallbackQuery, Handler, HandlerResponse, Message, OutgoingMessage, Result, Update};
use news_providers::{QuoteSource, WeatherSource};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::catalog::CatalogError;
use crate::countries::CountrySelection;
use crate::render;
use crate::service::{NewsQuery, NewsService};
use crate::token::{CallbackToken, TokenError};

/// A recognized text command or menu button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextCommand {
    Start,
    News,
    Weather,
    Quote,
}

impl TextCommand {
    /// `/start` and the `🆕 Start` button; `News`, `Weather`, `Quote` with or without slash, any case.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text == render::START_BUTTON {
            return Some(TextCommand::Start);
        }
        // "/news@MyBot" in groups.
        let word = text.split('@').next().unwrap_or(text);
        let word = word.strip_prefix('/').unwrap_or(word).to_lowercase();
        match word.as_str() {
            "start" if text.starts_with('/') => Some(TextCommand::Start),
            "news" => Some(TextCommand::News),
            "weather" => Some(TextCommand::Weather),
            "quote" => Some(TextCommand::Quote),
            _ => None,
        }
    }
}

pub struct NewsRouter {
    news: NewsService,
    weather: Option<Arc<dyn WeatherSource>>,
    quotes: Arc<dyn QuoteSource>,
    default_country: String,
    city: String,
}

impl NewsRouter {
    /// `weather` is `None` when no weather key is configured; the Weather button then answers
    /// that weather is unavailable.
    pub fn new(
        news: NewsService,
        weather: Option<Arc<dyn WeatherSource>>,
        quotes: Arc<dyn QuoteSource>,
        default_country: String,
        city: String,
    ) -> Self {
        Self {
            news,
            weather,
            quotes,
            default_country,
            city,
        }
    }

    async fn on_text(&self, message: &Message) -> HandlerResponse {
        let Some(command) = TextCommand::parse(&message.content) else {
            debug!(chat_id = message.chat.id, "Ignoring unrecognized text");
            return HandlerResponse::Ignore;
        };
        info!(chat_id = message.chat.id, ?command, "step: text command");

        let replies = match command {
            TextCommand::Start => vec![render::welcome(), render::country_picker()],
            TextCommand::News => {
                vec![self.fetch_and_render(NewsQuery::Headlines(&self.default_country)).await]
            }
            TextCommand::Weather => vec![self.weather_reply().await],
            TextCommand::Quote => vec![self.quote_reply().await],
        };
        HandlerResponse::Reply(replies)
    }

    async fn on_callback(&self, query: &CallbackQuery) -> HandlerResponse {
        let token = match CallbackToken::parse(&query.data) {
            Ok(token) => token,
            Err(TokenError::UnknownPrefix(prefix)) => {
                debug!(%prefix, "Ignoring callback with unknown prefix");
                return HandlerResponse::Ignore;
            }
            Err(e @ TokenError::Invalid { .. }) => {
                warn!(error = %e, user_id = query.user.id, "Invalid callback token");
                return HandlerResponse::Stop;
            }
        };
        info!(chat_id = query.chat.id, ?token, "step: callback");

        match token {
            CallbackToken::Country(name) => match CountrySelection::resolve(&name) {
                Some(country) => HandlerResponse::Reply(vec![
                    self.fetch_and_render(NewsQuery::Search(country.query)).await,
                ]),
                None => {
                    warn!(country = %name, "Unknown country in callback, ignoring");
                    HandlerResponse::Stop
                }
            },
            CallbackToken::NewsDetail(id) => {
                let reply = match self.news.catalog().lookup(id).await {
                    Ok(item) => render::render_detail(&item),
                    Err(CatalogError::NotFound(id)) => {
                        info!(id, "News item not in current catalog");
                        render::not_found()
                    }
                };
                HandlerResponse::Reply(vec![reply])
            }
            CallbackToken::More(offset) => {
                let page = self.news.page_at(offset).await;
                HandlerResponse::Reply(vec![render::render_page(&page)])
            }
        }
    }

    async fn fetch_and_render(&self, query: NewsQuery<'_>) -> OutgoingMessage {
        match self.news.refresh(query).await {
            Ok(_) => render::render_page(&self.news.first_page().await),
            Err(_) => render::no_news(),
        }
    }

    async fn weather_reply(&self) -> OutgoingMessage {
        let Some(weather) = &self.weather else {
            debug!("Weather source not configured");
            return render::weather_unavailable();
        };
        match weather.current(&self.city).await {
            Ok(report) => render::render_weather(&report),
            Err(e) => {
                warn!(error = %e, city = %self.city, "Weather fetch failed");
                render::weather_unavailable()
            }
        }
    }

    async fn quote_reply(&self) -> OutgoingMessage {
        match self.quotes.random().await {
            Ok(quote) => render::render_quote(&quote),
            Err(e) => {
                warn!(error = %e, "Quote fetch failed");
                render::quote_unavailable()
            }
        }
    }
}

#[async_trait]
impl Handler for NewsRouter {
    #[instrument(skip(self, update), fields(kind = update.kind(), chat_id = update.chat().id))]
    async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        let response = match update {
            Update::Message(message) => self.on_text(message).await,
            Update::Callback(query) => self.on_callback(query).await,
        };
        Ok(response)
    }
}
