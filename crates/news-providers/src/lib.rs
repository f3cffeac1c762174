//! Provider adapters: NewsAPI, OpenWeatherMap and a random-quote API.
//!
//! Each provider has a pure `parse_*` function (JSON body to domain record) and a reqwest client
//! behind an async trait so callers can substitute stubs.

pub mod error;
pub mod http;
pub mod news;
pub mod quote;
pub mod weather;

pub use error::{ProviderError, Result};
pub use http::{build_client, mask_token, DEFAULT_TIMEOUT, USER_AGENT};
pub use news::{parse_articles, Article, NewsApiClient, NewsSource, NEWSAPI_BASE_URL};
pub use quote::{parse_quote, Quote, QuoteSource, QuotesClient};
pub use weather::{parse_weather, OpenWeatherClient, WeatherReport, WeatherSource, OPENWEATHER_BASE_URL};
