//! NewsAPI adapter and client.
//!
//! https://newsapi.org/docs/endpoints/everything and /top-headlines. Both endpoints return
//! `{ "status": "ok", "totalResults": n, "articles": [...] }`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use tracing::{info, instrument};

use crate::error::{ProviderError, Result};
use crate::http::{build_client, endpoint, get_body, mask_token};

const PROVIDER: &str = "news";

pub const NEWSAPI_BASE_URL: &str = "https://newsapi.org";

/// One article as the provider returned it. Ids are assigned later by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: String,
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    articles: Option<Vec<RawArticle>>,
}

// Every key must be present; a present null is read as an empty string.
#[derive(Debug, Deserialize)]
struct RawArticle {
    #[serde(deserialize_with = "nullable_string")]
    title: String,
    #[serde(deserialize_with = "nullable_string")]
    description: String,
    #[serde(deserialize_with = "nullable_string")]
    url: String,
    #[serde(rename = "urlToImage", deserialize_with = "nullable_string")]
    url_to_image: String,
}

fn nullable_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Maps a NewsAPI body to articles, in response order.
///
/// A body without an `articles` key yields [`ProviderError::EmptyResult`]; an article missing
/// any of `title`, `description`, `url`, `urlToImage` fails the whole body.
pub fn parse_articles(body: &str) -> Result<Vec<Article>> {
    let response: NewsResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::malformed(PROVIDER, e.to_string()))?;

    let raw = response
        .articles
        .ok_or(ProviderError::EmptyResult { provider: PROVIDER })?;

    Ok(raw
        .into_iter()
        .map(|a| Article {
            title: a.title,
            description: a.description,
            url: a.url,
            image_url: a.url_to_image,
        })
        .collect())
}

/// Source of news articles.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Articles matching a free-text query (the country code from the picker).
    async fn everything(&self, query: &str) -> Result<Vec<Article>>;
    /// Top headlines for a two-letter country code.
    async fn top_headlines(&self, country: &str) -> Result<Vec<Article>>;
}

/// NewsAPI client.
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NewsApiClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        Self::with_base_url(api_key, NEWSAPI_BASE_URL.to_string(), timeout)
    }

    /// Client against a custom base URL (tests, proxies).
    pub fn with_base_url(api_key: String, base_url: String, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url,
            api_key,
        })
    }

    async fn fetch(&self, path: &str, params: &[(&str, &str)]) -> Result<Vec<Article>> {
        let mut url = endpoint(PROVIDER, &self.base_url, path)?;
        url.query_pairs_mut()
            .extend_pairs(params)
            .append_pair("apiKey", &self.api_key);

        let body = get_body(&self.client, PROVIDER, url).await?;
        let articles = parse_articles(&body)?;
        info!(count = articles.len(), path, "step: news fetched");
        Ok(articles)
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    #[instrument(skip(self), fields(api_key = %mask_token(&self.api_key)))]
    async fn everything(&self, query: &str) -> Result<Vec<Article>> {
        self.fetch("v2/everything", &[("q", query)]).await
    }

    #[instrument(skip(self), fields(api_key = %mask_token(&self.api_key)))]
    async fn top_headlines(&self, country: &str) -> Result<Vec<Article>> {
        self.fetch("v2/top-headlines", &[("country", country)]).await
    }
}
