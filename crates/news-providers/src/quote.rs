//! Random-quote adapter (zenquotes-style `[{"q": "...", "a": "..."}]` bodies) and client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{info, instrument};

use crate::error::{ProviderError, Result};
use crate::http::{build_client, get_body};

const PROVIDER: &str = "quote";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

#[derive(Debug, Deserialize)]
struct RawQuote {
    q: String,
    a: String,
}

/// Takes the first element of the array. `[]` is [`ProviderError::EmptyResult`].
pub fn parse_quote(body: &str) -> Result<Quote> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| ProviderError::malformed(PROVIDER, e.to_string()))?;

    let items = match value {
        Value::Array(items) => items,
        _ => return Err(ProviderError::malformed(PROVIDER, "expected a JSON array")),
    };

    let first = items
        .into_iter()
        .next()
        .ok_or(ProviderError::EmptyResult { provider: PROVIDER })?;

    let raw: RawQuote =
        serde_json::from_value(first).map_err(|e| ProviderError::malformed(PROVIDER, e.to_string()))?;

    Ok(Quote {
        text: raw.q,
        author: raw.a,
    })
}

#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn random(&self) -> Result<Quote>;
}

/// Client for a fixed quotes URL.
#[derive(Debug, Clone)]
pub struct QuotesClient {
    client: Client,
    url: reqwest::Url,
}

impl QuotesClient {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let url = reqwest::Url::parse(url)
            .map_err(|e| ProviderError::malformed(PROVIDER, format!("bad url {}: {}", url, e)))?;
        Ok(Self {
            client: build_client(timeout)?,
            url,
        })
    }
}

#[async_trait]
impl QuoteSource for QuotesClient {
    #[instrument(skip(self))]
    async fn random(&self) -> Result<Quote> {
        let body = get_body(&self.client, PROVIDER, self.url.clone()).await?;
        let quote = parse_quote(&body)?;
        info!(author = %quote.author, "step: quote fetched");
        Ok(quote)
    }
}
