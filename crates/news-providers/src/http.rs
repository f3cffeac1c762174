//! Shared HTTP plumbing: client construction, GET with status check, key masking for logs.

use crate::error::{ProviderError, Result};
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, warn};

/// Sent with every provider request; NewsAPI rejects requests without a User-Agent.
pub const USER_AGENT: &str = "MyTelegramBot/1.0";

/// Per-request timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds a client with the bot's User-Agent and the given per-request timeout.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(ProviderError::Client)
}

/// Masks an API key for logging: first 7 chars + `***` + last 4 chars; keys of 11 chars or fewer become `***`.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let len = chars.len();
    if len <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[len - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

/// Parses `base` and appends `path`, keeping any path prefix on the base.
pub(crate) fn endpoint(provider: &'static str, base: &str, path: &str) -> Result<Url> {
    let joined = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    Url::parse(&joined).map_err(|e| ProviderError::malformed(provider, format!("bad url {}: {}", joined, e)))
}

/// GETs `url` and returns the body. Non-2xx becomes [`ProviderError::Transport`].
pub(crate) async fn get_body(client: &Client, provider: &'static str, url: Url) -> Result<String> {
    debug!(provider, host = ?url.host_str(), path = %url.path(), "step: provider request");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| ProviderError::Request { provider, source })?;

    let status = response.status();
    if !status.is_success() {
        let reason = status.canonical_reason().unwrap_or("unknown");
        warn!(provider, status = status.as_u16(), reason, "Provider request failed");
        return Err(ProviderError::Transport {
            provider,
            status: status.as_u16(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|source| ProviderError::Request { provider, source })?;
    debug!(provider, body_len = body.len(), "step: provider response received");
    Ok(body)
}
